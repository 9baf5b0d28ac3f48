use serde::{Deserialize, Serialize};
use std::fmt;

/// The two model slots the service serves from. Each slot holds one
/// independently-trained classifier over its own disjoint label space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSlot {
    Acute,
    Chronic,
}

impl ModelSlot {
    /// Both slots, in invocation order: acute before chronic. The aggregator
    /// relies on this order for its tie-break.
    pub const ALL: [ModelSlot; 2] = [ModelSlot::Acute, ModelSlot::Chronic];

    /// File name of this slot's artifact inside the model directory.
    pub fn artifact_file(&self) -> &'static str {
        match self {
            ModelSlot::Acute => "acute_model.json",
            ModelSlot::Chronic => "chronic_model.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSlot::Acute => "acute",
            ModelSlot::Chronic => "chronic",
        }
    }
}

impl fmt::Display for ModelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
