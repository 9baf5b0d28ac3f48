use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::ModelSlot;
use crate::predictor::{ArtifactFile, ClassifierArtifact, PredictorError};

/// Optional manifest in the model directory mapping artifact filenames to
/// SHA-256 hex digests, written by the offline training pipeline.
pub const CHECKSUMS_FILE: &str = "checksums.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Artifact not present: {0}")]
    NotPresent(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Artifact parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(#[from] PredictorError),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
    #[error("Artifact tagged '{found}' loaded into '{slot}' slot")]
    SlotMismatch { slot: ModelSlot, found: ModelSlot },
}

/// Read-only view over the model directory the offline trainer populates.
/// Artifacts are loaded once at process start; nothing here is touched on the
/// request path.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    model_dir: PathBuf,
    checksums: Option<HashMap<String, String>>,
}

impl ArtifactStore {
    /// Opens a model directory, reading the checksum manifest if one exists.
    pub fn new<P: AsRef<Path>>(model_dir: P) -> Result<Self, StoreError> {
        let model_dir = model_dir.as_ref().to_path_buf();
        let manifest = model_dir.join(CHECKSUMS_FILE);
        let checksums = if manifest.exists() {
            let bytes = fs::read(&manifest)?;
            Some(serde_json::from_slice(&bytes)?)
        } else {
            None
        };
        Ok(Self {
            model_dir,
            checksums,
        })
    }

    /// Returns the model directory to use when none is given explicitly:
    /// the `SYMTRIAGE_MODEL_DIR` environment variable, or `model/` next to
    /// the working directory as the trainer lays it out.
    pub fn default_model_dir() -> PathBuf {
        if let Ok(path) = env::var("SYMTRIAGE_MODEL_DIR") {
            return PathBuf::from(path);
        }
        PathBuf::from("model")
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn artifact_path(&self, slot: ModelSlot) -> PathBuf {
        self.model_dir.join(slot.artifact_file())
    }

    pub fn is_present(&self, slot: ModelSlot) -> bool {
        self.artifact_path(slot).exists()
    }

    /// Loads and validates one slot's artifact.
    ///
    /// When the checksum manifest lists the file, its digest is verified
    /// before parsing; a corrupted artifact must never be scored. The file's
    /// own tag must name the slot it is loaded into.
    pub fn load(&self, slot: ModelSlot) -> Result<ClassifierArtifact, StoreError> {
        let path = self.artifact_path(slot);
        if !path.exists() {
            return Err(StoreError::NotPresent(path.display().to_string()));
        }

        let bytes = fs::read(&path)?;
        if let Some(expected) = self
            .checksums
            .as_ref()
            .and_then(|sums| sums.get(slot.artifact_file()))
        {
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            let actual = format!("{:x}", hasher.finalize());
            if &actual != expected {
                log::error!(
                    "{} artifact failed checksum verification at {}",
                    slot,
                    path.display()
                );
                return Err(StoreError::HashMismatch {
                    file: slot.artifact_file().to_string(),
                    expected: expected.clone(),
                    actual,
                });
            }
            log::info!("{} artifact checksum verified", slot);
        }

        let file: ArtifactFile = serde_json::from_slice(&bytes)?;
        if file.tag != slot {
            return Err(StoreError::SlotMismatch {
                slot,
                found: file.tag,
            });
        }

        Ok(ClassifierArtifact::from_file(file)?)
    }
}
