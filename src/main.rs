use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};

use symtriage::{
    AppState, ArtifactStore, ModelSlot, PredictorBuilder, StoreError, DEFAULT_CONFIDENCE_FLOOR,
    DEFAULT_RESULT_CAP,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0:8000")]
    addr: String,

    /// Directory holding the trained model artifacts
    /// (default: $SYMTRIAGE_MODEL_DIR, then ./model)
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Minimum posterior probability for a condition to appear in results
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE_FLOOR)]
    min_confidence: f32,

    /// Maximum number of ranked predictions per request
    #[arg(long, default_value_t = DEFAULT_RESULT_CAP)]
    top: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let model_dir = args.model_dir.unwrap_or_else(ArtifactStore::default_model_dir);
    info!("Loading model artifacts from {}", model_dir.display());
    let store = ArtifactStore::new(&model_dir)?;

    let mut builder = PredictorBuilder::new()
        .with_confidence_floor(args.min_confidence)?
        .with_result_cap(args.top)?;

    for slot in ModelSlot::ALL {
        match store.load(slot) {
            Ok(artifact) => {
                info!(
                    "{} model loaded: {} classes over {} features",
                    slot,
                    artifact.classes().len(),
                    artifact.features().len()
                );
                builder = builder.with_artifact(artifact)?;
            }
            Err(StoreError::NotPresent(path)) => {
                warn!("{} model not present at {}, slot left empty", slot, path);
            }
            Err(e) => {
                error!("{} model failed to load, slot left empty: {}", slot, e);
            }
        }
    }

    let predictor = builder.build();
    if !predictor.is_ready() {
        warn!("No model artifact loaded; the service will answer 503 until restarted with models");
    }

    let state = AppState {
        predictor: Arc::new(predictor),
    };
    let app = symtriage::router(state);

    info!("Serving on {}", args.addr);
    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
