//! Memoized model artifact store.
//!
//! Loads the two serialized artifacts exactly once per process and shares
//! them read-only across every request afterward. First access is
//! single-flight: concurrent callers racing the initial load all observe
//! one load, not several.

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::error::ArtifactError;
use crate::model::{FittedPipeline, LabelEncoder};
use crate::observability::metrics;

/// File name of the serialized pipeline inside the artifact directory.
pub const PIPELINE_FILE: &str = "menu_profitability_pipeline.json";
/// File name of the serialized label encoder inside the artifact directory.
pub const ENCODER_FILE: &str = "profitability_label_encoder.json";

/// The loaded artifact pair. Immutable after load.
#[derive(Debug)]
pub struct ModelArtifacts {
    pub pipeline: FittedPipeline,
    pub encoder: LabelEncoder,
}

/// Lazily loads and caches the artifact pair for the process lifetime.
pub struct ModelStore {
    dir: PathBuf,
    cell: OnceCell<ModelArtifacts>,
    loads: AtomicU64,
}

impl ModelStore {
    /// Record the artifact directory. No I/O happens here.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cell: OnceCell::new(),
            loads: AtomicU64::new(0),
        }
    }

    /// The cached artifact pair, loading it from disk on first call.
    ///
    /// A load failure is not cached: the error propagates and a later call
    /// would retry, but in practice startup treats the first failure as
    /// fatal so the process never serves without artifacts.
    pub fn artifacts(&self) -> Result<&ModelArtifacts, ArtifactError> {
        self.cell.get_or_try_init(|| self.load())
    }

    /// How many times the disk load actually ran. Stays at 1 for a healthy
    /// process no matter how many predictions are served.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    fn load(&self) -> Result<ModelArtifacts, ArtifactError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        metrics::ARTIFACT_LOADS.inc();

        let pipeline_path = self.dir.join(PIPELINE_FILE);
        let encoder_path = self.dir.join(ENCODER_FILE);
        info!(
            "Loading model artifacts from {:?} and {:?}",
            pipeline_path, encoder_path
        );

        let pipeline: FittedPipeline = read_artifact(&pipeline_path)?;
        pipeline.validate()?;

        let encoder: LabelEncoder = read_artifact(&encoder_path)?;
        encoder.validate()?;

        if pipeline.n_classes() != encoder.len() {
            return Err(ArtifactError::Invalid(format!(
                "pipeline emits {} classes but encoder names {}",
                pipeline.n_classes(),
                encoder.len()
            )));
        }

        info!(
            "Loaded pipeline ({} restaurants, {} categories) and encoder ({} classes)",
            pipeline.restaurants().len(),
            pipeline.categories().len(),
            encoder.len()
        );

        Ok(ModelArtifacts { pipeline, encoder })
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
