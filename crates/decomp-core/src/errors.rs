//! Errores del pipeline.
//!
//! Política de propagación: todo error por item se captura en el límite
//! del item (coordinador) y se loguea; sólo `Discovery` es fatal para la
//! corrida completa.

use std::path::PathBuf;

use decomp_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("discovery failed under {root}: {detail}")]
    Discovery { root: PathBuf, detail: String },

    #[error("{path} does not lie inside the scan root {root}")]
    Mapping { path: PathBuf, root: PathBuf },

    #[error("import failed for {path}: {source}")]
    Import { path: PathBuf, source: EngineError },

    #[error("cache write failed for {path}: {detail}")]
    CacheWrite { path: PathBuf, detail: String },

    #[error("analysis failed for {program}: {source}")]
    Analysis { program: String, source: EngineError },

    #[error("out of memory while analyzing {program}")]
    AnalysisOom { program: String },

    #[error("decompile failed for {function}: {source}")]
    Decompile { function: String, source: EngineError },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
