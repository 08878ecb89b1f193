//! decomp-engine: fachada neutral hacia el motor de análisis/decompilación.
//!
//! El pipeline no sabe desensamblar ni decompilar; delega en un backend
//! externo detrás de tres interfaces de capacidad (`Importer`, `Analyzer`,
//! `Decompiler`). Este crate define esas interfaces, el modelo neutral de
//! programa que intercambian las fases, y los errores del motor.

use thiserror::Error;

pub mod program;
pub mod traits;

pub use program::{Function, Program};
pub use traits::{Analyzer, Decompiler, Importer, NullEngine};

/// Marcador que el decompilador incrusta en su salida cuando tuvo que
/// truncar el flujo de control. Un resultado que lo contiene se considera
/// degradado y no debe escribirse al documento de salida.
pub const TRUNCATION_MARKER: &str = "Truncating control flow here";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("importer: {0}")]
    Import(String),
    #[error("analysis: {0}")]
    Analysis(String),
    #[error("out of memory during analysis")]
    OutOfMemory,
    #[error("decompiler: {0}")]
    Decompile(String),
}
