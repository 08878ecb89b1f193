//! decomp-core: orquestación del pipeline batch de decompilación.
//!
//! Dos fases sobre un árbol de object files: importar cada binario a una
//! representación estructurada (cacheada en una jerarquía espejo en disco)
//! y luego analizar + decompilar cada función a un documento de texto por
//! input. El motor de análisis es un colaborador opaco (ver decomp-engine);
//! lo que vive acá es el mapeo determinista de rutas, la reanudabilidad
//! entre corridas interrumpidas, el aislamiento de fallas por item y el
//! conteo de progreso por fase.

pub mod analyze;
pub mod cache;
pub mod constants;
pub mod coordinator;
pub mod decompile;
pub mod discover;
pub mod errors;
pub mod paths;
pub mod progress;

pub use cache::{ImportCache, Resolved};
pub use coordinator::{CancelFlag, RunCoordinator, RunParameters, RunSummary};
pub use decompile::DecompileOutcome;
pub use errors::PipelineError;
pub use progress::PhaseProgress;
