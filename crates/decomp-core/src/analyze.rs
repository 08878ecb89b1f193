//! Corrida del análisis sobre las representaciones de un item.
//!
//! Cada programa se analiza dentro de su scope transaccional: commit si el
//! análisis termina, rollback ante cualquier error (incluida la señal de
//! memoria agotada). Si el item produjo exactamente un programa, el
//! resultado analizado se persiste de vuelta sobre su artifact de cache
//! para que la próxima corrida no repita el trabajo.

use std::path::Path;

use decomp_engine::{Analyzer, EngineError, Program};
use log::warn;

use crate::cache::ImportCache;
use crate::errors::PipelineError;

/// Analiza todos los programas de `input`. Una falla en un programa no
/// impide analizar los restantes; el primer error se propaga recién al
/// cerrar el loop, para que el límite del item lo loguee y excluya el
/// item de la decompilación.
pub fn analyze_item(cache: &ImportCache,
                    analyzer: &dyn Analyzer,
                    input: &Path,
                    programs: &mut [Program])
                    -> Result<(), PipelineError> {
    let single = programs.len() == 1;
    let mut first_error: Option<PipelineError> = None;

    for program in programs.iter_mut() {
        // El análisis es intensivo en memoria: punto de reclamación
        // forzado antes de cada programa.
        analyzer.reclaim_memory();

        let result = program.transaction(|p| {
            analyzer.analyze(p)?;
            p.analyzed = true;
            Ok(())
        });

        match result {
            Ok(()) => {
                if single {
                    let cache_path = cache.cache_path(input)?;
                    if let Err(e) = cache.persist(&cache_path, program) {
                        warn!("Could not save analyzed program for {}: {}", input.display(), e);
                    }
                }
            }
            Err(e) => {
                let mapped = match e {
                    EngineError::OutOfMemory => PipelineError::AnalysisOom { program: program.name.clone() },
                    other => PipelineError::Analysis { program: program.name.clone(),
                                                       source: other },
                };
                if first_error.is_none() {
                    first_error = Some(mapped);
                } else {
                    warn!("Further analysis failure in {}: {}", program.name, mapped);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
