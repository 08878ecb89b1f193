//! Decompilación por función y escritura incremental del documento de
//! salida.
//!
//! El documento se resetea a vacío antes de procesar (centinela de
//! reanudación: su existencia, no su contenido, marca "hubo un intento") y
//! cada función exitosa se agrega con escrituras append-only, así el
//! progreso parcial sobrevive un crash en la función siguiente.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use decomp_engine::{Decompiler, Program, TRUNCATION_MARKER};
use log::{debug, error, warn};

use crate::constants::FUNCTION_HEADER;
use crate::errors::PipelineError;

/// Conteos por item de la fase de decompilación.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecompileOutcome {
    /// Funciones escritas al documento.
    pub written: usize,
    /// Resultados degradados (marcador de truncamiento), descartados.
    pub degraded: usize,
    /// Funciones cuya decompilación falló.
    pub failed: usize,
}

/// Borra el documento si existe y lo recrea vacío. Se invoca antes de
/// cualquier procesamiento del item, de modo que una corrida futura sin
/// reprocesamiento explícito no reintente un item que ya falló a medias.
pub fn reset_output(out_path: &Path) -> Result<(), PipelineError> {
    if out_path.exists() {
        fs::remove_file(out_path)?;
    }
    fs::File::create(out_path)?;
    Ok(())
}

/// Decompila toda función no externa de cada programa del item, en el
/// orden natural de la tabla, agregando los éxitos a `out_path`.
///
/// Una función que falla no corta el loop; para no inundar el log, sólo
/// la primera falla del item se loguea completa (las siguientes bajan a
/// nivel debug). Los resultados degradados se descartan con un warning.
pub fn decompile_item(decompiler: &dyn Decompiler,
                      input: &Path,
                      programs: &[Program],
                      out_path: &Path)
                      -> Result<DecompileOutcome, PipelineError> {
    let file_name = input.file_name().map(|n| n.to_string_lossy().into_owned())
                         .unwrap_or_else(|| input.display().to_string());
    let mut out = OpenOptions::new().append(true).open(out_path)?;
    let mut outcome = DecompileOutcome::default();

    // Guarda anti-inundación: se resetea por item, no por programa.
    let mut first_error = true;

    for program in programs {
        for func in program.internal_functions() {
            debug!("Decompiling {} function {}...", file_name, func.name);
            match decompiler.decompile(func) {
                Ok(text) if text.contains(TRUNCATION_MARKER) => {
                    warn!("Degraded decompile of {} function {} (truncated control flow)",
                          file_name, func.name);
                    outcome.degraded += 1;
                }
                Ok(text) => {
                    writeln!(out, "{}{}", FUNCTION_HEADER, func.name)?;
                    out.write_all(text.as_bytes())?;
                    out.flush()?;
                    outcome.written += 1;
                }
                Err(e) => {
                    if first_error {
                        error!("Error decompiling {} function {}: {}", file_name, func.name, e);
                        first_error = false;
                    } else {
                        debug!("Error decompiling {} function {} (suppressed)", file_name, func.name);
                    }
                    outcome.failed += 1;
                }
            }
        }
    }

    Ok(outcome)
}
