//! Driver de dos fases con aislamiento de errores por item.
//!
//! Fase 1: descubrir e importar/cachear cada input. Fase 2: analizar y
//! decompilar cada item importado. Toda excepción dentro del procesamiento
//! de un item se captura en su límite, se loguea con la ruta ofensora y la
//! corrida sigue con el item siguiente; sólo la falla de discovery es
//! fatal. Ningún resultado se reintenta dentro de una corrida: la
//! reanudación es re-invocar el pipeline con los flags de reuso.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use decomp_engine::{Analyzer, Decompiler, Importer, Program};
use log::{error, info};

use crate::analyze;
use crate::cache::ImportCache;
use crate::decompile;
use crate::discover;
use crate::errors::PipelineError;
use crate::paths;
use crate::progress::PhaseProgress;

/// Flag cooperativo de cancelación; se consulta sólo en límites de item
/// (no existe cancelación a mitad de una función).
pub type CancelFlag = Arc<AtomicBool>;

/// Parámetros de una corrida.
#[derive(Debug, Clone)]
pub struct RunParameters {
    /// Raíz bajo la cual se descubren los inputs.
    pub root: PathBuf,
    /// Raíz del cache espejado.
    pub cache_root: PathBuf,
    /// true: un artifact de cache presente evita re-importar ese input.
    /// false: siempre se re-importa, pisando artifacts viejos.
    pub reuse_imports: bool,
    /// true: un documento de salida presente saltea el item completo.
    /// false: todo item se re-analiza y re-decompila.
    pub reuse_outputs: bool,
}

impl RunParameters {
    /// Defaults de reanudación: ambos reusos activos, cache bajo
    /// `<root>/.decomp`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let cache_root = root.join(".decomp");
        Self { root,
               cache_root,
               reuse_imports: true,
               reuse_outputs: true }
    }
}

/// Conteos de una corrida completa. Los items con error nunca vuelven la
/// corrida en `Err`: el estado de salida refleja que la corrida terminó,
/// no el éxito de cada item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    /// Imports frescos (fase 1).
    pub imported: usize,
    /// Items servidos desde el cache (fase 1).
    pub cache_hits: usize,
    /// Items excluidos de la fase 2 por falla de import.
    pub import_errors: usize,
    /// Items decompilados (fase 2, con o sin funciones exitosas).
    pub items_decompiled: usize,
    /// Items salteados por documento de salida preexistente.
    pub items_skipped: usize,
    /// Items cuya fase 2 terminó con un error logueado.
    pub item_errors: usize,
    pub functions_written: usize,
    pub functions_degraded: usize,
    pub functions_failed: usize,
}

pub struct RunCoordinator<'e> {
    importer: &'e dyn Importer,
    analyzer: &'e dyn Analyzer,
    decompiler: &'e dyn Decompiler,
    cancel: CancelFlag,
}

impl<'e> RunCoordinator<'e> {
    pub fn new(importer: &'e dyn Importer, analyzer: &'e dyn Analyzer, decompiler: &'e dyn Decompiler) -> Self {
        Self { importer,
               analyzer,
               decompiler,
               cancel: Arc::new(AtomicBool::new(false)) }
    }

    /// Instala un flag de cancelación compartido.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Corre el pipeline completo. Sólo discovery puede devolver `Err`;
    /// todo lo demás queda contabilizado en el `RunSummary`.
    pub fn run(&self, params: &RunParameters) -> Result<RunSummary, PipelineError> {
        let inputs = discover::discover(&params.root)?;
        let mut summary = RunSummary { discovered: inputs.len(),
                                       ..Default::default() };
        if inputs.is_empty() {
            info!("No files found under {} (batch decompile done)", params.root.display());
            return Ok(summary);
        }

        let cache = ImportCache::new(&params.root, &params.cache_root);

        // Fase 1: import/cache, un item a la vez, errores aislados.
        info!("*** IMPORTING {} FILES IN {}", inputs.len(), params.root.display());
        let mut imported: Vec<(PathBuf, Vec<Program>)> = Vec::with_capacity(inputs.len());
        let mut progress = PhaseProgress::new(inputs.len());
        for input in inputs {
            if self.cancelled() {
                info!("Cancelled at item boundary ({} imported)", progress.done());
                break;
            }
            info!("IMPORTING {} {}", progress.label(), input.display());
            match cache.resolve(self.importer, &input, params.reuse_imports) {
                Ok(resolved) => {
                    if resolved.from_cache {
                        summary.cache_hits += 1;
                    } else {
                        summary.imported += 1;
                    }
                    imported.push((input, resolved.programs));
                }
                Err(e) => {
                    error!("Error importing {}: {}", input.display(), e);
                    summary.import_errors += 1;
                }
            }
            progress.advance();
        }

        // Fase 2: analizar + decompilar, contador independiente.
        info!("*** DECOMPILING {} FILES", imported.len());
        let mut progress = PhaseProgress::new(imported.len());
        for (input, mut programs) in imported {
            if self.cancelled() {
                info!("Cancelled at item boundary ({} decompiled)", progress.done());
                break;
            }
            info!("DECOMPILING {} {}", progress.label(), input.display());
            if let Err(e) = self.process_item(&cache, params, &input, &mut programs, &mut summary) {
                error!("Error decompiling {}: {}", input.display(), e);
                summary.item_errors += 1;
            }
            // La representación se libera al cerrar el item, con éxito o
            // sin él: el análisis retiene memoria del motor.
            drop(programs);
            progress.advance();
        }

        info!("*** BATCH DECOMPILE DONE: {} discovered, {} imported, {} from cache, {} import errors, \
               {} decompiled, {} skipped, {} item errors, {} functions written ({} degraded, {} failed)",
              summary.discovered, summary.imported, summary.cache_hits, summary.import_errors,
              summary.items_decompiled, summary.items_skipped, summary.item_errors,
              summary.functions_written, summary.functions_degraded, summary.functions_failed);
        Ok(summary)
    }

    /// Fase 2 de un item: chequeo de salto, reset del centinela, análisis
    /// y decompilación. Cualquier `Err` lo captura el llamador.
    fn process_item(&self,
                    cache: &ImportCache,
                    params: &RunParameters,
                    input: &std::path::Path,
                    programs: &mut Vec<Program>,
                    summary: &mut RunSummary)
                    -> Result<(), PipelineError> {
        let out_path = paths::output_path(input);

        // Atajo de reanudación: la mera existencia del documento (aun
        // vacío) marca que una corrida previa ya intentó este item.
        if params.reuse_outputs && out_path.exists() {
            info!("Skipping {} (already decompiled)", input.display());
            summary.items_skipped += 1;
            return Ok(());
        }

        decompile::reset_output(&out_path)?;

        info!("ANALYZING {}...", input.display());
        analyze::analyze_item(cache, self.analyzer, input, programs)?;

        let outcome = decompile::decompile_item(self.decompiler, input, programs, &out_path)?;
        summary.items_decompiled += 1;
        summary.functions_written += outcome.written;
        summary.functions_degraded += outcome.degraded;
        summary.functions_failed += outcome.failed;
        Ok(())
    }
}
