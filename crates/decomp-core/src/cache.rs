//! Cache de imports en jerarquía espejo.
//!
//! Un artifact de cache es la serialización JSON de exactamente un
//! `Program`, direccionado por la ruta espejada del input (ver `paths`).
//! Imports que producen cero o varios programas nunca se cachean: esos
//! inputs se re-importan en toda corrida futura, con o sin reuso.

use std::fs;
use std::path::{Path, PathBuf};

use decomp_engine::{Importer, Program};
use log::{info, warn};

use crate::errors::PipelineError;
use crate::paths;

/// Resultado de resolver un input: los programas y de dónde salieron.
pub struct Resolved {
    pub programs: Vec<Program>,
    pub from_cache: bool,
}

pub struct ImportCache {
    root: PathBuf,
    cache_root: PathBuf,
}

impl ImportCache {
    pub fn new(root: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(),
               cache_root: cache_root.into() }
    }

    /// Ruta espejada del artifact de cache para `input`.
    pub fn cache_path(&self, input: &Path) -> Result<PathBuf, PipelineError> {
        paths::cache_path(&self.root, &self.cache_root, input)
    }

    /// Devuelve los programas de `input`: hit de cache si `reuse_imports`
    /// está activo y el artifact existe, import fresco en caso contrario.
    ///
    /// Tras un import fresco que produce exactamente un programa, intenta
    /// persistirlo (pisando cualquier artifact viejo); una falla de
    /// escritura degrada a "sin cache" con un warning, no falla el item.
    pub fn resolve(&self,
                   importer: &dyn Importer,
                   input: &Path,
                   reuse_imports: bool)
                   -> Result<Resolved, PipelineError> {
        let cache_path = self.cache_path(input)?;

        if reuse_imports && cache_path.is_file() {
            info!("Loading serialized import for {}", input.display());
            let text = fs::read_to_string(&cache_path)?;
            let program: Program = serde_json::from_str(&text)?;
            return Ok(Resolved { programs: vec![program],
                                 from_cache: true });
        }

        let raw = fs::read(input)?;
        let programs = importer.import(&raw).map_err(|e| PipelineError::Import { path: input.to_path_buf(),
                                                                                 source: e })?;

        if programs.len() == 1 {
            if let Err(e) = self.persist(&cache_path, &programs[0]) {
                warn!("Could not cache import of {}: {} (proceeding uncached)", input.display(), e);
            }
        } else {
            // Con 0 o n>1 programas no hay correspondencia 1:1 con un
            // artifact; este input se re-importará siempre.
            warn!("{} programs found at one location: {}", programs.len(), input.display());
        }

        Ok(Resolved { programs,
                      from_cache: false })
    }

    /// Persiste `program` en `cache_path`, creando los directorios
    /// espejados on demand (creación idempotente: un directorio ya
    /// existente no es error) y borrando cualquier artifact viejo antes
    /// de escribir.
    pub fn persist(&self, cache_path: &Path, program: &Program) -> Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(program).map_err(|e| PipelineError::CacheWrite { path: cache_path.to_path_buf(),
                                                                                                 detail: e.to_string() })?;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = cache_path.parent() {
                fs::create_dir_all(parent)?;
            }
            if cache_path.exists() {
                fs::remove_file(cache_path)?;
            }
            fs::write(cache_path, &json)
        };
        write().map_err(|e| PipelineError::CacheWrite { path: cache_path.to_path_buf(),
                                                        detail: e.to_string() })
    }
}
