//! Mapeo determinista de rutas: input -> (artifact de cache, documento de
//! salida).
//!
//! Funciones puras de `(root, cache_root, input)`. El contrato: mismas
//! entradas, mismas salidas, y dos inputs distintos nunca colisionan en la
//! misma ruta de cache o de salida (el espejo preserva la jerarquía de
//! directorios completa y los sufijos se agregan, no se recortan).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::constants::{CACHE_SUBTREE, CACHE_SUFFIX, OUTPUT_EXTENSION};
use crate::errors::PipelineError;

/// Ruta del artifact de cache para `input`:
/// `<cache_root>/filetree/<ruta relativa a root>/<nombre>.cache`.
///
/// Falla con `Mapping` si `input` no está debajo de `root` (no hay offset
/// relativo bien formado que espejar).
pub fn cache_path(root: &Path, cache_root: &Path, input: &Path) -> Result<PathBuf, PipelineError> {
    let rel = input.strip_prefix(root).map_err(|_| PipelineError::Mapping { path: input.to_path_buf(),
                                                                            root: root.to_path_buf() })?;
    let file_name = rel.file_name().ok_or_else(|| PipelineError::Mapping { path: input.to_path_buf(),
                                                                           root: root.to_path_buf() })?;

    let mut cached_name = OsString::from(file_name);
    cached_name.push(CACHE_SUFFIX);

    let mut mapped = cache_root.join(CACHE_SUBTREE);
    if let Some(parent) = rel.parent() {
        mapped.push(parent);
    }
    mapped.push(cached_name);
    Ok(mapped)
}

/// Documento de salida para `input`: mismo directorio, extensión
/// reemplazada (`foo.o` -> `foo.c`).
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}
