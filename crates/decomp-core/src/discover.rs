//! Enumeración recursiva de los inputs bajo la raíz de escaneo.
//!
//! La lista se materializa completa (y ordenada) antes de que empiece la
//! fase 1: procesar mientras todavía se recorre el árbol no es confiable
//! si el directorio muta durante el streaming.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::OBJECT_SUFFIX;
use crate::errors::PipelineError;

/// Todos los archivos regulares bajo `root` (profundidad ilimitada) cuyo
/// nombre termina en [`OBJECT_SUFFIX`]. Falla con `Discovery` si la raíz
/// no existe, no es un directorio o algún subdirectorio no es legible.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    if !root.is_dir() {
        return Err(PipelineError::Discovery { root: root.to_path_buf(),
                                              detail: "not an existing directory".into() });
    }

    let mut inputs = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| PipelineError::Discovery { root: root.to_path_buf(),
                                                                 detail: e.to_string() })?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(OBJECT_SUFFIX) {
            inputs.push(entry.into_path());
        }
    }
    // Orden estable para que el progreso y los logs sean comparables
    // entre corridas.
    inputs.sort();
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_root_is_a_discovery_error() {
        let err = discover(Path::new("/definitely/not/a/dir")).unwrap_err();
        assert!(matches!(err, PipelineError::Discovery { .. }));
    }

    #[test]
    fn finds_only_object_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("top.o"), b"x").unwrap();
        fs::write(dir.path().join("a/mid.o"), b"x").unwrap();
        fs::write(dir.path().join("a/b/deep.o"), b"x").unwrap();
        fs::write(dir.path().join("a/readme.txt"), b"x").unwrap();
        fs::write(dir.path().join("a/not_object.c"), b"x").unwrap();

        let found = discover(dir.path()).unwrap();
        let names: Vec<String> = found.iter()
                                      .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                                      .collect();
        assert_eq!(names, vec!["deep.o", "mid.o", "top.o"]);
    }
}
