//! Constantes del pipeline.
//!
//! Los sufijos y el segmento raíz del cache forman parte del contrato de
//! rutas: cambiarlos invalida los artifacts escritos por corridas previas.

/// Sufijo de los artefactos de entrada (object files compilados).
pub const OBJECT_SUFFIX: &str = ".o";

/// Sufijo que se agrega al nombre completo del input para su artifact de
/// cache (`foo.o` -> `foo.o.cache`).
pub const CACHE_SUFFIX: &str = ".cache";

/// Extensión del documento de salida (reemplaza la del input:
/// `foo.o` -> `foo.c`).
pub const OUTPUT_EXTENSION: &str = "c";

/// Segmento fijo bajo la raíz del cache donde se espeja la jerarquía de
/// directorios de los inputs.
pub const CACHE_SUBTREE: &str = "filetree";

/// Cabecera que precede cada bloque de función en el documento de salida.
pub const FUNCTION_HEADER: &str = "// FUNCTION ";
