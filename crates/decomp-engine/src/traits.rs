//! Interfaces de capacidad hacia el motor externo.
//!
//! Cualquier backend que provea estas tres operaciones puede sustituirse
//! sin tocar la orquestación. Las implementaciones pueden fallar; el
//! aislamiento por item lo maneja el coordinador, no el motor.

use crate::{EngineError, Function, Program};

pub trait Importer {
    /// Importa los bytes crudos de un object file. Puede producir cero,
    /// uno o varios programas.
    fn import(&self, raw: &[u8]) -> Result<Vec<Program>, EngineError>;
}

pub trait Analyzer {
    /// Punto forzado de reclamación de memoria, invocado antes de cada
    /// análisis. El default es no-op; backends con heap propio lo
    /// sobreescriben porque el análisis es intensivo en memoria.
    fn reclaim_memory(&self) {}

    /// Analiza el programa in-place. Puede fallar, incluida la señal de
    /// memoria agotada (`EngineError::OutOfMemory`).
    fn analyze(&self, program: &mut Program) -> Result<(), EngineError>;
}

pub trait Decompiler {
    /// Decompila una función a texto pseudo-C. Un resultado que contiene
    /// [`crate::TRUNCATION_MARKER`] es degradado y debe descartarse.
    fn decompile(&self, function: &Function) -> Result<String, EngineError>;
}

/// Backend nulo: rechaza todo import. Sirve como placeholder del binario
/// cuando no hay un motor real enlazado.
#[derive(Debug, Default)]
pub struct NullEngine;

impl Importer for NullEngine {
    fn import(&self, _raw: &[u8]) -> Result<Vec<Program>, EngineError> {
        Err(EngineError::Import("no engine backend linked".into()))
    }
}

impl Analyzer for NullEngine {
    fn analyze(&self, _program: &mut Program) -> Result<(), EngineError> {
        Err(EngineError::Analysis("no engine backend linked".into()))
    }
}

impl Decompiler for NullEngine {
    fn decompile(&self, _function: &Function) -> Result<String, EngineError> {
        Err(EngineError::Decompile("no engine backend linked".into()))
    }
}
