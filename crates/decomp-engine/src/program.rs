//! Modelo neutral de programa.
//!
//! Un `Program` es la representación estructurada que el importer produce a
//! partir de los bytes crudos de un object file. El pipeline lo posee
//! exclusivamente mientras procesa un item y lo libera al cerrarlo. Se
//! serializa como JSON para el artifact de cache en disco; el motor externo
//! puede colgar lo que necesite de `engine_data` sin que la orquestación lo
//! interprete.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EngineError;

/// Una función del programa. `external` marca funciones importadas sin
/// cuerpo, que no se pueden decompilar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub address: u64,
    pub external: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, address: u64) -> Self {
        Self { name: name.into(),
               address,
               external: false }
    }

    pub fn external(name: impl Into<String>, address: u64) -> Self {
        Self { name: name.into(),
               address,
               external: true }
    }
}

/// Representación estructurada de un binario importado.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    /// Tabla de funciones en el orden natural del motor.
    pub functions: Vec<Function>,
    /// true una vez que un análisis corrió y fue commiteado.
    pub analyzed: bool,
    /// Estado opaco del backend (no lo interpreta la orquestación).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_data: Option<Value>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               functions: Vec::new(),
               analyzed: false,
               engine_data: None }
    }

    /// Funciones con cuerpo (no externas), en orden de tabla.
    pub fn internal_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(|f| !f.external)
    }

    /// Ejecuta `f` dentro de un scope transaccional: si `f` falla, el
    /// programa se restaura al estado previo (rollback); si retorna Ok,
    /// la mutación queda commiteada.
    pub fn transaction<F>(&mut self, f: F) -> Result<(), EngineError>
        where F: FnOnce(&mut Program) -> Result<(), EngineError>
    {
        let snapshot = self.clone();
        match f(self) {
            Ok(()) => Ok(()),
            Err(e) => {
                *self = snapshot;
                Err(e)
            }
        }
    }
}
