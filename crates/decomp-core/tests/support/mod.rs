//! Motor guionado para los tests de integración.
//!
//! El comportamiento se scriptea en el contenido del object file falso:
//! cada línea es un programa, cada token separado por comas una función.
//! Sufijos de token: `:ext` (función externa). Nombres con sufijo `_fail`
//! hacen fallar al decompilador y `_trunc` producen un resultado
//! degradado. Una función llamada `anafail` u `oom` hace fallar el
//! análisis del programa que la contiene. Contenidos especiales:
//! `IMPORT_FAIL` (el importer falla) y `EMPTY` (cero programas).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use decomp_engine::{Analyzer, Decompiler, EngineError, Function, Importer, Program, TRUNCATION_MARKER};

#[derive(Default)]
pub struct ScriptedEngine {
    pub imports: AtomicUsize,
    pub analyses: AtomicUsize,
    pub decompiles: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import_count(&self) -> usize {
        self.imports.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn analyze_count(&self) -> usize {
        self.analyses.load(Ordering::SeqCst)
    }

    pub fn decompile_count(&self) -> usize {
        self.decompiles.load(Ordering::SeqCst)
    }
}

impl Importer for ScriptedEngine {
    fn import(&self, raw: &[u8]) -> Result<Vec<Program>, EngineError> {
        self.imports.fetch_add(1, Ordering::SeqCst);
        let text = std::str::from_utf8(raw).map_err(|e| EngineError::Import(e.to_string()))?;
        match text.trim() {
            "IMPORT_FAIL" => return Err(EngineError::Import("scripted import failure".into())),
            "EMPTY" => return Ok(Vec::new()),
            _ => {}
        }

        let mut programs = Vec::new();
        for (i, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let mut program = Program::new(format!("prog{i}"));
            for (addr, token) in line.split(',').enumerate() {
                let token = token.trim();
                let (name, flag) = token.split_once(':').unwrap_or((token, ""));
                let func = if flag == "ext" {
                    Function::external(name, addr as u64)
                } else {
                    Function::new(name, addr as u64)
                };
                program.functions.push(func);
            }
            programs.push(program);
        }
        Ok(programs)
    }
}

impl Analyzer for ScriptedEngine {
    fn analyze(&self, program: &mut Program) -> Result<(), EngineError> {
        self.analyses.fetch_add(1, Ordering::SeqCst);
        if program.functions.iter().any(|f| f.name == "oom") {
            return Err(EngineError::OutOfMemory);
        }
        if program.functions.iter().any(|f| f.name == "anafail") {
            return Err(EngineError::Analysis("scripted analysis failure".into()));
        }
        Ok(())
    }
}

impl Decompiler for ScriptedEngine {
    fn decompile(&self, function: &Function) -> Result<String, EngineError> {
        self.decompiles.fetch_add(1, Ordering::SeqCst);
        if function.name.ends_with("_fail") {
            return Err(EngineError::Decompile(format!("scripted failure for {}", function.name)));
        }
        if function.name.ends_with("_trunc") {
            return Ok(format!("void {}(void) {{ /* {} */ }}\n", function.name, TRUNCATION_MARKER));
        }
        Ok(format!("void {}(void) {{ return; }}\n", function.name))
    }
}

/// Escribe un object file falso bajo `root`, creando directorios
/// intermedios.
pub fn write_obj(root: &Path, rel: &str, script: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, script).unwrap();
    path
}
