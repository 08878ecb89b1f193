use std::path::PathBuf;

use decomp_core::{RunCoordinator, RunParameters};
use decomp_engine::NullEngine;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <root> [--cache <dir>] [--reimport] [--redecompile] [-q]");
    eprintln!();
    eprintln!("  <root>          directory scanned recursively for .o files");
    eprintln!("  --cache <dir>   mirrored import cache root (default: <root>/.decomp)");
    eprintln!("  --reimport      re-import inputs even when a cache artifact exists");
    eprintln!("  --redecompile   re-decompile inputs even when an output document exists");
    eprintln!("  -q              only warnings and errors");
    std::process::exit(2);
}

fn main() {
    // Cargar .env si existe (p.ej. RUST_LOG)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("decomp-cli");

    let mut root: Option<PathBuf> = None;
    let mut cache: Option<PathBuf> = None;
    let mut reimport = false;
    let mut redecompile = false;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cache" => {
                i += 1;
                if i < args.len() {
                    cache = Some(PathBuf::from(&args[i]));
                } else {
                    usage(program);
                }
            }
            "--reimport" => reimport = true,
            "--redecompile" => redecompile = true,
            "-q" => quiet = true,
            other if other.starts_with('-') => usage(program),
            positional => {
                if root.is_some() {
                    usage(program);
                }
                root = Some(PathBuf::from(positional));
            }
        }
        i += 1;
    }

    let root = match root {
        Some(r) => r,
        None => usage(program),
    };

    let default_filter = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut params = RunParameters::new(root);
    if let Some(cache) = cache {
        params.cache_root = cache;
    }
    // Dos flags independientes (reuso de imports / reuso de salidas);
    // la CLI expone la forma "forzar rehacer" de cada uno.
    params.reuse_imports = !reimport;
    params.reuse_outputs = !redecompile;

    // Sin backend real enlazado la corrida reporta cada import como no
    // soportado; los backends se sustituyen por los trait objects.
    let engine = NullEngine;
    let coordinator = RunCoordinator::new(&engine, &engine, &engine);

    match coordinator.run(&params) {
        Ok(summary) => {
            println!("decompiled {} of {} discovered ({} skipped, {} import errors, {} item errors)",
                     summary.items_decompiled,
                     summary.discovered,
                     summary.items_skipped,
                     summary.import_errors,
                     summary.item_errors);
        }
        Err(e) => {
            // Sólo discovery llega acá; todo error por item quedó aislado
            // y logueado durante la corrida.
            eprintln!("[decomp] {e}");
            std::process::exit(3);
        }
    }
}
