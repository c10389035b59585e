//! cvsift — extract candidate profiles from résumé files.

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use cvsift_core::EngineConfig;
use cvsift_extract::Engine;

const CONFIG_FILE: &str = "cvsift.json";

fn print_help() {
    println!("cvsift — résumé information extraction");
    println!();
    println!("Usage: cvsift [--config <path>] <file>...");
    println!("       cvsift [--config <path>] text <file>");
    println!();
    println!("Commands:");
    println!("  <file>...                Print one JSON profile per file, one per line");
    println!("  text <file>              Print the text acquired from a file");
    println!("  help                     Show this help message");
    println!();
    println!("Options:");
    println!("  --config <path>          Engine configuration (default: ./{})", CONFIG_FILE);
    println!();
    println!("Environment:");
    println!("  RUST_LOG, TESSERACT_CMD, PDFTOPPM_CMD, ANTIWORD_CMD,");
    println!("  CVSIFT_EMBEDDING_MODEL_DIR, CVSIFT_NER_MODEL_DIR, CVSIFT_LEXICON");
}

fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default = PathBuf::from(CONFIG_FILE);
        default.exists().then_some(default)
    })
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut config_path = None;
    let mut files: Vec<PathBuf> = Vec::new();
    let mut text_only = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--config needs a path. Use 'cvsift help' for usage.");
                    std::process::exit(1);
                }
            },
            "text" if files.is_empty() && !text_only => text_only = true,
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}. Use 'cvsift help' for usage.", other);
                std::process::exit(1);
            }
            _ => files.push(PathBuf::from(&arg)),
        }
    }

    if files.is_empty() || (text_only && files.len() != 1) {
        print_help();
        std::process::exit(1);
    }

    let config_path = resolve_config_path(config_path);
    let config = EngineConfig::load(config_path.as_deref());
    if let Some(path) = &config_path {
        info!("Configuration: {}", path.display());
    }

    let engine =
        Engine::new(&config).map_err(|e| anyhow::anyhow!("Failed to build engine: {}", e))?;

    if text_only {
        print!("{}", engine.acquire_text(&files[0]));
        return Ok(());
    }

    for file in &files {
        print_profile(&engine, file)?;
    }
    Ok(())
}

fn print_profile(engine: &Engine, path: &Path) -> anyhow::Result<()> {
    let profile = engine.extract_profile(path);
    println!("{}", serde_json::to_string(&profile)?);
    Ok(())
}
