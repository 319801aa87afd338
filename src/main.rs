//! Mineport binary - imports every world save found in a directory.
//!
//! Usage: mineport <WORLDS_DIR> [OPTIONS]
//!
//! Options:
//!   --config <FILE>      Import configuration JSON (default: built-in defaults)
//!   --group-size <N>     Group edge length in blocks (default: 64)
//!   --exporter <PATH>    Exporter executable, tried before the configured ones
//!   --state <DIR>        Timestamp state root (default: "mineport-state")
//!   --scene <DIR>        Scene manifest output directory (default: "mineport-scenes")
//!   --staging <DIR>      Working directory root (default: <tmp>/mineport-staging)
//!   --keep-staging       Keep exporter scripts and geometry after import
//!   --verbose            Log at debug level unless RUST_LOG is set
//!
//! Output structure:
//!   <state>/<world>/group_<gx>_<gz>.json   # committed chunk timestamps
//!   <scene>/<world>.json                   # scene manifest

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mineport::core::logging;
use mineport::core::Result;
use mineport::export::MinewaysExporter;
use mineport::import::{ImportConfig, ImportReport, ImportSession, LogProgress};
use mineport::scene::ManifestScene;
use mineport::timestamps::JsonTimestampDir;
use mineport::world::{discover_worlds, world_name, ChunkDumpReader};

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verbose") {
        logging::init_with_default("debug");
    } else {
        logging::init();
    }

    let Some(worlds_dir) = args.get(1).filter(|a| !a.starts_with("--")).map(PathBuf::from) else {
        eprintln!("Usage: mineport <WORLDS_DIR> [OPTIONS]");
        return ExitCode::FAILURE;
    };

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let state_root = parse_str_arg(&args, "--state").map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mineport-state"));
    let scene_root = parse_str_arg(&args, "--scene").map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mineport-scenes"));

    let worlds = match discover_worlds(&worlds_dir) {
        Ok(worlds) => worlds,
        Err(e) => {
            log::error!("Cannot read {}: {}", worlds_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };
    if worlds.is_empty() {
        log::warn!("No worlds found in {}", worlds_dir.display());
        return ExitCode::SUCCESS;
    }

    log::info!("Found {} worlds in {}", worlds.len(), worlds_dir.display());

    let mut failed = 0;
    for world in &worlds {
        match import_world(world, &config, &state_root, &scene_root).await {
            Ok(report) => println!("{}: {}", world_name(world), report),
            Err(e) => {
                log::error!("Import of {} failed: {}", world.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn import_world(
    world: &Path,
    config: &ImportConfig,
    state_root: &Path,
    scene_root: &Path,
) -> Result<ImportReport> {
    let name = world_name(world);
    log::info!("Importing world {}", name);

    let timestamps = JsonTimestampDir::new(state_root.join(&name));
    let exporter = MinewaysExporter::new(config.exporter_candidates.clone());
    let mut scene = ManifestScene::open_sync(scene_root.join(format!("{}.json", name)))?;

    let session = ImportSession::open(config.clone(), timestamps)?;
    let report = session
        .sync_world(world, &ChunkDumpReader::new(), &exporter, &mut scene, &mut LogProgress::new())
        .await?;

    log::info!("Scene written to {}", scene.path().display());

    Ok(report)
}

fn load_config(args: &[String]) -> Result<ImportConfig> {
    let mut config = match parse_str_arg(args, "--config") {
        Some(path) => ImportConfig::load_sync(Path::new(&path))?,
        None => ImportConfig::default(),
    };

    if let Some(size) = parse_i32_arg(args, "--group-size") {
        config.group_size = size;
    }
    if let Some(exe) = parse_str_arg(args, "--exporter") {
        config.exporter_candidates.insert(0, PathBuf::from(exe));
    }
    if let Some(dir) = parse_str_arg(args, "--staging") {
        config.staging_dir = PathBuf::from(dir);
    }
    if args.iter().any(|a| a == "--keep-staging") {
        config.keep_staging = true;
    }

    config.validate()?;
    Ok(config)
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
