//! Locating world saves inside a directory

use std::path::{Path, PathBuf};

use crate::core::Result;

/// Marker file present at the root of every world save
pub const LEVEL_FILENAME: &str = "level.dat";

fn is_world(dir: &Path) -> bool {
    dir.join(LEVEL_FILENAME).is_file()
}

/// Find the worlds in `dir`.
///
/// A directory holding `level.dat` is a single world. Otherwise each direct
/// subdirectory holding one is a world, returned in path order.
pub fn discover_worlds(dir: &Path) -> Result<Vec<PathBuf>> {
    if is_world(dir) {
        return Ok(vec![dir.to_path_buf()]);
    }

    let mut worlds = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() && is_world(&path) {
            worlds.push(path);
        }
    }
    worlds.sort();

    Ok(worlds)
}

/// Display name of a world: its directory name
pub fn world_name(world: &Path) -> String {
    world
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "world".to_string())
}
