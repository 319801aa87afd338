//! Mineways export script rendering

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::grouping::GroupBounds;

/// One selection exported to its own geometry file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionExport {
    pub bounds: GroupBounds,
    pub output: PathBuf,
}

/// Script driving a single exporter run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportScript {
    world: PathBuf,
    regions: Vec<RegionExport>,
}

impl ExportScript {
    pub fn new(world: &Path) -> Self {
        Self {
            world: world.to_path_buf(),
            regions: Vec::new(),
        }
    }

    pub fn push_region(&mut self, bounds: GroupBounds, output: PathBuf) {
        self.regions.push(RegionExport { bounds, output });
    }

    pub fn regions(&self) -> &[RegionExport] {
        &self.regions
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// No region to export; the exporter must not be run
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Render the script text. Selection maxima are inclusive.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = writeln!(out, "Minecraft world: {}", self.world.display());
        let _ = writeln!(out, "Set render type: Wavefront OBJ absolute indices");
        let _ = writeln!(out, "File type: Export tiles for textures to directory texture");
        let _ = writeln!(out, "Create block faces at the borders: no");
        let _ = writeln!(out, "Center model: YES");

        for region in &self.regions {
            let b = &region.bounds;
            let _ = writeln!(
                out,
                "Selection location min to max: {}, {}, {} to {}, {}, {}",
                b.min_x,
                b.min_y,
                b.min_z,
                b.max_x - 1,
                b.max_y,
                b.max_z - 1
            );
            let _ = writeln!(out, "Export for Rendering: {}", region.output.display());
        }

        let _ = writeln!(out, "Close");
        out
    }
}
