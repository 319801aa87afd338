//! Session progress reporting

use std::fmt;

/// Phase of an import session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    SearchingExporter,
    AnalyzingData,
    WritingScript,
    ExportingGeometry,
    ImportingGroups,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::SearchingExporter => "Searching for exporter",
            Stage::AnalyzingData => "Analyzing data",
            Stage::WritingScript => "Writing export script",
            Stage::ExportingGeometry => "Exporting geometry",
            Stage::ImportingGroups => "Importing groups",
        };
        f.write_str(text)
    }
}

/// Observer of a running session
pub trait Progress {
    /// `fraction` is `None` while the amount of work is unknown
    fn update(&mut self, fraction: Option<f32>, stage: Stage, detail: &str);

    fn done(&mut self) {}

    fn failed(&mut self, _message: &str) {}
}

/// Reports progress through the `log` facade
#[derive(Debug, Default)]
pub struct LogProgress {
    last_stage: Option<Stage>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for LogProgress {
    fn update(&mut self, fraction: Option<f32>, stage: Stage, detail: &str) {
        if self.last_stage != Some(stage) {
            log::info!("{}", stage);
            self.last_stage = Some(stage);
        }
        match fraction {
            Some(f) => log::debug!("{} [{:.0}%] {}", stage, f * 100.0, detail),
            None => log::debug!("{} {}", stage, detail),
        }
    }

    fn done(&mut self) {
        log::info!("Import finished");
    }

    fn failed(&mut self, message: &str) {
        log::error!("Import failed: {}", message);
    }
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _fraction: Option<f32>, _stage: Stage, _detail: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::AnalyzingData.to_string(), "Analyzing data");
        assert_eq!(Stage::ImportingGroups.to_string(), "Importing groups");
    }

    #[test]
    fn test_log_progress_tracks_stage() {
        let mut progress = LogProgress::new();
        progress.update(None, Stage::SearchingExporter, "");
        progress.update(Some(0.5), Stage::ImportingGroups, "(0, 0)");
        assert_eq!(progress.last_stage, Some(Stage::ImportingGroups));
    }
}
