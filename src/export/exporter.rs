//! External geometry exporter process

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::core::{Error, Result};

/// Turns an export script into one geometry file per region
pub trait GeometryExporter {
    /// Fail with `ExporterNotFound` if the exporter cannot be run at all.
    ///
    /// Checked before anything else in a session.
    fn ensure_available(&self) -> Result<()>;

    /// Run the script to completion
    fn export(&self, script: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Runs the Mineways command line exporter in script mode
#[derive(Clone, Debug)]
pub struct MinewaysExporter {
    candidates: Vec<PathBuf>,
}

impl MinewaysExporter {
    /// Exporter found at the first existing path of `candidates`
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Path of the executable that will be run
    pub fn locate(&self) -> Result<PathBuf> {
        self.candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| Error::ExporterNotFound {
                searched: self.candidates.clone(),
            })
    }
}

impl GeometryExporter for MinewaysExporter {
    fn ensure_available(&self) -> Result<()> {
        let exe = self.locate()?;
        log::debug!("Using exporter {}", exe.display());
        Ok(())
    }

    fn export(&self, script: &Path) -> impl Future<Output = Result<()>> + Send {
        let exe = self.locate();
        let script = script.to_path_buf();

        async move {
            let exe = exe?;
            log::info!("Running {} on {}", exe.display(), script.display());

            let status = Command::new(&exe)
                .arg("-s")
                .arg("none")
                .arg(&script)
                .status()
                .await?;

            if !status.success() {
                return Err(Error::ExporterFailed { status });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_exporter() {
        let exporter = MinewaysExporter::new(vec![PathBuf::from("/nonexistent/mineways")]);
        match exporter.ensure_available() {
            Err(Error::ExporterNotFound { searched }) => {
                assert_eq!(searched, vec![PathBuf::from("/nonexistent/mineways")]);
            }
            other => panic!("expected ExporterNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let second = temp_dir.path().join("second");
        let third = temp_dir.path().join("third");
        std::fs::write(&second, b"").unwrap();
        std::fs::write(&third, b"").unwrap();

        let exporter = MinewaysExporter::new(vec![temp_dir.path().join("first"), second.clone(), third]);
        assert_eq!(exporter.locate().unwrap(), second);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_checked() {
        let ok = PathBuf::from("/bin/true");
        let failing = PathBuf::from("/bin/false");
        if !ok.is_file() || !failing.is_file() {
            return;
        }

        let script = Path::new("Script.mwscript");
        assert!(MinewaysExporter::new(vec![ok]).export(script).await.is_ok());
        assert!(matches!(
            MinewaysExporter::new(vec![failing]).export(script).await,
            Err(Error::ExporterFailed { .. })
        ));
    }
}
