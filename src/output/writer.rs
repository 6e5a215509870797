// Mon Feb 16 2026 - Alex

use crate::output::{OutputError, SourceUnit};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes generated files into one output directory. Each file is flushed
/// and closed before the next one is opened; files written before a failure
/// stay on disk.
pub struct UnitWriter {
    dir: PathBuf,
}

impl UnitWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> Result<(), OutputError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    pub fn write_unit(&self, unit: &SourceUnit) -> Result<PathBuf, OutputError> {
        self.write_text(&unit.file_name, &unit.render())
    }

    /// Stops at the first failing unit.
    pub fn write_units(&self, units: &[SourceUnit]) -> Result<Vec<PathBuf>, OutputError> {
        self.ensure_dir()?;
        let mut written = Vec::with_capacity(units.len());
        for unit in units {
            written.push(self.write_unit(unit)?);
        }
        log::info!("Wrote {} source units to {}", written.len(), self.dir.display());
        Ok(written)
    }

    pub fn write_text(&self, file_name: &str, contents: &str) -> Result<PathBuf, OutputError> {
        let path = self.dir.join(file_name);
        write_file(&path, contents)?;
        log::debug!("wrote {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    let err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes()).map_err(err)?;
    writer.flush().map_err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(namespace: &str) -> SourceUnit {
        let mut unit = SourceUnit::new("GameSDK", namespace);
        unit.body.push_str("    public interface IFoo\n    {\n        // Stub interface\n    }\n\n");
        unit.declarations = 1;
        unit
    }

    #[test]
    fn test_write_units_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = UnitWriter::new(dir.path().join("sdk").join("nested"));
        let paths = writer.write_units(&[unit("Game"), unit("")]).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("GameSDK.Game.cs"));
        assert!(paths[1].ends_with("GameSDK.Global.cs"));
        let text = std::fs::read_to_string(&paths[1]).unwrap();
        assert!(text.contains("namespace Global\n{\n"));
    }

    #[test]
    fn test_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("sdk");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = UnitWriter::new(&blocker).write_units(&[unit("Game")]).unwrap_err();
        assert!(matches!(err, OutputError::CreateDir { .. }));
        assert_eq!(err.path(), &blocker);
    }

    #[test]
    fn test_earlier_units_survive_a_later_failure() {
        let dir = tempfile::tempdir().unwrap();
        let writer = UnitWriter::new(dir.path());
        std::fs::create_dir(dir.path().join("GameSDK.Zeta.cs")).unwrap();

        let err = writer.write_units(&[unit("Alpha"), unit("Zeta")]).unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
        assert!(dir.path().join("GameSDK.Alpha.cs").is_file());
    }
}
