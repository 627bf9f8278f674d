use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk.
    ///
    /// Generated files are always regenerated, but a file whose content
    /// already matches is left untouched so its modification time survives.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let content = self.render();

        if let Ok(existing) = std::fs::read_to_string(&path)
            && existing == content
        {
            return Ok(WriteResult::Unchanged);
        }

        write_file(&path, &content)?;
        Ok(WriteResult::Written)
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content
    Unchanged,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Fixed(&'static str);

    impl GeneratedFile for Fixed {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("out").join("Fixed.g.cs")
        }

        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_generated_file_written_then_unchanged() {
        let temp = TempDir::new().unwrap();
        let file = Fixed("class A {}");

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Unchanged);

        let path = file.path(temp.path());
        assert_eq!(fs::read_to_string(path).unwrap(), "class A {}");
    }

    #[test]
    fn test_generated_file_rewrites_stale_content() {
        let temp = TempDir::new().unwrap();
        let file = Fixed("new");
        let path = file.path(temp.path());
        write_file(&path, "old").unwrap();

        assert_eq!(file.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }
}
