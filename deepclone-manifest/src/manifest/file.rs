use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Result, SyntaxForest};

/// Represents a deepclone.toml file with both raw content and parsed manifest.
pub struct ProjectFile {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl ProjectFile {
    /// Open and parse a deepclone.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory that relative paths in the manifest are resolved against.
    pub fn root(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Source paths resolved against the manifest directory.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.manifest
            .project
            .sources
            .iter()
            .map(|p| self.root().join(p))
            .collect()
    }

    /// Output directory resolved against the manifest directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root().join(&self.manifest.generator.output)
    }

    /// Load every declaration file named by `sources`.
    pub fn load_forest(&self) -> Result<SyntaxForest> {
        SyntaxForest::from_paths(&self.source_paths())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_and_load_forest() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(
            root.join("deepclone.toml"),
            "[project]\nname = \"demo\"\nsources = [\"types\"]\n",
        )
        .unwrap();
        fs::create_dir(root.join("types")).unwrap();
        fs::write(
            root.join("types/person.toml"),
            "[[types]]\nname = \"Person\"\nmodifiers = [\"partial\"]\n",
        )
        .unwrap();

        let project = ProjectFile::open(root.join("deepclone.toml")).unwrap();
        assert_eq!(project.manifest().project.name, "demo");
        assert_eq!(project.output_dir(), root.join("generated"));

        let forest = project.load_forest().unwrap();
        assert_eq!(forest.files().len(), 1);
        assert_eq!(forest.files()[0].types[0].name, "Person");
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ProjectFile::open(temp.path().join("deepclone.toml"))
            .err()
            .unwrap();
        assert!(matches!(*err, crate::Error::Io { .. }));
    }
}
