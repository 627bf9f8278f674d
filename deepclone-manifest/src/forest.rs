//! The syntax forest: every declaration file of one compilation.

use std::path::{Path, PathBuf};

use crate::{Error, Result, SourceFile, TypeDecl};

/// Position of a declaration fragment in the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId {
    pub file: usize,
    pub index: usize,
}

/// An immutable snapshot of all declaration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SyntaxForest {
    files: Vec<SourceFile>,
}

impl SyntaxForest {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    /// Load declaration files from a list of files and directories.
    ///
    /// Directories contribute their `*.toml` entries (non-recursive) in
    /// sorted order so file order, and therefore member order of merged
    /// partial declarations, is stable between runs.
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut files = Vec::new();
        for path in paths {
            for file in expand_source_path(path)? {
                tracing::debug!(path = %file.display(), "loading declaration file");
                files.push(SourceFile::from_file(&file)?);
            }
        }
        Ok(Self { files })
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Iterate over every declaration fragment in file order.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &SourceFile, &TypeDecl)> {
        self.files.iter().enumerate().flat_map(|(file, source)| {
            source
                .types
                .iter()
                .enumerate()
                .map(move |(index, decl)| (DeclId { file, index }, source, decl))
        })
    }

    pub fn get(&self, id: DeclId) -> Option<(&SourceFile, &TypeDecl)> {
        let file = self.files.get(id.file)?;
        Some((file, file.types.get(id.index)?))
    }

    /// Replace one file, returning the previous snapshot of it.
    pub fn replace_file(&mut self, index: usize, file: SourceFile) -> Option<SourceFile> {
        let slot = self.files.get_mut(index)?;
        Some(std::mem::replace(slot, file))
    }

    pub fn push_file(&mut self, file: SourceFile) {
        self.files.push(file);
    }
}

fn expand_source_path(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let entries = std::fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(path, e))?;
        let entry_path = entry.path();
        if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "toml") {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}
