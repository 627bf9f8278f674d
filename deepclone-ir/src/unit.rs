use std::path::{Path, PathBuf};

use deepclone_core::GeneratedFile;
use serde::Serialize;

/// Suffix appended to a type name to form its hint identifier.
pub const HINT_SUFFIX: &str = ".g";

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GeneratedUnit {
    /// Registration key, e.g. `Person.g`.
    pub hint: String,
    pub source: String,
}

impl GeneratedUnit {
    pub fn new(hint: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            source: source.into(),
        }
    }

    /// Hint identifier for a type's unit.
    pub fn hint_for(type_name: &str) -> String {
        format!("{}{}", type_name, HINT_SUFFIX)
    }

    /// File name the unit is written under.
    pub fn file_name(&self) -> String {
        format!("{}.cs", self.hint)
    }
}

impl GeneratedFile for GeneratedUnit {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn render(&self) -> String {
        self.source.clone()
    }
}
