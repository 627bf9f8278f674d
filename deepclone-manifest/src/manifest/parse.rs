//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use toml::Spanned;

use super::Manifest;
use crate::{Error, Result, error::SourceContext, validate::ParseContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "deepclone.toml")
    }
}

impl Manifest {
    /// Parse a deepclone.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a deepclone.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(content, filename)?;
    Ok(manifest)
}

/// Re-read the generator section with spans so identifier errors can point at it.
fn validate_manifest(src: &str, filename: &str) -> Result<()> {
    #[derive(serde::Deserialize)]
    struct SpannedGenerator {
        marker: Option<Spanned<String>>,
        marker_namespace: Option<Spanned<String>>,
    }

    #[derive(serde::Deserialize)]
    struct SpannedManifest {
        generator: Option<SpannedGenerator>,
    }

    let ctx = ParseContext::new(src, filename);
    let spanned: SpannedManifest =
        toml::from_str(src).map_err(|e| ctx.source_context().parse_error(e))?;
    let Some(generator) = spanned.generator else {
        return Ok(());
    };

    let generator_ctx = ctx.push("generator");
    if let Some(marker) = &generator.marker {
        generator_ctx.validate_name(marker, "marker")?;
    }
    if let Some(ns) = &generator.marker_namespace {
        let segments = deepclone_core::split_path(ns.get_ref());
        if segments.is_empty() {
            return Err(ctx
                .source_context()
                .validation_error("marker namespace cannot be empty", ns.span()));
        }
        generator_ctx.validate_path(&segments, "marker namespace", ns.span())?;
    }
    Ok(())
}
