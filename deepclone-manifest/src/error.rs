use std::{ops::Range, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error at a span.
    pub fn validation_error(&self, message: impl Into<String>, span: Range<usize>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    /// Create a reserved keyword error.
    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span: span.into(),
            name: name.into(),
            context: context.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span: span.into(),
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create an unknown accessibility error.
    pub fn unknown_accessibility_error(
        &self,
        value: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::UnknownAccessibility {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
        })
    }

    /// Create an unknown modifier error.
    pub fn unknown_modifier_error(&self, modifier: impl Into<String>, span: Range<usize>) -> Box<Error> {
        Box::new(Error::UnknownModifier {
            src: self.named_source(),
            span: span.into(),
            modifier: modifier.into(),
        })
    }

    /// Create an invalid type expression error.
    pub fn invalid_type_error(
        &self,
        expr: impl Into<String>,
        reason: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span: span.into(),
            expr: expr.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate member error.
    pub fn duplicate_member_error(
        &self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        first_span: Range<usize>,
        second_span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateMember {
            src: self.named_source(),
            first_span: first_span.into(),
            second_span: second_span.into(),
            name: name.into(),
            type_name: type_name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check the path, or the `sources` list in deepclone.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML")]
    #[diagnostic(code(deepclone::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(deepclone::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a C# reserved keyword")]
    #[diagnostic(
        code(deepclone::reserved_keyword),
        help("rename the {context}, or prefix it with '@' in the C# source and drop the '@' here")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: SourceSpan,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(deepclone::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: SourceSpan,
        name: String,
        context: String,
        reason: String,
    },

    #[error("unknown accessibility '{value}'")]
    #[diagnostic(
        code(deepclone::unknown_accessibility),
        help("valid values are: public, internal, protected, protected internal")
    )]
    UnknownAccessibility {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown accessibility")]
        span: SourceSpan,
        value: String,
    },

    #[error("unknown modifier '{modifier}'")]
    #[diagnostic(
        code(deepclone::unknown_modifier),
        help("valid modifiers are: partial, static, sealed, abstract")
    )]
    UnknownModifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown modifier")]
        span: SourceSpan,
        modifier: String,
    },

    #[error("invalid type '{expr}'")]
    #[diagnostic(code(deepclone::invalid_type), help("{reason}"))]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot parse this type")]
        span: SourceSpan,
        expr: String,
        reason: String,
    },

    #[error("duplicate member '{name}' in '{type_name}'")]
    #[diagnostic(
        code(deepclone::duplicate_member),
        help("member names must be unique within one declaration")
    )]
    DuplicateMember {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        name: String,
        type_name: String,
    },
}

impl Error {
    /// Create an IO error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
