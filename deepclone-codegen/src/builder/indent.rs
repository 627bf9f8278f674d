//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// `n` spaces per level.
    Spaces(u8),
    Tab,
}

impl Indent {
    /// 4-space indentation, the C# convention.
    pub const CSHARP: Self = Self::Spaces(4);

    /// Append `level` indentation units to `buf`.
    pub(crate) fn write_to(self, buf: &mut String, level: usize) {
        match self {
            Self::Spaces(width) => buf.extend(std::iter::repeat_n(' ', level * width as usize)),
            Self::Tab => buf.extend(std::iter::repeat_n('\t', level)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}
