//! Line-oriented text builder for C# source.

use super::Indent;

/// Chaining builder that tracks the indentation level of emitted lines.
///
/// ```
/// use deepclone_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::csharp()
///     .block("public class Foo", |b| b.line("public int X { get; set; }"))
///     .build();
///
/// assert_eq!(code, "public class Foo\n{\n    public int X { get; set; }\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn csharp() -> Self {
        Self::new(Indent::CSHARP)
    }

    /// Append one line at the current level.
    pub fn line(mut self, s: &str) -> Self {
        self.indent.write_to(&mut self.buffer, self.level);
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Append an empty line. Blank lines never carry indentation.
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// `header`, `{`, the indented body, `}`.
    pub fn block<F>(self, header: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.block_with_close(header, "}", f)
    }

    /// Like [`block`](Self::block) with a custom closing line such as `};`.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let body = self.line(header).line("{").indent();
        f(body).dedent().line(close)
    }

    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    pub fn build(self) -> String {
        self.buffer
    }
}
