//! Code builder utility for generating properly indented code.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use super::{Indent, MultilineList};

/// Line emitter with a scoped indentation stack.
///
/// Indentation scopes are opened with [`indented`](Self::indented) (one
/// indent unit) or [`hanging`](Self::hanging) (a fixed number of columns)
/// and are always closed when the closure returns, whatever it returns.
///
/// # Example
///
/// ```
/// use tessera_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::python();
/// builder.push_line("def main():");
/// builder.indented(|b| {
///     b.push_line("pass");
/// });
/// assert_eq!(builder.build(), "def main():\n    pass\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent: Indent,
    /// Prefixes of the open scopes, outermost first.
    scopes: Vec<String>,
    width: usize,
    buffer: String,
}

impl CodeBuilder {
    /// Column limit used by [`push_wrapped`](Self::push_wrapped) unless overridden.
    pub const DEFAULT_WIDTH: usize = 80;

    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            scopes: Vec::new(),
            width: Self::DEFAULT_WIDTH,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn python() -> Self {
        Self::new(Indent::PYTHON)
    }

    /// Set the column limit for wrapped text.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Add a line with current indentation. An empty line gets no indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self.push_blank();
        }
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Run `f` one indentation unit deeper.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let unit = self.indent.as_str().to_string();
        self.scoped(unit, f)
    }

    /// Run `f` indented by `columns` extra spaces.
    pub fn hanging<R>(&mut self, columns: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(" ".repeat(columns), f)
    }

    fn scoped<R>(&mut self, prefix: String, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scopes.push(prefix);
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Add word-wrapped text.
    ///
    /// Paragraphs are separated by blank lines in `text`; inside a paragraph
    /// line breaks are treated as spaces. Continuation lines of a paragraph
    /// get `subsequent_prefix` after the current indentation. Words are
    /// never split, so a single long word may exceed the width.
    pub fn push_wrapped(&mut self, text: &str, subsequent_prefix: &str) -> &mut Self {
        let initial = self.prefix();
        let subsequent = format!("{}{}", initial, subsequent_prefix);
        let options = Options::new(self.width)
            .initial_indent(&initial)
            .subsequent_indent(&subsequent)
            .break_words(false)
            .word_separator(WordSeparator::AsciiSpace)
            .word_splitter(WordSplitter::NoHyphenation)
            .wrap_algorithm(WrapAlgorithm::FirstFit);

        let paragraphs: Vec<String> = text
            .split("\n\n")
            .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|p| !p.is_empty())
            .collect();

        for (i, paragraph) in paragraphs.iter().enumerate() {
            if i > 0 {
                self.push_blank();
            }
            for line in textwrap::wrap(paragraph, &options) {
                self.buffer.push_str(&line);
                self.buffer.push('\n');
            }
        }
        self
    }

    /// Add a delimited list, spilling over several lines when it has more
    /// than one item.
    pub fn push_list(&mut self, list: &MultilineList) -> &mut Self {
        list.emit_to(self);
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn prefix(&self) -> String {
        self.scopes.concat()
    }

    fn write_indent(&mut self) {
        for scope in &self.scopes {
            self.buffer.push_str(scope);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::python()
    }
}
