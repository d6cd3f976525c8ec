//! Delimited lists that span several lines.

use super::CodeBuilder;

/// A list of items emitted between parentheses, e.g. call arguments or a
/// function signature.
///
/// With zero or one item the list fits on a single line. Otherwise:
///
/// - compact: the first item follows the opening parenthesis and the rest are
///   aligned under it;
/// - expanded: the opening parenthesis ends the first line, each item sits on
///   its own line one indent deeper, and the closing parenthesis gets a line
///   of its own.
///
/// # Example
///
/// ```
/// use tessera_codegen::builder::{CodeBuilder, MultilineList};
///
/// let mut builder = CodeBuilder::python();
/// builder.push_list(
///     &MultilineList::new(["self", "path"])
///         .before("def files_delete")
///         .after(":"),
/// );
/// assert_eq!(builder.build(), "def files_delete(self,\n                 path):\n");
/// ```
#[derive(Debug, Clone)]
pub struct MultilineList {
    items: Vec<String>,
    before: String,
    after: String,
    compact: bool,
}

impl MultilineList {
    /// Create a compact, parenthesised, comma-separated list.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            before: String::new(),
            after: String::new(),
            compact: true,
        }
    }

    /// Text preceding the opening parenthesis.
    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = before.into();
        self
    }

    /// Text following the closing parenthesis.
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = after.into();
        self
    }

    /// Put every item on its own line, each followed by a comma.
    pub fn expanded(mut self) -> Self {
        self.compact = false;
        self
    }

    pub(crate) fn emit_to(&self, b: &mut CodeBuilder) {
        let Self {
            items,
            before,
            after,
            ..
        } = self;

        match items.as_slice() {
            [] => {
                b.push_line(&format!("{before}(){after}"));
            }
            [only] => {
                b.push_line(&format!("{before}({only}){after}"));
            }
            [first, rest @ ..] if self.compact => {
                b.push_line(&format!("{before}({first},"));
                b.hanging(before.chars().count() + 1, |b| {
                    for (i, item) in rest.iter().enumerate() {
                        if i + 1 == rest.len() {
                            b.push_line(&format!("{item}){after}"));
                        } else {
                            b.push_line(&format!("{item},"));
                        }
                    }
                });
            }
            _ => {
                b.push_line(&format!("{before}("));
                b.indented(|b| {
                    for item in items {
                        b.push_line(&format!("{item},"));
                    }
                });
                b.push_line(&format!("){after}"));
            }
        }
    }
}
