//! Code generation building blocks.
//!
//! This module provides the primitives generators write through:
//! - [`CodeBuilder`] - Line emitter with a scoped indentation stack and word wrapping
//! - [`MultilineList`] - Delimited lists that spill over several lines
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;
mod list;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use list::MultilineList;
