//! Loading of Tessera API descriptions.
//!
//! An API description is a TOML file listing namespaces with their structs,
//! unions and routes. Loading it parses the file, resolves every type
//! reference and validates the result, producing a [`tessera_ir::Api`].
//! Problems are reported as [`miette`] diagnostics pointing into the file.
//!
//! ```ignore
//! let api = tessera_manifest::ApiFile::open("api.toml")?.into_api();
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod lower;
mod raw;
mod type_expr;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use file::{ApiFile, parse_api};
pub use type_expr::TypeExpr;
pub use validate::ParseContext;
