//! Python client code generator for the Tessera client generator.
//!
//! This crate turns a validated [`tessera_ir::Api`] into a single Python
//! module holding an abstract client class. The class declares an abstract
//! `request()` method and one method per route; subclasses implement
//! `request()` to perform the actual HTTP call.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_codegen::language::LanguageCodegen;
//! use tessera_codegen_python::{ClientConfig, Generator};
//! use tessera_manifest::ApiFile;
//! use std::path::Path;
//!
//! let api = ApiFile::open("api.toml")?.into_api();
//! let config = ClientConfig::new("base", "DropboxBase", "dropbox");
//! let generator = Generator::new(&api, &config);
//!
//! // Preview files without writing
//! let preview = generator.preview()?;
//!
//! // Generate files to disk
//! let result = generator.generate(Path::new("output"))?;
//! ```
//!
//! # Generated Output
//!
//! - `<module_name>.py` - the client base class, importing the data types
//!   from `<types_package>`

mod config;
mod doc_ref;
mod docstring;
mod error;
mod generator;
mod method;
mod naming;
mod signature;
mod type_doc;
mod type_mapper;
mod value;
mod variants;

pub mod files;

pub use config::{AuthFilter, ClientConfig};
pub use doc_ref::{DocContext, process_doc, resolve};
pub use docstring::{DocstringSpec, ExtraParam, compose};
pub use error::{Error, Result};
pub use generator::{ClientModule, Generator};
pub use method::emit_route_method;
pub use naming::{PYTHON_NAMING, route_function_name, route_method_name};
pub use signature::{MethodSignature, Param, build_signature};
pub use tessera_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile, PreviewResult};
pub use type_doc::format_type_in_doc;
pub use type_mapper::PythonTypeMapper;
pub use value::{python_string, render_value};
pub use variants::{Variant, route_variants};
