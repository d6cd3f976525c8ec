//! Interface representation types for the Tessera client generator.
//!
//! This crate provides the validated API model consumed by the code
//! generators: namespaces, the routes they expose and the data types those
//! routes exchange.
//!
//! # Architecture
//!
//! ```text
//! api.toml → tessera-manifest (parsing, lowering) → tessera-ir → codegen
//! ```
//!
//! The IR is read-only for the whole generation run. Every user-defined type
//! reference has already been resolved to exactly one [`Struct`] or
//! [`Union`] definition, so generators never look types up by name.

mod api;
mod types;

pub use api::{Api, Deprecation, Namespace, Route, RouteAttrs, RouteRef, RouteStyle};
pub use types::{DataType, Field, Primitive, Struct, TagRef, Union, Value};
