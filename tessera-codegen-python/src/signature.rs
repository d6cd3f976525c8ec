//! Method signatures for route methods.

use std::fmt;

use tessera_codegen::builder::MultilineList;
use tessera_ir::{DataType, Namespace, Route};

use crate::{
    Error, Result,
    naming::{route_method_name, var_name},
    value::render_value,
};

/// A single parameter, optionally with a default expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub default: Option<String>,
}

impl Param {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={}", self.name, default),
            None => f.write_str(&self.name),
        }
    }
}

/// Name and ordered parameters of a route method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Param>,
}

impl MethodSignature {
    /// The `def` line, ready to be pushed onto a builder.
    pub fn to_list(&self) -> MultilineList {
        MultilineList::new(self.params.iter().map(Param::to_string))
            .before(format!("def {}", self.name))
            .after(":")
    }
}

/// Build the signature of a route method.
///
/// Parameters are the receiver, then `extra_args`, then `f` when the request
/// carries a binary body, then one parameter per argument field. A nullable
/// field defaults to `None`; otherwise a field with a default gets it;
/// anything else is required.
pub fn build_signature(
    namespace: &Namespace,
    route: &Route,
    request_binary_body: bool,
    extra_args: &[&str],
    suffix: &str,
) -> Result<MethodSignature> {
    let mut params = vec![Param::required("self")];
    params.extend(extra_args.iter().map(|arg| Param::required(*arg)));
    if request_binary_body {
        params.push(Param::required("f"));
    }

    match &route.arg {
        DataType::Void => {}
        DataType::Struct(s) => {
            for field in s.all_fields() {
                let name = var_name(&field.name);
                let param = if field.data_type.is_nullable() {
                    Param::with_default(name, "None")
                } else if let Some(default) = &field.default {
                    Param::with_default(name, render_value(default))
                } else {
                    Param::required(name)
                };
                params.push(param);
            }
        }
        DataType::Union(_) => params.push(Param::required("arg")),
        other => return Err(Error::unsupported_arg(&namespace.name, &route.name, other)),
    }

    Ok(MethodSignature {
        name: route_method_name(&namespace.name, &route.name, route.version, suffix),
        params,
    })
}
