//! Generation errors.
//!
//! Every variant means the input violates a contract the generator relies
//! on; generation stops at the first one and produces no output.

use thiserror::Error;
use tessera_ir::DataType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown doc reference tag '{tag}' (value '{value}')")]
    UnknownDocTag { tag: String, value: String },

    #[error("invalid route reference '{value}' in doc text: version must be a positive integer")]
    InvalidRouteReference { value: String },

    #[error("invalid link '{value}' in doc text: expected '<anchor text> <url>'")]
    InvalidLink { value: String },

    #[error(
        "route '{namespace}/{route}' takes {kind} as argument; only Void, structs and unions are supported"
    )]
    UnsupportedArgType {
        namespace: String,
        route: String,
        kind: &'static str,
    },

    #[error("routes '{first}' and '{second}' in namespace '{namespace}' both map to '{function}'")]
    RouteNameConflict {
        namespace: String,
        first: String,
        second: String,
        function: String,
    },
}

impl Error {
    pub(crate) fn unsupported_arg(namespace: &str, route: &str, arg: &DataType) -> Self {
        Error::UnsupportedArgType {
            namespace: namespace.to_string(),
            route: route.to_string(),
            kind: kind_name(arg),
        }
    }
}

fn kind_name(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Void => "Void",
        DataType::Primitive(_) => "a primitive",
        DataType::Struct(_) => "a struct",
        DataType::Union(_) => "a union",
        DataType::List(_) => "a list",
        DataType::Map(..) => "a map",
        DataType::Nullable(_) => "a nullable type",
    }
}
