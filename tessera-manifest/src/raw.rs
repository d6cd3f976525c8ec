//! Serde model of the API description file.

use serde::Deserialize;

/// Root of an API description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawApi {
    #[serde(default)]
    pub namespaces: Vec<RawNamespace>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawNamespace {
    pub name: String,
    pub doc: Option<String>,
    #[serde(default)]
    pub structs: Vec<RawStruct>,
    #[serde(default)]
    pub unions: Vec<RawUnion>,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawStruct {
    pub name: String,
    pub doc: Option<String>,
    /// Parent struct, `Name` or `namespace.Name`.
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawUnion {
    pub name: String,
    pub doc: Option<String>,
    #[serde(default)]
    pub variants: Vec<RawField>,
}

/// A struct field or union variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawField {
    pub name: String,
    /// Type expression; union variants default to `Void`.
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub doc: Option<String>,
    pub default: Option<toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawRoute {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: i64,
    pub arg: Option<String>,
    pub result: Option<String>,
    pub error: Option<String>,
    pub doc: Option<String>,
    #[serde(default)]
    pub attrs: RawAttrs,
    pub deprecated: Option<RawDeprecated>,
}

fn default_version() -> i64 {
    1
}

/// Route attributes. Keys other than `style` and `auth` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawAttrs {
    pub style: Option<String>,
    pub auth: Option<String>,
}

/// `deprecated = true` or `deprecated = { by = "name:version" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawDeprecated {
    Flag(bool),
    By { by: String },
}
