//! API, namespace and route definitions.

use crate::DataType;

/// A whole API: namespaces in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Api {
    pub namespaces: Vec<Namespace>,
}

impl Api {
    /// Look up a namespace by name.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Iterate over every route of every namespace.
    pub fn routes(&self) -> impl Iterator<Item = (&Namespace, &Route)> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.routes.iter().map(move |route| (ns, route)))
    }
}

/// A group of data types and the routes that use them.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    pub name: String,
    pub doc: Option<String>,
    /// User-defined types (`Struct` or `Union`) declared here.
    pub data_types: Vec<DataType>,
    /// Routes in declaration order; `(name, version)` pairs are unique.
    pub routes: Vec<Route>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One remote operation.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    /// Always at least 1.
    pub version: u32,
    pub arg: DataType,
    pub result: DataType,
    pub error: DataType,
    pub doc: Option<String>,
    pub attrs: RouteAttrs,
    pub deprecated: Option<Deprecation>,
}

impl Route {
    /// Create a version 1 route with `Void` argument, result and error.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            arg: DataType::Void,
            result: DataType::Void,
            error: DataType::Void,
            doc: None,
            attrs: RouteAttrs::default(),
            deprecated: None,
        }
    }
}

/// Route metadata, parsed once when the API is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteAttrs {
    pub style: RouteStyle,
    /// Lowercased, trimmed auth modes; `None` when the route declares none.
    pub auth: Option<Vec<String>>,
}

impl RouteAttrs {
    /// Split a comma-separated auth attribute into normalized modes.
    ///
    /// Tokens are trimmed and lowercased; empty tokens are kept.
    pub fn parse_auth(raw: &str) -> Vec<String> {
        raw.split(',').map(|mode| mode.trim().to_lowercase()).collect()
    }
}

/// How a route transfers its payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteStyle {
    /// Argument and result both travel as structured data.
    #[default]
    Rpc,
    /// The request carries a binary body next to the argument.
    Upload,
    /// The response carries a binary body next to the result.
    Download,
    /// A style no generator knows about; treated like `Rpc`.
    Other(String),
}

impl RouteStyle {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "rpc" => RouteStyle::Rpc,
            "upload" => RouteStyle::Upload,
            "download" => RouteStyle::Download,
            other => RouteStyle::Other(other.to_string()),
        }
    }
}

/// Marks a route as deprecated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deprecation {
    /// The route superseding this one, if any.
    pub by: Option<RouteRef>,
}

/// A reference to a route of the same namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRef {
    pub name: String,
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_style_parse() {
        assert_eq!(RouteStyle::parse("rpc"), RouteStyle::Rpc);
        assert_eq!(RouteStyle::parse("upload"), RouteStyle::Upload);
        assert_eq!(RouteStyle::parse("download"), RouteStyle::Download);
        assert_eq!(
            RouteStyle::parse("stream"),
            RouteStyle::Other("stream".into())
        );
    }

    #[test]
    fn test_parse_auth_normalizes() {
        assert_eq!(RouteAttrs::parse_auth("User, App"), ["user", "app"]);
        assert_eq!(RouteAttrs::parse_auth("team,"), ["team", ""]);
    }

    #[test]
    fn test_api_routes_iterates_in_order() {
        let mut files = Namespace::new("files");
        files.routes = vec![Route::new("download"), Route::new("upload")];
        let mut users = Namespace::new("users");
        users.routes = vec![Route::new("get_account")];
        let api = Api {
            namespaces: vec![files, users],
        };

        let names: Vec<_> = api
            .routes()
            .map(|(ns, route)| format!("{}/{}", ns.name, route.name))
            .collect();
        assert_eq!(names, ["files/download", "files/upload", "users/get_account"]);
        assert!(api.namespace("users").is_some());
        assert!(api.namespace("sharing").is_none());
    }
}
