//! Generator configuration.

/// Options for the generated client module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Python module to generate, without the `.py` extension.
    pub module_name: String,
    /// Name of the generated client class.
    pub class_name: String,
    /// Package holding the generated data types, one module per namespace.
    pub types_package: String,
    /// Dotted path of the exception raised when a route returns an error.
    pub error_class_path: String,
    /// Comma-separated auth types; only routes supporting one of them are
    /// generated. `None` generates every route.
    pub auth_type: Option<String>,
}

impl ClientConfig {
    pub const DEFAULT_ERROR_CLASS_PATH: &'static str = ".exceptions.ApiError";

    pub fn new(
        module_name: impl Into<String>,
        class_name: impl Into<String>,
        types_package: impl Into<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            class_name: class_name.into(),
            types_package: types_package.into(),
            error_class_path: Self::DEFAULT_ERROR_CLASS_PATH.to_string(),
            auth_type: None,
        }
    }

    pub fn with_error_class_path(mut self, path: impl Into<String>) -> Self {
        self.error_class_path = path.into();
        self
    }

    pub fn with_auth_type(mut self, auth_type: impl Into<String>) -> Self {
        self.auth_type = Some(auth_type.into());
        self
    }

    /// Last component of the error class path (`ApiError`).
    pub fn error_class_name(&self) -> &str {
        self.error_class_path
            .rsplit('.')
            .next()
            .unwrap_or(&self.error_class_path)
    }

    /// Parse the configured auth types, if any.
    pub fn auth_filter(&self) -> Option<AuthFilter> {
        self.auth_type.as_deref().map(AuthFilter::parse)
    }
}

/// Whitelist of auth types, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFilter {
    modes: Vec<String>,
}

impl AuthFilter {
    /// Split on commas, then trim and lowercase every token.
    ///
    /// Empty tokens are kept as empty strings.
    pub fn parse(raw: &str) -> Self {
        Self {
            modes: raw.split(',').map(|m| m.trim().to_lowercase()).collect(),
        }
    }

    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// Whether any whitelisted mode appears in `route_modes`.
    pub fn admits(&self, route_modes: &[String]) -> bool {
        self.modes.iter().any(|mode| route_modes.contains(mode))
    }
}
