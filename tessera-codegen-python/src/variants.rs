//! Which methods a route turns into.

use tessera_ir::{Route, RouteStyle};

use crate::AuthFilter;

/// A method form of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Returns the response as is.
    Standard,
    /// Saves the binary response body to a local path.
    DownloadToFile,
}

impl Variant {
    /// Appended to the route name in the method name.
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::Standard => "",
            Variant::DownloadToFile => "_to_file",
        }
    }
}

/// The methods to generate for `route`, in emission order.
///
/// Without a filter every route is generated. With one, a route is
/// generated once if any of its auth modes is whitelisted and skipped if it
/// declares none. Download routes get an extra [`Variant::DownloadToFile`].
pub fn route_variants(route: &Route, filter: Option<&AuthFilter>) -> Vec<Variant> {
    if let Some(filter) = filter {
        let admitted = route
            .attrs
            .auth
            .as_deref()
            .is_some_and(|modes| filter.admits(modes));
        if !admitted {
            return Vec::new();
        }
    }

    match route.attrs.style {
        RouteStyle::Download => vec![Variant::Standard, Variant::DownloadToFile],
        _ => vec![Variant::Standard],
    }
}
