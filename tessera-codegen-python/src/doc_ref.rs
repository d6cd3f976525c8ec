//! Cross-reference markers in doc prose.
//!
//! API docs reference other definitions inline with markers such as
//! ``:type:`Metadata` `` or ``:route:`download:2` ``. They are rewritten to
//! Sphinx roles before the prose lands in a docstring.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result, naming::route_method_name};

// `[A-z]` spans the ASCII punctuation between the two letter ranges, so
// `:my_tag:` is a marker (and an unknown tag), not plain text.
static DOC_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":(?P<tag>[A-z]*):`(?P<val>.*?)`").expect("doc tag pattern is valid")
});

/// Where doc prose is being rendered.
///
/// References without an explicit namespace resolve against `namespace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocContext<'a> {
    /// Namespace whose routes are being generated.
    pub namespace: &'a str,
    /// Package holding the generated data types.
    pub types_package: &'a str,
    /// Dotted path of the exception raised on route errors.
    pub error_class_path: &'a str,
}

/// Replace every marker in `text` with its resolved form.
pub fn process_doc(ctx: &DocContext, text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in DOC_TAG_RE.captures_iter(text) {
        let (Some(whole), Some(tag), Some(val)) = (caps.get(0), caps.name("tag"), caps.name("val"))
        else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&resolve(ctx, tag.as_str(), val.as_str())?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

/// Resolve a single marker.
pub fn resolve(ctx: &DocContext, tag: &str, value: &str) -> Result<String> {
    match tag {
        "type" => {
            if value.contains('.') {
                Ok(format!(":class:`{}.{}`", ctx.types_package, value))
            } else {
                Ok(format!(
                    ":class:`{}.{}.{}`",
                    ctx.types_package, ctx.namespace, value
                ))
            }
        }
        "route" => {
            let (name, version) = match value.split_once(':') {
                Some((name, version)) => {
                    let version = version
                        .parse::<u32>()
                        .ok()
                        .filter(|v| *v >= 1)
                        .ok_or_else(|| Error::InvalidRouteReference {
                            value: value.to_string(),
                        })?;
                    (name, version)
                }
                None => (value, 1),
            };
            let method = match name.rsplit_once('.') {
                Some((namespace, route)) => route_method_name(namespace, route, version, ""),
                None => route_method_name(ctx.namespace, name, version, ""),
            };
            Ok(format!(":meth:`{}`", method))
        }
        "link" => {
            let (anchor, link) = value.rsplit_once(' ').ok_or_else(|| Error::InvalidLink {
                value: value.to_string(),
            })?;
            Ok(format!("`{} <{}>`_", anchor, link))
        }
        "val" => Ok(match value {
            "null" => "None".to_string(),
            "true" => "``True``".to_string(),
            "false" => "``False``".to_string(),
            other => other.to_string(),
        }),
        "field" => Ok(format!("``{}``", value)),
        _ => Err(Error::UnknownDocTag {
            tag: tag.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: DocContext<'static> = DocContext {
        namespace: "files",
        types_package: "dropbox",
        error_class_path: ".exceptions.ApiError",
    };

    #[test]
    fn test_type_is_qualified_with_current_namespace() {
        assert_eq!(
            resolve(&CTX, "type", "Metadata").unwrap(),
            ":class:`dropbox.files.Metadata`"
        );
        assert_eq!(
            resolve(&CTX, "type", "Metadata").unwrap(),
            resolve(&CTX, "type", "files.Metadata").unwrap()
        );
        assert_eq!(
            resolve(&CTX, "type", "sharing.SharedLink").unwrap(),
            ":class:`dropbox.sharing.SharedLink`"
        );
    }

    #[test]
    fn test_route_matches_method_names() {
        assert_eq!(
            resolve(&CTX, "route", "get_metadata").unwrap(),
            ":meth:`files_get_metadata`"
        );
        assert_eq!(
            resolve(&CTX, "route", "list_folder:2").unwrap(),
            ":meth:`files_list_folder_v2`"
        );
        assert_eq!(
            resolve(&CTX, "route", "sharing.get_shared_link:2").unwrap(),
            ":meth:`sharing_get_shared_link_v2`"
        );
    }

    #[test]
    fn test_route_with_bad_version() {
        assert!(matches!(
            resolve(&CTX, "route", "list_folder:two"),
            Err(Error::InvalidRouteReference { .. })
        ));
        assert!(matches!(
            resolve(&CTX, "route", "list_folder:0"),
            Err(Error::InvalidRouteReference { .. })
        ));
    }

    #[test]
    fn test_link_splits_on_last_space() {
        assert_eq!(
            resolve(&CTX, "link", "Docs http://example.com").unwrap(),
            "`Docs <http://example.com>`_"
        );
        assert_eq!(
            resolve(&CTX, "link", "the developer guide https://example.com/guide").unwrap(),
            "`the developer guide <https://example.com/guide>`_"
        );
        assert!(matches!(
            resolve(&CTX, "link", "https://example.com"),
            Err(Error::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_val() {
        assert_eq!(resolve(&CTX, "val", "null").unwrap(), "None");
        assert_eq!(resolve(&CTX, "val", "true").unwrap(), "``True``");
        assert_eq!(resolve(&CTX, "val", "false").unwrap(), "``False``");
        assert_eq!(resolve(&CTX, "val", "42").unwrap(), "42");
    }

    #[test]
    fn test_field() {
        assert_eq!(resolve(&CTX, "field", "path").unwrap(), "``path``");
    }

    #[test]
    fn test_unknown_tag() {
        let err = resolve(&CTX, "struct", "Metadata").unwrap_err();
        assert!(matches!(err, Error::UnknownDocTag { ref tag, .. } if tag == "struct"));
    }

    #[test]
    fn test_process_doc_replaces_every_marker() {
        let doc = "Returns :type:`Metadata` for :field:`path`, or :val:`null`. See :route:`list_folder`.";
        assert_eq!(
            process_doc(&CTX, doc).unwrap(),
            "Returns :class:`dropbox.files.Metadata` for ``path``, or None. See :meth:`files_list_folder`."
        );
    }

    #[test]
    fn test_process_doc_without_markers() {
        assert_eq!(
            process_doc(&CTX, "Plain text with `backticks`.").unwrap(),
            "Plain text with `backticks`."
        );
    }

    #[test]
    fn test_process_doc_propagates_errors() {
        assert!(process_doc(&CTX, "See :bogus:`x`.").is_err());
    }

    #[test]
    fn test_underscore_tag_is_a_marker() {
        let err = process_doc(&CTX, "See :my_tag:`x`.").unwrap_err();
        assert!(matches!(err, Error::UnknownDocTag { ref tag, .. } if tag == "my_tag"));
    }
}
