use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use tessera_ir::Api;
use tracing::debug;

use crate::{Error, Result, lower::lower, raw::RawApi, validate::ParseContext};

/// An API description file together with the API it describes.
#[derive(Debug)]
pub struct ApiFile {
    path: PathBuf,
    content: String,
    api: Api,
}

impl ApiFile {
    /// Open and load an API description.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let api = parse_api(&content, &filename)?;

        Ok(Self {
            path,
            content,
            api,
        })
    }

    /// Load an API description from a string with a custom filename for
    /// error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        Ok(Self {
            path: PathBuf::from(filename),
            content: content.to_string(),
            api: parse_api(content, filename)?,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the loaded API.
    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn into_api(self) -> Api {
        self.api
    }
}

impl FromStr for ApiFile {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "api.toml")
    }
}

/// Parse, resolve and validate an API description.
pub fn parse_api(content: &str, filename: &str) -> Result<Api> {
    let ctx = ParseContext::new(content, filename);
    let raw: RawApi = toml::from_str(content).map_err(|e| ctx.source_context().parse_error(e))?;
    let api = lower(&raw, &ctx)?;
    debug!(
        filename,
        namespaces = api.namespaces.len(),
        routes = api.routes().count(),
        "loaded API description"
    );
    Ok(api)
}
