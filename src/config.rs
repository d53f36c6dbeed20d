//! The server's `webconfig.json`: typed access to the convention paths.
//!
//! A file-convention server keeps its layout in one JSON file at the
//! server root. [`Webconfig`] deserializes it with the documented
//! defaults filled in, so a minimal (or empty) file is valid. Unlike the
//! variation loaders, webconfig loading returns a `Result` — whether a
//! broken webconfig is fatal is the binary's decision, not this crate's.

use std::path::Path;

use serde::Deserialize;

use crate::error::VariataError;

/// Default file name looked up under the server path.
pub const WEBCONFIG_FILE: &str = "webconfig.json";

/// Layout and variation settings read from `webconfig.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Webconfig {
    /// Directory of variation files, relative to the server path.
    pub variations_relative_path: String,
    /// Directory of view templates, relative to the server path.
    pub views_relative_path: String,
    /// Directory of controllers, relative to the server path.
    pub controllers_relative_path: String,
    /// File name of the site-wide common variation, if any.
    pub variation: Option<String>,
}

impl Default for Webconfig {
    fn default() -> Self {
        Self {
            variations_relative_path: "variations".to_string(),
            views_relative_path: "views".to_string(),
            controllers_relative_path: "controllers".to_string(),
            variation: None,
        }
    }
}

impl Webconfig {
    /// Read and parse `<server_path>/webconfig.json`.
    pub fn open(server_path: &Path) -> Result<Self, VariataError> {
        Self::open_named(server_path, WEBCONFIG_FILE)
    }

    /// Read and parse a webconfig under a non-default file name.
    pub fn open_named(server_path: &Path, file_name: &str) -> Result<Self, VariataError> {
        let path = server_path.join(file_name);
        let text = std::fs::read_to_string(&path).map_err(|source| VariataError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| VariataError::Syntax { path, source })
    }
}
