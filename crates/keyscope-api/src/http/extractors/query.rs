//! Query parameter and body extractors for the key endpoints.

use serde::Deserialize;

/// Query parameters for the key and entry list endpoints.
///
/// `limit` is kept as text so a non-numeric value gets the envelope error
/// rather than axum's plain-text rejection.
#[derive(Debug, Deserialize, Default)]
pub struct KeysQuery {
    /// Substring to search for (wrapped as `*search*`).
    pub search: Option<String>,
    /// Maximum number of keys.
    pub limit: Option<String>,
}

impl KeysQuery {
    /// Parse `limit`. Absent or blank means "use the configured default".
    pub fn parse_limit(&self) -> Result<Option<i64>, String> {
        match self.limit.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| format!("Invalid limit '{raw}': expected an integer")),
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

/// Query parameters naming a single key.
#[derive(Debug, Deserialize, Default)]
pub struct KeyQuery {
    pub key: Option<String>,
}

impl KeyQuery {
    /// The key, or the empty string when absent (rejected by the service).
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }
}

/// Request body for setting a key.
#[derive(Debug, Deserialize, Default)]
pub struct SetRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}
