use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

/// One record of the REST Countries `name` endpoint. Fields not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    pub population: u64,
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
}

/// Where a single search currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Validating,
    Loading,
    Displayed,
    NotFound,
    HttpError,
    TransportError,
}
