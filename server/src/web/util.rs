use crate::directory::enumerations::Genre;
use crate::directory::validation::genre_filter;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Query parameters of the listing endpoints
#[derive(Deserialize, Debug, Default)]
pub struct GenreFilterQuery {
    #[serde(default, deserialize_with = "deserialize_optional_genre")]
    pub genre: Option<Genre>,
}

/// Query parameters of the search endpoints
#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

/// Helper function for deserializing a genre label (or identifier) to an `Option<Genre>` within a
/// struct by deriving `serde::Deserialize` with `#[serde(deserialize_with=...)]`. An empty string
/// means no genre.
fn deserialize_optional_genre<'de, D>(deserializer: D) -> Result<Option<Genre>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Ok(None);
    }
    genre_filter(&value).map(Some).map_err(D::Error::custom)
}
