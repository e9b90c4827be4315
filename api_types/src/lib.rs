use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Editable fields of a venue, as submitted for creating or (fully) overwriting a venue.
///
/// All fields default to empty values, so that missing fields are reported by the server's
/// validation instead of a generic deserialization error.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VenueData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Editable fields of an artist. Same shape as [VenueData], but with `seeking_venue`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ArtistData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// A show of a venue's detail page, described by the performing artist
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ArtistShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    /// Formatted as `MM/DD/YYYY, HH:MM`
    pub start_time: String,
}

/// A show of an artist's detail page, described by the hosting venue
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VenueShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    /// Formatted as `MM/DD/YYYY, HH:MM`
    pub start_time: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VenueDetail {
    pub id: i32,
    #[serde(flatten)]
    pub data: VenueData,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ArtistDetail {
    pub id: i32,
    #[serde(flatten)]
    pub data: ArtistData,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues of one (city, state) location
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EntityRef {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntityRef>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

/// Request for booking a new show.
///
/// The start time is given as text in the format `YYYY-MM-DD HH:MM:SS` and parsed by the server.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

/// Response body of successful creation requests
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Created {
    pub id: i32,
}
