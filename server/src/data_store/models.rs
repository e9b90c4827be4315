use crate::data_store::{ArtistId, ShowId, VenueId};
use crate::directory::enumerations::{Genre, State};
use crate::directory::search::Named;
use crate::directory::show_timing::Scheduled;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=super::schema::venues)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: State,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub genres: Vec<Genre>,
}

impl From<Venue> for gigbook_api_types::VenueData {
    fn from(value: Venue) -> Self {
        Self {
            name: value.name,
            city: value.city,
            state: value.state.label().to_owned(),
            address: value.address,
            phone: value.phone,
            image_link: value.image_link,
            facebook_link: value.facebook_link,
            website: value.website,
            seeking_talent: value.seeking_talent,
            seeking_description: value.seeking_description,
            genres: value.genres.iter().map(|g| g.label().to_owned()).collect(),
        }
    }
}

impl Named for Venue {
    fn id(&self) -> i32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Validated data for creating a venue or overwriting all editable fields of an existing venue.
///
/// Use [crate::directory::validation::validate_venue] to create it from API data.
#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::venues)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: State,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub genres: Vec<Genre>,
}

impl NewVenue {
    pub fn into_venue(self, id: VenueId) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
            genres: self.genres,
        }
    }
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=super::schema::artists)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: State,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub genres: Vec<Genre>,
}

impl From<Artist> for gigbook_api_types::ArtistData {
    fn from(value: Artist) -> Self {
        Self {
            name: value.name,
            city: value.city,
            state: value.state.label().to_owned(),
            address: value.address,
            phone: value.phone,
            image_link: value.image_link,
            facebook_link: value.facebook_link,
            website: value.website,
            seeking_venue: value.seeking_venue,
            seeking_description: value.seeking_description,
            genres: value.genres.iter().map(|g| g.label().to_owned()).collect(),
        }
    }
}

impl Named for Artist {
    fn id(&self) -> i32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::artists)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: State,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub genres: Vec<Genre>,
}

impl NewArtist {
    pub fn into_artist(self, id: ArtistId) -> Artist {
        Artist {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
            genres: self.genres,
        }
    }
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=super::schema::shows)]
pub struct Show {
    pub id: ShowId,
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: NaiveDateTime,
}

impl Scheduled for Show {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name=super::schema::shows)]
pub struct NewShow {
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: NaiveDateTime,
}

/// The artist data required for describing a show
#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::artists)]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
    pub image_link: String,
}

impl From<&Artist> for ArtistRef {
    fn from(value: &Artist) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            image_link: value.image_link.clone(),
        }
    }
}

/// The venue data required for describing a show
#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::venues)]
pub struct VenueRef {
    pub id: VenueId,
    pub name: String,
    pub image_link: String,
}

impl From<&Venue> for VenueRef {
    fn from(value: &Venue) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            image_link: value.image_link.clone(),
        }
    }
}

/// A show of a specific venue, together with its artist
#[derive(Clone, Debug)]
pub struct ShowWithArtist {
    pub show: Show,
    pub artist: ArtistRef,
}

impl Scheduled for ShowWithArtist {
    fn start_time(&self) -> NaiveDateTime {
        self.show.start_time
    }
}

impl From<ShowWithArtist> for gigbook_api_types::ArtistShow {
    fn from(value: ShowWithArtist) -> Self {
        Self {
            artist_id: value.artist.id,
            artist_name: value.artist.name,
            artist_image_link: value.artist.image_link,
            start_time: crate::directory::show_timing::format_show_time(value.show.start_time),
        }
    }
}

/// A show of a specific artist, together with its venue
#[derive(Clone, Debug)]
pub struct ShowWithVenue {
    pub show: Show,
    pub venue: VenueRef,
}

impl Scheduled for ShowWithVenue {
    fn start_time(&self) -> NaiveDateTime {
        self.show.start_time
    }
}

impl From<ShowWithVenue> for gigbook_api_types::VenueShow {
    fn from(value: ShowWithVenue) -> Self {
        Self {
            venue_id: value.venue.id,
            venue_name: value.venue.name,
            venue_image_link: value.venue.image_link,
            start_time: crate::directory::show_timing::format_show_time(value.show.start_time),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FullShow {
    pub show: Show,
    pub artist: ArtistRef,
    pub venue: VenueRef,
}

impl From<FullShow> for gigbook_api_types::ShowListing {
    fn from(value: FullShow) -> Self {
        Self {
            venue_id: value.venue.id,
            venue_name: value.venue.name,
            artist_id: value.artist.id,
            artist_name: value.artist.name,
            artist_image_link: value.artist.image_link,
            start_time: value.show.start_time,
        }
    }
}

/// A show to be imported, referencing venue and artist by their keys within the import data
#[derive(Clone, Debug)]
pub struct ImportedShow {
    pub artist_key: i32,
    pub venue_key: i32,
    pub start_time: NaiveDateTime,
}

/// Complete directory contents for importing into the store at once.
///
/// Venues and artists are identified by keys which are only valid within this structure. The
/// store assigns new ids on import.
#[derive(Clone, Debug, Default)]
pub struct DirectoryContents {
    pub venues: Vec<(i32, NewVenue)>,
    pub artists: Vec<(i32, NewArtist)>,
    pub shows: Vec<ImportedShow>,
}
