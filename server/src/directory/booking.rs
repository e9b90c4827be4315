//! Booking of shows, with prevention of double-booking a venue or an artist
//!
//! Shows are point events: a booking conflicts with an existing show only if the venue or the
//! artist is the same and the start time is exactly equal. Two shows of the same venue one second
//! apart are fine.

use crate::data_store::models::{NewShow, Show};
use crate::data_store::{
    ArtistId, BookingConflict, GigbookStoreFacade, ShowId, StoreError, VenueId,
};
use chrono::{NaiveDateTime, Timelike};
use log::info;
use std::fmt::{Display, Formatter};

/// The only accepted format for the start time of a new show
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: String,
}

impl From<gigbook_api_types::NewShow> for BookingRequest {
    fn from(value: gigbook_api_types::NewShow) -> Self {
        Self {
            artist_id: value.artist_id,
            venue_id: value.venue_id,
            start_time: value.start_time,
        }
    }
}

#[derive(Debug)]
pub enum BookingError {
    ArtistNotFound,
    VenueNotFound,
    InvalidDate(String),
    VenueAlreadyBooked,
    ArtistAlreadyBooked,
    Store(StoreError),
}

impl From<StoreError> for BookingError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::BookingConflict(BookingConflict::Venue) => Self::VenueAlreadyBooked,
            StoreError::BookingConflict(BookingConflict::Artist) => Self::ArtistAlreadyBooked,
            e => Self::Store(e),
        }
    }
}

impl Display for BookingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArtistNotFound => f.write_str("artist not found"),
            Self::VenueNotFound => f.write_str("venue not found"),
            Self::InvalidDate(value) => write!(
                f,
                "invalid date format: '{}'. Please use the format YYYY-MM-DD HH:MM:SS",
                value
            ),
            Self::VenueAlreadyBooked => f.write_str("venue already booked at that time"),
            Self::ArtistAlreadyBooked => f.write_str("artist already booked at that time"),
            Self::Store(e) => write!(f, "{}", e),
        }
    }
}

pub fn parse_start_time(value: &str) -> Result<NaiveDateTime, BookingError> {
    let start_time = NaiveDateTime::parse_from_str(value.trim(), START_TIME_FORMAT)
        .map_err(|_| BookingError::InvalidDate(value.to_owned()))?;
    // chrono accepts a leap second (:60), which would alias the following full second
    if start_time.nanosecond() >= 1_000_000_000 {
        return Err(BookingError::InvalidDate(value.to_owned()));
    }
    Ok(start_time)
}

/// Check a new show against the existing shows of its venue and of its artist.
///
/// The venue is checked first, so if both are booked at that time, [BookingConflict::Venue] is
/// returned.
pub fn find_conflict(
    candidate: &NewShow,
    venue_shows: &[Show],
    artist_shows: &[Show],
) -> Option<BookingConflict> {
    if venue_shows
        .iter()
        .any(|s| s.venue_id == candidate.venue_id && s.start_time == candidate.start_time)
    {
        return Some(BookingConflict::Venue);
    }
    if artist_shows
        .iter()
        .any(|s| s.artist_id == candidate.artist_id && s.start_time == candidate.start_time)
    {
        return Some(BookingConflict::Artist);
    }
    None
}

/// Book a new show.
///
/// Checks, in this order, that the artist exists, that the venue exists and that the start time is
/// valid. Then the show is created by the store, which rejects it if the venue or the artist is
/// already booked at that time. If any step fails, nothing is written.
pub fn book_show(
    store: &mut dyn GigbookStoreFacade,
    request: BookingRequest,
) -> Result<ShowId, BookingError> {
    match store.get_artist(request.artist_id) {
        Err(StoreError::NotExisting) => return Err(BookingError::ArtistNotFound),
        Err(e) => return Err(e.into()),
        Ok(_) => {}
    }
    match store.get_venue(request.venue_id) {
        Err(StoreError::NotExisting) => return Err(BookingError::VenueNotFound),
        Err(e) => return Err(e.into()),
        Ok(_) => {}
    }
    let start_time = parse_start_time(&request.start_time)?;

    let show_id = store.create_show(NewShow {
        artist_id: request.artist_id,
        venue_id: request.venue_id,
        start_time,
    })?;
    info!(
        "Booked show {} of artist {} at venue {} for {}",
        show_id, request.artist_id, request.venue_id, start_time
    );
    Ok(show_id)
}
