//! The database interface of the directory
//!
//! The primary entry point to this module is the function [get_store_from_env], which returns an
//! object implementing the [GigbookStore] trait. This object can be shared between threads in a
//! global application state and be used to create [GigbookStoreFacade] instances for interaction
//! with the database. A facade is created for each request (or cli command) and handed explicitly
//! to the operations that need it. Facades provide a CRUD-like interface, using the data models
//! from the [models] module.
//!
//! The primary implementation of [GigbookStore] ([postgres::PgDataStore]) wraps a PostgreSQL
//! connection pool and its corresponding [GigbookStoreFacade] objects
//! ([postgres::PgDataStoreFacade]) hold one pooled connection each, using the Diesel query DSL for
//! implementing the database interaction.
//!
//! There is also a mock implementation for unittests.

use crate::cli_error::CliError;
use crate::setup;
use std::fmt::{Display, Formatter};

pub mod models;
mod postgres;
mod schema;
#[cfg(test)]
pub mod store_mock;

/// Get a [GigbookStore] instance, according the "DATABASE_URL" environment variable.
///
/// The DATABASE_URL must be a PosgreSQL connection url, following the schema
/// "postgres://{user}:{password}@{host}/{database}".
pub fn get_store_from_env() -> Result<impl GigbookStore, CliError> {
    Ok(postgres::PgDataStore::new(&setup::get_database_url_from_env()?)?)
}

pub type VenueId = i32;
pub type ArtistId = i32;
pub type ShowId = i32;

pub trait GigbookStoreFacade {
    /// Get all venues, ordered by id
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError>;
    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError>;
    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError>;
    /// Overwrite all editable fields of an existing venue
    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError>;
    /// Delete the venue together with all of its shows
    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError>;
    /// Get all shows of the venue with their artist, ordered by start time
    fn get_venue_shows(
        &mut self,
        venue_id: VenueId,
    ) -> Result<Vec<models::ShowWithArtist>, StoreError>;

    /// Get all artists, ordered by id
    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError>;
    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError>;
    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError>;
    /// Overwrite all editable fields of an existing artist
    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError>;
    /// Get all shows of the artist with their venue, ordered by start time
    fn get_artist_shows(
        &mut self,
        artist_id: ArtistId,
    ) -> Result<Vec<models::ShowWithVenue>, StoreError>;

    /// Get all shows, ordered by start time
    fn get_shows(&mut self) -> Result<Vec<models::Show>, StoreError>;
    /// Get all shows with their artist and venue, ordered by start time
    fn get_show_listing(&mut self) -> Result<Vec<models::FullShow>, StoreError>;
    /// Create a new show, unless the venue or the artist is already booked at the exact same time.
    ///
    /// The check for conflicting shows and the insertion are done atomically.
    ///
    /// # return value
    /// - `Ok(id)` of the new show
    /// - `Err(StoreError::BookingConflict(_))` if the venue or the artist has another show with the
    ///   same start time. Nothing has been written in this case.
    /// - `Err(StoreError::InvalidInputData(_))` if the artist or venue does not exist
    /// - `Err(_)` if something different went wrong, as usual
    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError>;

    /// Import venues, artists and shows in a single transaction.
    ///
    /// New ids are assigned to all imported entities.
    fn import_directory(
        &mut self,
        contents: models::DirectoryContents,
    ) -> Result<(), StoreError>;
}

pub trait GigbookStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn GigbookStoreFacade + 'a>, StoreError>;
}

/// Which booking of an existing show prevents booking a new show
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BookingConflict {
    /// The venue is already booked at the requested time
    Venue,
    /// The artist is already booked at the requested time
    Artist,
}

impl Display for BookingConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingConflict::Venue => f.write_str("venue already booked at that time"),
            BookingConflict::Artist => f.write_str("artist already booked at that time"),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// Connection the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// Database transaction could not be commited due to a conflicting concurrent transaction
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The show could not be created, because it collides with an existing show
    BookingConflict(BookingConflict),
    /// The provided data is invalid, i.e. it violates a SQL constraint. See string description for
    /// details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _,
            ) => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::ForeignKeyViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation
                | e @ diesel::result::DatabaseErrorKind::UniqueViolation
                | e @ diesel::result::DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::InvalidInputData(format!("{:?}: {}", e, info.message())),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str("Database transaction could not be commited due to a conflicting concurrent transaction"),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::BookingConflict(c) => write!(f, "Show could not be booked: {}", c),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            Self::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            }
        }
    }
}

impl std::error::Error for StoreError {}
