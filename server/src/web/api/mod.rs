use std::fmt::Display;

mod endpoints_artist;
mod endpoints_enumerations;
mod endpoints_show;
mod endpoints_venue;
#[cfg(test)]
pub(crate) mod tests;

use crate::data_store::{BookingConflict, StoreError};
use crate::directory::booking::BookingError;
use crate::directory::validation::ValidationError;
use actix_web::error::JsonPayloadError;
use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    web, HttpResponse,
};
use serde_json::json;

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(get_api_service());
}

fn get_api_service() -> actix_web::Scope {
    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| APIError::InvalidJson(err).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| APIError::InvalidData(err.to_string()).into());
    // Search endpoints must be registered before the `{id}` endpoints
    web::scope("/api/v1")
        .app_data(json_config)
        .app_data(query_config)
        .service(endpoints_venue::search_venues)
        .service(endpoints_venue::list_venues)
        .service(endpoints_venue::get_venue)
        .service(endpoints_venue::create_venue)
        .service(endpoints_venue::update_venue)
        .service(endpoints_venue::delete_venue)
        .service(endpoints_artist::search_artists)
        .service(endpoints_artist::list_artists)
        .service(endpoints_artist::get_artist)
        .service(endpoints_artist::create_artist)
        .service(endpoints_artist::update_artist)
        .service(endpoints_show::list_shows)
        .service(endpoints_show::create_show)
        .service(endpoints_enumerations::list_genres)
        .service(endpoints_enumerations::list_states)
}

#[derive(Debug)]
pub enum APIError {
    NotExisting,
    ArtistNotFound,
    VenueNotFound,
    InvalidJson(actix_web::error::JsonPayloadError),
    InvalidData(String),
    InvalidDate(String),
    BookingConflict(BookingConflict),
    TransactionConflict,
    InternalError(String),
}

impl Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotExisting => f.write_str("Element does not exist")?,
            Self::ArtistNotFound => f.write_str("Show could not be booked: artist not found")?,
            Self::VenueNotFound => f.write_str("Show could not be booked: venue not found")?,
            Self::InternalError(s) => {
                f.write_str("Internal error: ")?;
                f.write_str(s)?;
            }
            Self::InvalidJson(e) => {
                write!(f, "Invalid JSON request data: {}", e)?;
            }
            Self::InvalidData(e) => {
                write!(f, "Invalid request data: {}", e)?;
            }
            Self::InvalidDate(value) => {
                write!(
                    f,
                    "Show could not be booked: invalid date format: '{}'. Please use the format YYYY-MM-DD HH:MM:SS",
                    value
                )?;
            }
            Self::BookingConflict(conflict) => {
                write!(f, "Show could not be booked: {}", conflict)?;
            }
            Self::TransactionConflict => {
                f.write_str("Concurrent database transaction conflict. Please retry request.")?;
            }
        };
        Ok(())
    }
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse {
        let message = format!("{}", self);

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({
                "httpCode": self.status_code().as_u16(),
                "message": message
            }))
    }
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotExisting => StatusCode::NOT_FOUND,
            Self::ArtistNotFound => StatusCode::NOT_FOUND,
            Self::VenueNotFound => StatusCode::NOT_FOUND,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidJson(e) => match e {
                JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                JsonPayloadError::Deserialize(json_error) if json_error.is_data() => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::BAD_REQUEST,
            },
            Self::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidDate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BookingConflict(_) => StatusCode::CONFLICT,
            Self::TransactionConflict => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(error) => {
                Self::InternalError(format!("Could not connect to database: {}", error))
            }
            StoreError::QueryError(diesel_error) => Self::InternalError(format!(
                "Error while executing database query: {}",
                diesel_error
            )),
            StoreError::TransactionConflict => Self::TransactionConflict,
            StoreError::NotExisting => Self::NotExisting,
            StoreError::BookingConflict(conflict) => Self::BookingConflict(conflict),
            StoreError::InvalidInputData(e) => Self::InvalidData(e),
            StoreError::InvalidDataInDatabase(e) => Self::InternalError(format!(
                "Data queried from database could not be deserialized: {}",
                e
            )),
        }
    }
}

impl From<BookingError> for APIError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::ArtistNotFound => Self::ArtistNotFound,
            BookingError::VenueNotFound => Self::VenueNotFound,
            BookingError::InvalidDate(value) => Self::InvalidDate(value),
            BookingError::VenueAlreadyBooked => Self::BookingConflict(BookingConflict::Venue),
            BookingError::ArtistAlreadyBooked => Self::BookingConflict(BookingConflict::Artist),
            BookingError::Store(e) => e.into(),
        }
    }
}

impl From<ValidationError> for APIError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidData(e.to_string())
    }
}

impl From<actix_web::error::BlockingError> for APIError {
    fn from(_e: actix_web::error::BlockingError) -> Self {
        APIError::InternalError(
            "Could not get thread from thread pool for synchronous database operation.".to_owned(),
        )
    }
}
