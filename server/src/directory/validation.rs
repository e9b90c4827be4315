//! Validation of venue and artist data submitted by clients

use crate::data_store::models::{NewArtist, NewVenue};
use crate::directory::enumerations::{Genre, State};
use lazy_static::lazy_static;
use std::fmt::{Display, Formatter};

/// Problems found in submitted data, one entry per invalid field
#[derive(Debug, Default, PartialEq)]
pub struct ValidationError {
    pub problems: Vec<FieldProblem>,
}

#[derive(Debug, PartialEq)]
pub struct FieldProblem {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.problems.push(FieldProblem {
            field,
            message: message.into(),
        });
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.problems.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            &self
                .problems
                .iter()
                .map(|p| format!("{}: {}", p.field, p.message))
                .collect::<Vec<String>>()
                .join("; "),
        )
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add(field, message);
        result
    }
}

fn required(errors: &mut ValidationError, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "must not be empty");
    }
    value.to_owned()
}

pub fn is_valid_phone(value: &str) -> bool {
    lazy_static! {
        static ref RE: regex::Regex =
            regex::Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").unwrap();
    }
    RE.is_match(value)
}

fn phone(errors: &mut ValidationError, value: &str) -> String {
    let value = required(errors, "phone", value);
    if !value.is_empty() && !is_valid_phone(&value) {
        errors.add("phone", "not a valid phone number, e.g. 123-456-7890");
    }
    value
}

/// Optional link: empty, or an absolute http(s) URL
fn optional_link(errors: &mut ValidationError, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    match url::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(_) => errors.add(field, "must be an http or https URL"),
        Err(e) => errors.add(field, format!("not a valid URL: {}", e)),
    }
    value.to_owned()
}

fn state(errors: &mut ValidationError, value: &str) -> State {
    match State::try_from(value.trim()) {
        Ok(state) => state,
        Err(e) => {
            errors.add("state", e.to_string());
            // Placeholder, never returned since errors is not empty
            State::AL
        }
    }
}

fn genres(errors: &mut ValidationError, values: &[String]) -> Vec<Genre> {
    let mut result: Vec<Genre> = Vec::with_capacity(values.len());
    for value in values {
        match Genre::try_from(value.trim()) {
            Ok(genre) => {
                if !result.contains(&genre) {
                    result.push(genre);
                }
            }
            Err(e) => errors.add("genres", e.to_string()),
        }
    }
    if values.is_empty() {
        errors.add("genres", "at least one genre must be selected");
    }
    result
}

/// Parse a genre filter of a listing query
pub fn genre_filter(value: &str) -> Result<Genre, ValidationError> {
    Genre::try_from(value).map_err(|e| ValidationError::single("genre", e.to_string()))
}

pub fn validate_venue(data: gigbook_api_types::VenueData) -> Result<NewVenue, ValidationError> {
    let mut errors = ValidationError::default();
    let name = required(&mut errors, "name", &data.name);
    let city = required(&mut errors, "city", &data.city);
    let state = state(&mut errors, &data.state);
    let address = required(&mut errors, "address", &data.address);
    let phone = phone(&mut errors, &data.phone);
    let image_link = required(&mut errors, "image_link", &data.image_link);
    let facebook_link = optional_link(&mut errors, "facebook_link", &data.facebook_link);
    let website = optional_link(&mut errors, "website", &data.website);
    let genres = genres(&mut errors, &data.genres);

    errors.into_result(|| NewVenue {
        name,
        city,
        state,
        address,
        phone,
        image_link,
        facebook_link,
        website,
        seeking_talent: data.seeking_talent,
        seeking_description: data.seeking_description.trim().to_owned(),
        genres,
    })
}

pub fn validate_artist(data: gigbook_api_types::ArtistData) -> Result<NewArtist, ValidationError> {
    let mut errors = ValidationError::default();
    let name = required(&mut errors, "name", &data.name);
    let city = required(&mut errors, "city", &data.city);
    let state = state(&mut errors, &data.state);
    let address = required(&mut errors, "address", &data.address);
    let phone = phone(&mut errors, &data.phone);
    let image_link = required(&mut errors, "image_link", &data.image_link);
    let facebook_link = optional_link(&mut errors, "facebook_link", &data.facebook_link);
    let website = optional_link(&mut errors, "website", &data.website);
    let genres = genres(&mut errors, &data.genres);

    errors.into_result(|| NewArtist {
        name,
        city,
        state,
        address,
        phone,
        image_link,
        facebook_link,
        website,
        seeking_venue: data.seeking_venue,
        seeking_description: data.seeking_description.trim().to_owned(),
        genres,
    })
}
