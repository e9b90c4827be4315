use crate::directory::locations::group_by_location;
use crate::directory::search::{search_by_name, to_search_results};
use crate::directory::show_timing::{classify_shows, current_time};
use crate::directory::validation::validate_venue;
use crate::web::api::APIError;
use crate::web::util::{GenreFilterQuery, SearchQuery};
use crate::web::AppState;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::info;

#[get("/venues")]
async fn list_venues(
    query: web::Query<GenreFilterQuery>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let genre = query.into_inner().genre;
    let now = current_time();
    let groups = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        let mut venues = store.get_venues()?;
        if let Some(genre) = genre {
            venues.retain(|v| v.genres.contains(&genre));
        }
        let shows = store.get_shows()?;
        Ok(group_by_location(venues, &shows, now))
    })
    .await??;

    Ok(web::Json(groups))
}

#[get("/venues/search")]
async fn search_venues(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let term = query.into_inner().search_term;
    let venues = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venues()?)
    })
    .await??;

    Ok(web::Json(to_search_results(&search_by_name(&term, &venues))))
}

#[get("/venues/{venue_id}")]
async fn get_venue(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let venue_id = path.into_inner();
    let now = current_time();
    let (venue, shows) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        let venue = store.get_venue(venue_id)?;
        Ok((venue, store.get_venue_shows(venue_id)?))
    })
    .await??;

    let shows = classify_shows(shows, now);
    Ok(web::Json(gigbook_api_types::VenueDetail {
        id: venue.id,
        data: venue.into(),
        past_shows_count: shows.past.len(),
        upcoming_shows_count: shows.upcoming.len(),
        past_shows: shows.past.into_iter().map(|s| s.into()).collect(),
        upcoming_shows: shows.upcoming.into_iter().map(|s| s.into()).collect(),
    }))
}

#[post("/venues")]
async fn create_venue(
    data: web::Json<gigbook_api_types::VenueData>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let venue = validate_venue(data.into_inner())?;
    let venue_id = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.create_venue(venue)?)
    })
    .await??;

    info!("Created venue {}", venue_id);
    Ok(HttpResponse::Created().json(gigbook_api_types::Created { id: venue_id }))
}

#[put("/venues/{venue_id}")]
async fn update_venue(
    path: web::Path<i32>,
    data: web::Json<gigbook_api_types::VenueData>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let venue_id = path.into_inner();
    let venue = validate_venue(data.into_inner())?;
    web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        store.update_venue(venue_id, venue)?;
        Ok(())
    })
    .await??;

    Ok(HttpResponse::NoContent())
}

#[delete("/venues/{venue_id}")]
async fn delete_venue(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let venue_id = path.into_inner();
    web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        store.delete_venue(venue_id)?;
        Ok(())
    })
    .await??;

    info!("Deleted venue {} with all of its shows", venue_id);
    Ok(HttpResponse::NoContent())
}
