use crate::directory::search::{search_by_name, to_search_results};
use crate::directory::show_timing::{classify_shows, current_time};
use crate::directory::validation::validate_artist;
use crate::web::api::APIError;
use crate::web::util::{GenreFilterQuery, SearchQuery};
use crate::web::AppState;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use gigbook_api_types::EntityRef;
use log::info;

#[get("/artists")]
async fn list_artists(
    query: web::Query<GenreFilterQuery>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let genre = query.into_inner().genre;
    let artists: Vec<EntityRef> = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artists()?)
    })
    .await??
    .into_iter()
    .filter(|a| genre.map_or(true, |genre| a.genres.contains(&genre)))
    .map(|a| EntityRef {
        id: a.id,
        name: a.name,
    })
    .collect();

    Ok(web::Json(artists))
}

#[get("/artists/search")]
async fn search_artists(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let term = query.into_inner().search_term;
    let artists = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artists()?)
    })
    .await??;

    Ok(web::Json(to_search_results(&search_by_name(&term, &artists))))
}

#[get("/artists/{artist_id}")]
async fn get_artist(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let artist_id = path.into_inner();
    let now = current_time();
    let (artist, shows) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        let artist = store.get_artist(artist_id)?;
        Ok((artist, store.get_artist_shows(artist_id)?))
    })
    .await??;

    let shows = classify_shows(shows, now);
    Ok(web::Json(gigbook_api_types::ArtistDetail {
        id: artist.id,
        data: artist.into(),
        past_shows_count: shows.past.len(),
        upcoming_shows_count: shows.upcoming.len(),
        past_shows: shows.past.into_iter().map(|s| s.into()).collect(),
        upcoming_shows: shows.upcoming.into_iter().map(|s| s.into()).collect(),
    }))
}

#[post("/artists")]
async fn create_artist(
    data: web::Json<gigbook_api_types::ArtistData>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let artist = validate_artist(data.into_inner())?;
    let artist_id = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.create_artist(artist)?)
    })
    .await??;

    info!("Created artist {}", artist_id);
    Ok(HttpResponse::Created().json(gigbook_api_types::Created { id: artist_id }))
}

#[put("/artists/{artist_id}")]
async fn update_artist(
    path: web::Path<i32>,
    data: web::Json<gigbook_api_types::ArtistData>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let artist_id = path.into_inner();
    let artist = validate_artist(data.into_inner())?;
    web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        store.update_artist(artist_id, artist)?;
        Ok(())
    })
    .await??;

    Ok(HttpResponse::NoContent())
}
