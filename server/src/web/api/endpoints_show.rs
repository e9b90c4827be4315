use crate::directory::booking::{book_show, BookingRequest};
use crate::web::api::APIError;
use crate::web::AppState;
use actix_web::{get, post, web, HttpResponse, Responder};

#[get("/shows")]
async fn list_shows(state: web::Data<AppState>) -> Result<impl Responder, APIError> {
    let shows: Vec<gigbook_api_types::ShowListing> = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_show_listing()?)
    })
    .await??
    .into_iter()
    .map(|s| s.into())
    .collect();

    Ok(web::Json(shows))
}

#[post("/shows")]
async fn create_show(
    data: web::Json<gigbook_api_types::NewShow>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let request: BookingRequest = data.into_inner().into();
    let show_id = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(book_show(&mut *store, request)?)
    })
    .await??;

    Ok(HttpResponse::Created().json(gigbook_api_types::Created { id: show_id }))
}
