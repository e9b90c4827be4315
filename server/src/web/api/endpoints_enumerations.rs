use crate::directory::enumerations::{Genre, State};
use actix_web::{get, web, Responder};

#[get("/genres")]
async fn list_genres() -> impl Responder {
    web::Json(Genre::all().map(|g| g.label()).collect::<Vec<&'static str>>())
}

#[get("/states")]
async fn list_states() -> impl Responder {
    web::Json(State::all().map(|s| s.label()).collect::<Vec<&'static str>>())
}
