
use super::*;
use crate::data_store::store_mock::StoreMock;
use crate::data_store::StoreError;
use crate::directory::booking::START_TIME_FORMAT;
use crate::directory::show_timing::format_show_time;
use crate::web::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{http, test, App};
use gigbook_api_types::{
    ArtistDetail, Created, EntityRef, LocationGroup, SearchResults, ShowListing, VenueDetail,
};
use serde_json::json;
use std::sync::Arc;

macro_rules! init_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .configure(configure_app)
                .app_data(web::Data::new(AppState { store: $store })),
        )
        .await
    };
}

fn sample_store() -> Arc<StoreMock> {
    let data_store_mock = StoreMock::default();
    sample_data::fill_sample_data(&data_store_mock);
    Arc::new(data_store_mock)
}

fn read_body(res: ServiceResponse) -> web::Bytes {
    res.into_body().try_into_bytes().unwrap()
}

fn valid_venue_json() -> serde_json::Value {
    json!({
        "name": "The Blue Note",
        "city": "New York",
        "state": "NY",
        "address": "131 W 3rd St",
        "phone": "(212) 475-8592",
        "image_link": "https://images.example.com/blue-note.jpg",
        "website": "https://www.bluenotejazz.com",
        "seeking_talent": true,
        "genres": ["Jazz", "Blues"]
    })
}

fn valid_artist_json() -> serde_json::Value {
    json!({
        "name": "The Night Owls",
        "city": "Chicago",
        "state": "IL",
        "address": "1544 N Milwaukee Ave",
        "phone": "312.555.0199",
        "image_link": "https://images.example.com/night-owls.jpg",
        "seeking_venue": true,
        "seeking_description": "Any venue in the Midwest",
        "genres": ["Soul", "Funk"]
    })
}

#[actix_web::test]
async fn test_list_venues() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get().uri("/api/v1/venues").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: Vec<LocationGroup> = serde_json::from_slice(&read_body(res)).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].state, "CA");
    assert_eq!(result[0].city, "San Francisco");
    let summary: Vec<(i32, usize)> = result[0]
        .venues
        .iter()
        .map(|v| (v.id, v.num_upcoming_shows))
        .collect();
    assert_eq!(summary, vec![(1, 0), (3, 3)]);
    assert_eq!(result[1].state, "NY");
    assert_eq!(result[1].city, "New York");
    assert_eq!(result[1].venues.len(), 1);
    assert_eq!(result[1].venues[0].name, "The Dueling Pianos Bar");
    assert_eq!(result[1].venues[0].num_upcoming_shows, 0);
}

#[actix_web::test]
async fn test_list_venues_by_genre() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get()
        .uri("/api/v1/venues?genre=Classical")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: Vec<LocationGroup> = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].venues.len(), 1);
    assert_eq!(result[0].venues[0].id, 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/venues?genre=Swing")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_search_venues() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get()
        .uri("/api/v1/venues/search?search_term=Hop")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: SearchResults = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.count, 1);
    assert_eq!(
        result.data,
        vec![EntityRef {
            id: 1,
            name: "The Musical Hop".to_owned()
        }]
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/venues/search?search_term=music")
        .to_request();
    let res = test::call_service(&app, req).await;
    let result: SearchResults = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.count, 2);
    assert_eq!(result.data[0].id, 1);
    assert_eq!(result.data[1].id, 3);

    let req = test::TestRequest::get()
        .uri("/api/v1/venues/search")
        .to_request();
    let res = test::call_service(&app, req).await;
    let result: SearchResults = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.count, 3);
}

#[actix_web::test]
async fn test_get_venue() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get().uri("/api/v1/venues/3").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: VenueDetail = serde_json::from_slice(&read_body(res)).unwrap();

    assert_eq!(result.id, 3);
    assert_eq!(result.data.name, "Park Square Live Music & Coffee");
    assert_eq!(result.data.state, "CA");
    assert_eq!(result.data.genres, vec!["Rock n Roll", "Jazz", "Folk"]);
    assert_eq!(result.past_shows_count, 1);
    assert_eq!(result.upcoming_shows_count, 3);
    assert_eq!(result.past_shows[0].artist_id, 2);
    assert_eq!(result.past_shows[0].artist_name, "Matt Quevedo");
    assert_eq!(result.past_shows[0].start_time, "06/15/2019, 23:00");
    assert_eq!(
        result.upcoming_shows[0].start_time,
        format_show_time(sample_data::upcoming_show_time(0))
    );
    assert_eq!(
        result.upcoming_shows[2].start_time,
        format_show_time(sample_data::upcoming_show_time(2))
    );
}

#[actix_web::test]
async fn test_get_venue_not_existing() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get().uri("/api/v1/venues/42").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(body["httpCode"], 404);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_create_venue() {
    let store = sample_store();
    let app = init_app!(store.clone());
    let req = test::TestRequest::post()
        .uri("/api/v1/venues")
        .set_json(valid_venue_json())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::CREATED);
    let result: Created = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.id, 4);

    let data = store.data.lock().unwrap();
    let venue = data.venues.iter().find(|v| v.id == 4).unwrap();
    assert_eq!(venue.name, "The Blue Note");
    assert_eq!(venue.facebook_link, "");
}

#[actix_web::test]
async fn test_create_venue_invalid() {
    let store = sample_store();
    let app = init_app!(store.clone());

    let mut venue = valid_venue_json();
    venue["phone"] = json!("call us");
    venue["genres"] = json!(["Jazz", "Swing"]);
    let req = test::TestRequest::post()
        .uri("/api/v1/venues")
        .set_json(venue)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_slice(&read_body(res)).unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("phone"));
    assert!(message.contains("genres"));

    // No JSON content type
    let req = test::TestRequest::post()
        .uri("/api/v1/venues")
        .set_payload(valid_venue_json().to_string())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNSUPPORTED_MEDIA_TYPE);

    // Malformed JSON
    let req = test::TestRequest::post()
        .uri("/api/v1/venues")
        .insert_header(http::header::ContentType::json())
        .set_payload("{\"name\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

    assert_eq!(store.data.lock().unwrap().venues.len(), 3);
}

#[actix_web::test]
async fn test_update_venue() {
    let store = sample_store();
    let app = init_app!(store.clone());
    let req = test::TestRequest::put()
        .uri("/api/v1/venues/2")
        .set_json(valid_venue_json())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NO_CONTENT);
    {
        let data = store.data.lock().unwrap();
        let venue = data.venues.iter().find(|v| v.id == 2).unwrap();
        assert_eq!(venue.name, "The Blue Note");
        assert_eq!(venue.phone, "(212) 475-8592");
        // Fields missing in the request are overwritten, too
        assert_eq!(venue.facebook_link, "");
    }

    let req = test::TestRequest::put()
        .uri("/api/v1/venues/42")
        .set_json(valid_venue_json())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_venue() {
    let store = sample_store();
    let app = init_app!(store.clone());
    let req = test::TestRequest::delete()
        .uri("/api/v1/venues/3")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NO_CONTENT);
    {
        let data = store.data.lock().unwrap();
        assert_eq!(data.venues.len(), 2);
        assert!(data.shows.iter().all(|s| s.venue_id != 3));
        assert_eq!(data.shows.len(), 1);
    }

    let req = test::TestRequest::delete()
        .uri("/api/v1/venues/3")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_artists() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get().uri("/api/v1/artists").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: Vec<EntityRef> = serde_json::from_slice(&read_body(res)).unwrap();
    let names: Vec<&str> = result.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/artists?genre=Jazz")
        .to_request();
    let res = test::call_service(&app, req).await;
    let result: Vec<EntityRef> = serde_json::from_slice(&read_body(res)).unwrap();
    let ids: Vec<i32> = result.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[actix_web::test]
async fn test_search_artists() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get()
        .uri("/api/v1/artists/search?search_term=A")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: SearchResults = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.count, 3);

    let req = test::TestRequest::get()
        .uri("/api/v1/artists/search?search_term=band")
        .to_request();
    let res = test::call_service(&app, req).await;
    let result: SearchResults = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.count, 1);
    assert_eq!(result.data[0].name, "The Wild Sax Band");

    let req = test::TestRequest::get()
        .uri("/api/v1/artists/search?search_term=%25%5B.*")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: SearchResults = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.count, 0);
}

#[actix_web::test]
async fn test_get_artist() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get().uri("/api/v1/artists/3").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: ArtistDetail = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.data.name, "The Wild Sax Band");
    assert!(!result.data.seeking_venue);
    assert_eq!(result.past_shows_count, 0);
    assert_eq!(result.upcoming_shows_count, 3);
    assert_eq!(result.upcoming_shows[0].venue_id, 3);
    assert_eq!(
        result.upcoming_shows[0].venue_name,
        "Park Square Live Music & Coffee"
    );

    let req = test::TestRequest::get().uri("/api/v1/artists/42").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_and_update_artist() {
    let store = sample_store();
    let app = init_app!(store.clone());
    let req = test::TestRequest::post()
        .uri("/api/v1/artists")
        .set_json(valid_artist_json())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::CREATED);
    let result: Created = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.id, 4);

    let mut artist = valid_artist_json();
    artist["seeking_venue"] = json!(false);
    let req = test::TestRequest::put()
        .uri("/api/v1/artists/4")
        .set_json(artist)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NO_CONTENT);
    assert!(
        !store
            .data
            .lock()
            .unwrap()
            .artists
            .iter()
            .find(|a| a.id == 4)
            .unwrap()
            .seeking_venue
    );

    let mut artist = valid_artist_json();
    artist["state"] = json!("Illinois");
    let req = test::TestRequest::put()
        .uri("/api/v1/artists/4")
        .set_json(artist)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);

    let mut artist = valid_artist_json();
    artist["address"] = json!("   ");
    let req = test::TestRequest::post()
        .uri("/api/v1/artists")
        .set_json(artist)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_slice(&read_body(res)).unwrap();
    assert!(body["message"].as_str().unwrap().contains("address"));
    assert_eq!(store.data.lock().unwrap().artists.len(), 4);
}

#[actix_web::test]
async fn test_list_shows() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get().uri("/api/v1/shows").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: Vec<ShowListing> = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.len(), 5);
    assert_eq!(result[0].venue_name, "The Musical Hop");
    assert_eq!(result[0].artist_name, "Guns N Petals");
    assert_eq!(
        result[0].start_time,
        chrono::NaiveDate::from_ymd_opt(2019, 5, 21)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap()
    );
}

#[actix_web::test]
async fn test_create_show() {
    let store = sample_store();
    let app = init_app!(store.clone());
    let req = test::TestRequest::post()
        .uri("/api/v1/shows")
        .set_json(json!({"artist_id": 1, "venue_id": 2, "start_time": "2035-05-05 10:00:00"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::CREATED);
    let result: Created = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(result.id, 6);

    // Same venue at the same time
    let req = test::TestRequest::post()
        .uri("/api/v1/shows")
        .set_json(json!({"artist_id": 2, "venue_id": 2, "start_time": "2035-05-05 10:00:00"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::CONFLICT);
    let body: serde_json::Value = serde_json::from_slice(&read_body(res)).unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("venue already booked at that time"));

    // Same artist at the same time
    let start_time = sample_data::upcoming_show_time(0)
        .format(START_TIME_FORMAT)
        .to_string();
    let req = test::TestRequest::post()
        .uri("/api/v1/shows")
        .set_json(json!({"artist_id": 3, "venue_id": 1, "start_time": start_time}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::CONFLICT);
    let body: serde_json::Value = serde_json::from_slice(&read_body(res)).unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("artist already booked at that time"));

    // One second later is fine
    let req = test::TestRequest::post()
        .uri("/api/v1/shows")
        .set_json(json!({"artist_id": 2, "venue_id": 2, "start_time": "2035-05-05 10:00:01"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::CREATED);

    assert_eq!(store.data.lock().unwrap().shows.len(), 7);
}

#[actix_web::test]
async fn test_create_show_rejected() {
    let store = sample_store();
    let app = init_app!(store.clone());
    for (request, expected_status) in [
        (
            json!({"artist_id": 1, "venue_id": 2, "start_time": "05/05/2035 10:00"}),
            http::StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            json!({"artist_id": 42, "venue_id": 2, "start_time": "2035-05-05 10:00:00"}),
            http::StatusCode::NOT_FOUND,
        ),
        (
            json!({"artist_id": 1, "venue_id": 42, "start_time": "2035-05-05 10:00:00"}),
            http::StatusCode::NOT_FOUND,
        ),
        (
            json!({"artist_id": 1, "venue_id": 2}),
            http::StatusCode::UNPROCESSABLE_ENTITY,
        ),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/shows")
            .set_json(&request)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), expected_status, "request {}", request);
    }
    assert_eq!(store.data.lock().unwrap().shows.len(), 5);
}

#[actix_web::test]
async fn test_store_error() {
    let store = sample_store();
    let app = init_app!(store.clone());
    store.data.lock().unwrap().next_error = Some(StoreError::ConnectionError(
        "connection refused".to_owned(),
    ));
    let req = test::TestRequest::get().uri("/api/v1/venues").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);

    store.data.lock().unwrap().next_error = Some(StoreError::TransactionConflict);
    let req = test::TestRequest::post()
        .uri("/api/v1/shows")
        .set_json(json!({"artist_id": 1, "venue_id": 2, "start_time": "2035-05-05 10:00:00"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_enumerations() {
    let app = init_app!(sample_store());
    let req = test::TestRequest::get().uri("/api/v1/genres").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let genres: Vec<String> = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(genres.len(), 19);
    assert!(genres.contains(&"Hip-Hop".to_owned()));

    let req = test::TestRequest::get().uri("/api/v1/states").to_request();
    let res = test::call_service(&app, req).await;
    let states: Vec<String> = serde_json::from_slice(&read_body(res)).unwrap();
    assert_eq!(states.len(), 51);
    assert_eq!(states[0], "AL");
}
