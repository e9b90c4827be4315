use super::{
    models, schema, ArtistId, BookingConflict, GigbookStore, GigbookStoreFacade, ShowId,
    StoreError, VenueId,
};
use crate::directory::booking::find_conflict;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

#[derive(Clone)]
pub struct PgDataStore {
    pool: diesel::r2d2::Pool<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let connection_manager = diesel::r2d2::ConnectionManager::<PgConnection>::new(database_url);
        Ok(Self {
            pool: diesel::r2d2::Pool::builder()
                .test_on_check_out(true)
                .min_idle(Some(2))
                .build(connection_manager)?,
        })
    }
}

impl GigbookStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn GigbookStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

pub struct PgDataStoreFacade {
    connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStoreFacade {
    pub fn with_pooled_connection(
        connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
    ) -> Self {
        Self { connection }
    }
}

const VENUE_BOOKING_CONSTRAINT: &str = "shows_venue_id_start_time_key";
const ARTIST_BOOKING_CONSTRAINT: &str = "shows_artist_id_start_time_key";

/// Convert errors of inserting into the shows table, translating violations of the unique
/// (venue_id, start_time) and (artist_id, start_time) constraints into booking conflicts.
///
/// These constraints only fire when a concurrent transaction inserted a conflicting show after our
/// own check in [PgDataStoreFacade::create_show].
fn show_insert_error(error: diesel::result::Error) -> StoreError {
    if let diesel::result::Error::DatabaseError(
        diesel::result::DatabaseErrorKind::UniqueViolation,
        info,
    ) = &error
    {
        match info.constraint_name() {
            Some(VENUE_BOOKING_CONSTRAINT) => {
                return StoreError::BookingConflict(BookingConflict::Venue)
            }
            Some(ARTIST_BOOKING_CONSTRAINT) => {
                return StoreError::BookingConflict(BookingConflict::Artist)
            }
            _ => {}
        }
    }
    error.into()
}

fn insert_show_checked(
    show: &models::NewShow,
    connection: &mut PgConnection,
) -> Result<ShowId, StoreError> {
    use schema::shows::dsl::*;

    let venue_shows = shows
        .filter(venue_id.eq(show.venue_id))
        .select(models::Show::as_select())
        .load::<models::Show>(connection)?;
    let artist_shows = shows
        .filter(artist_id.eq(show.artist_id))
        .select(models::Show::as_select())
        .load::<models::Show>(connection)?;
    if let Some(conflict) = find_conflict(show, &venue_shows, &artist_shows) {
        return Err(StoreError::BookingConflict(conflict));
    }

    diesel::insert_into(shows)
        .values(show)
        .returning(id)
        .get_result::<ShowId>(connection)
        .map_err(show_insert_error)
}

impl GigbookStoreFacade for PgDataStoreFacade {
    fn get_venues(&mut self) -> Result<Vec<models::Venue>, StoreError> {
        use schema::venues::dsl::*;

        venues
            .order_by(id.asc())
            .select(models::Venue::as_select())
            .load::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::Venue, StoreError> {
        use schema::venues::dsl::*;

        venues
            .filter(id.eq(venue_id))
            .select(models::Venue::as_select())
            .first::<models::Venue>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_venue(&mut self, venue: models::NewVenue) -> Result<VenueId, StoreError> {
        use schema::venues::dsl::*;

        Ok(diesel::insert_into(venues)
            .values(&venue)
            .returning(id)
            .get_result::<VenueId>(&mut self.connection)?)
    }

    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::NewVenue,
    ) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        let count = diesel::update(venues)
            .filter(id.eq(venue_id))
            .set(&venue)
            .execute(&mut self.connection)?;
        if count == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        // Shows of the venue are removed by the database (ON DELETE CASCADE)
        let count = diesel::delete(venues.filter(id.eq(venue_id))).execute(&mut self.connection)?;
        if count == 0 {
            return Err(StoreError::NotExisting);
        }
        Ok(())
    }

    fn get_venue_shows(
        &mut self,
        the_venue_id: VenueId,
    ) -> Result<Vec<models::ShowWithArtist>, StoreError> {
        use schema::shows::dsl::*;

        Ok(shows
            .inner_join(schema::artists::table)
            .filter(venue_id.eq(the_venue_id))
            .order_by((start_time.asc(), id.asc()))
            .select((models::Show::as_select(), models::ArtistRef::as_select()))
            .load::<(models::Show, models::ArtistRef)>(&mut self.connection)?
            .into_iter()
            .map(|(show, artist)| models::ShowWithArtist { show, artist })
            .collect())
    }

    fn get_artists(&mut self) -> Result<Vec<models::Artist>, StoreError> {
        use schema::artists::dsl::*;

        artists
            .order_by(id.asc())
            .select(models::Artist::as_select())
            .load::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::Artist, StoreError> {
        use schema::artists::dsl::*;

        artists
            .filter(id.eq(artist_id))
            .select(models::Artist::as_select())
            .first::<models::Artist>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_artist(&mut self, artist: models::NewArtist) -> Result<ArtistId, StoreError> {
        use schema::artists::dsl::*;

        Ok(diesel::insert_into(artists)
            .values(&artist)
            .returning(id)
            .get_result::<ArtistId>(&mut self.connection)?)
    }

    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::NewArtist,
    ) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        let count = diesel::update(artists)
            .filter(id.eq(artist_id))
            .set(&artist)
            .execute(&mut self.connection)?;
        if count == 1 {
            Ok(())
        } else {
            Err(StoreError::NotExisting)
        }
    }

    fn get_artist_shows(
        &mut self,
        the_artist_id: ArtistId,
    ) -> Result<Vec<models::ShowWithVenue>, StoreError> {
        use schema::shows::dsl::*;

        Ok(shows
            .inner_join(schema::venues::table)
            .filter(artist_id.eq(the_artist_id))
            .order_by((start_time.asc(), id.asc()))
            .select((models::Show::as_select(), models::VenueRef::as_select()))
            .load::<(models::Show, models::VenueRef)>(&mut self.connection)?
            .into_iter()
            .map(|(show, venue)| models::ShowWithVenue { show, venue })
            .collect())
    }

    fn get_shows(&mut self) -> Result<Vec<models::Show>, StoreError> {
        use schema::shows::dsl::*;

        shows
            .order_by((start_time.asc(), id.asc()))
            .select(models::Show::as_select())
            .load::<models::Show>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn get_show_listing(&mut self) -> Result<Vec<models::FullShow>, StoreError> {
        use schema::shows::dsl::*;

        Ok(shows
            .inner_join(schema::artists::table)
            .inner_join(schema::venues::table)
            .order_by((start_time.asc(), id.asc()))
            .select((
                models::Show::as_select(),
                models::ArtistRef::as_select(),
                models::VenueRef::as_select(),
            ))
            .load::<(models::Show, models::ArtistRef, models::VenueRef)>(&mut self.connection)?
            .into_iter()
            .map(|(show, artist, venue)| models::FullShow {
                show,
                artist,
                venue,
            })
            .collect())
    }

    fn create_show(&mut self, show: models::NewShow) -> Result<ShowId, StoreError> {
        self.connection
            .transaction(|connection| insert_show_checked(&show, connection))
    }

    fn import_directory(
        &mut self,
        contents: models::DirectoryContents,
    ) -> Result<(), StoreError> {
        self.connection.transaction(|connection| {
            let mut venue_ids: HashMap<i32, VenueId> = HashMap::new();
            for (key, venue) in contents.venues.iter() {
                let new_id = diesel::insert_into(schema::venues::table)
                    .values(venue)
                    .returning(schema::venues::id)
                    .get_result::<VenueId>(connection)?;
                venue_ids.insert(*key, new_id);
            }

            let mut artist_ids: HashMap<i32, ArtistId> = HashMap::new();
            for (key, artist) in contents.artists.iter() {
                let new_id = diesel::insert_into(schema::artists::table)
                    .values(artist)
                    .returning(schema::artists::id)
                    .get_result::<ArtistId>(connection)?;
                artist_ids.insert(*key, new_id);
            }

            for show in contents.shows.iter() {
                let new_show = models::NewShow {
                    artist_id: *artist_ids.get(&show.artist_key).ok_or_else(|| {
                        StoreError::InvalidInputData(format!(
                            "Show references unknown artist {}",
                            show.artist_key
                        ))
                    })?,
                    venue_id: *venue_ids.get(&show.venue_key).ok_or_else(|| {
                        StoreError::InvalidInputData(format!(
                            "Show references unknown venue {}",
                            show.venue_key
                        ))
                    })?,
                    start_time: show.start_time,
                };
                insert_show_checked(&new_show, connection)?;
            }

            Ok(())
        })
    }
}
