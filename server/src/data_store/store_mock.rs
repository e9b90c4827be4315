use crate::data_store::models::{
    Artist, ArtistRef, DirectoryContents, FullShow, NewArtist, NewShow, NewVenue, Show,
    ShowWithArtist, ShowWithVenue, Venue, VenueRef,
};
use crate::data_store::{ArtistId, GigbookStore, GigbookStoreFacade, ShowId, StoreError, VenueId};
use crate::directory::booking::find_conflict;
use std::collections::HashMap;
use std::sync::Mutex;

/**
 * A mock [GigbookStore] implementation for testing.
 *
 * The simulated database consists of the [StoreMockData] structure with vectors of entities. These
 * can be directly modified by the tests.
 *
 * The mock checks entity existence and booking conflicts like the database does. In addition, the
 * [StoreMockData.next_error] attribute can be set to simulate a database error.
 */
#[derive(Default)]
pub struct StoreMock {
    pub data: Mutex<StoreMockData>,
}

impl GigbookStore for StoreMock {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn GigbookStoreFacade + 'a>, StoreError> {
        Ok(Box::new(StoreMockFacade { store: self }))
    }
}

#[derive(Default)]
pub struct StoreMockData {
    pub venues: Vec<Venue>,
    pub artists: Vec<Artist>,
    pub shows: Vec<Show>,
    /// If not none, the next call to a store facade method will return this error.
    pub next_error: Option<StoreError>,
}

impl StoreMockData {
    fn next_venue_id(&self) -> VenueId {
        self.venues.iter().map(|v| v.id).max().unwrap_or(0) + 1
    }

    fn next_artist_id(&self) -> ArtistId {
        self.artists.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    fn next_show_id(&self) -> ShowId {
        self.shows.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    fn artist_ref(&self, artist_id: ArtistId) -> Result<ArtistRef, StoreError> {
        self.artists
            .iter()
            .find(|a| a.id == artist_id)
            .map(ArtistRef::from)
            .ok_or_else(|| {
                StoreError::InvalidDataInDatabase(format!("Missing artist {}", artist_id))
            })
    }

    fn venue_ref(&self, venue_id: VenueId) -> Result<VenueRef, StoreError> {
        self.venues
            .iter()
            .find(|v| v.id == venue_id)
            .map(VenueRef::from)
            .ok_or_else(|| StoreError::InvalidDataInDatabase(format!("Missing venue {}", venue_id)))
    }

    fn sorted_shows(&self) -> Vec<Show> {
        let mut result = self.shows.clone();
        result.sort_by_key(|s| (s.start_time, s.id));
        result
    }

    fn insert_show(&mut self, show: NewShow) -> Result<ShowId, StoreError> {
        if !self.artists.iter().any(|a| a.id == show.artist_id)
            || !self.venues.iter().any(|v| v.id == show.venue_id)
        {
            return Err(StoreError::InvalidInputData(
                "ForeignKeyViolation".to_owned(),
            ));
        }
        let venue_shows: Vec<Show> = self
            .shows
            .iter()
            .filter(|s| s.venue_id == show.venue_id)
            .cloned()
            .collect();
        let artist_shows: Vec<Show> = self
            .shows
            .iter()
            .filter(|s| s.artist_id == show.artist_id)
            .cloned()
            .collect();
        if let Some(conflict) = find_conflict(&show, &venue_shows, &artist_shows) {
            return Err(StoreError::BookingConflict(conflict));
        }
        let id = self.next_show_id();
        self.shows.push(Show {
            id,
            artist_id: show.artist_id,
            venue_id: show.venue_id,
            start_time: show.start_time,
        });
        Ok(id)
    }
}

struct StoreMockFacade<'a> {
    store: &'a StoreMock,
}

impl StoreMockFacade<'_> {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreMockData>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        Ok(data)
    }
}

impl GigbookStoreFacade for StoreMockFacade<'_> {
    fn get_venues(&mut self) -> Result<Vec<Venue>, StoreError> {
        let data = self.lock()?;
        let mut result = data.venues.clone();
        result.sort_by_key(|v| v.id);
        Ok(result)
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<Venue, StoreError> {
        let data = self.lock()?;
        data.venues
            .iter()
            .find(|v| v.id == venue_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn create_venue(&mut self, venue: NewVenue) -> Result<VenueId, StoreError> {
        let mut data = self.lock()?;
        let id = data.next_venue_id();
        data.venues.push(venue.into_venue(id));
        Ok(id)
    }

    fn update_venue(&mut self, venue_id: VenueId, venue: NewVenue) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let existing = data
            .venues
            .iter_mut()
            .find(|v| v.id == venue_id)
            .ok_or(StoreError::NotExisting)?;
        *existing = venue.into_venue(venue_id);
        Ok(())
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        if !data.venues.iter().any(|v| v.id == venue_id) {
            return Err(StoreError::NotExisting);
        }
        data.venues.retain(|v| v.id != venue_id);
        data.shows.retain(|s| s.venue_id != venue_id);
        Ok(())
    }

    fn get_venue_shows(&mut self, venue_id: VenueId) -> Result<Vec<ShowWithArtist>, StoreError> {
        let data = self.lock()?;
        data.sorted_shows()
            .into_iter()
            .filter(|s| s.venue_id == venue_id)
            .map(|show| {
                Ok(ShowWithArtist {
                    artist: data.artist_ref(show.artist_id)?,
                    show,
                })
            })
            .collect()
    }

    fn get_artists(&mut self) -> Result<Vec<Artist>, StoreError> {
        let data = self.lock()?;
        let mut result = data.artists.clone();
        result.sort_by_key(|a| a.id);
        Ok(result)
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<Artist, StoreError> {
        let data = self.lock()?;
        data.artists
            .iter()
            .find(|a| a.id == artist_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn create_artist(&mut self, artist: NewArtist) -> Result<ArtistId, StoreError> {
        let mut data = self.lock()?;
        let id = data.next_artist_id();
        data.artists.push(artist.into_artist(id));
        Ok(id)
    }

    fn update_artist(&mut self, artist_id: ArtistId, artist: NewArtist) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let existing = data
            .artists
            .iter_mut()
            .find(|a| a.id == artist_id)
            .ok_or(StoreError::NotExisting)?;
        *existing = artist.into_artist(artist_id);
        Ok(())
    }

    fn get_artist_shows(&mut self, artist_id: ArtistId) -> Result<Vec<ShowWithVenue>, StoreError> {
        let data = self.lock()?;
        data.sorted_shows()
            .into_iter()
            .filter(|s| s.artist_id == artist_id)
            .map(|show| {
                Ok(ShowWithVenue {
                    venue: data.venue_ref(show.venue_id)?,
                    show,
                })
            })
            .collect()
    }

    fn get_shows(&mut self) -> Result<Vec<Show>, StoreError> {
        let data = self.lock()?;
        Ok(data.sorted_shows())
    }

    fn get_show_listing(&mut self) -> Result<Vec<FullShow>, StoreError> {
        let data = self.lock()?;
        data.sorted_shows()
            .into_iter()
            .map(|show| {
                Ok(FullShow {
                    artist: data.artist_ref(show.artist_id)?,
                    venue: data.venue_ref(show.venue_id)?,
                    show,
                })
            })
            .collect()
    }

    fn create_show(&mut self, show: NewShow) -> Result<ShowId, StoreError> {
        let mut data = self.lock()?;
        data.insert_show(show)
    }

    fn import_directory(&mut self, contents: DirectoryContents) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        // Work on a copy to leave the data untouched on errors, like a rolled back transaction
        let mut new_data = StoreMockData {
            venues: data.venues.clone(),
            artists: data.artists.clone(),
            shows: data.shows.clone(),
            next_error: None,
        };

        let mut venue_ids: HashMap<i32, VenueId> = HashMap::new();
        for (key, venue) in contents.venues {
            let id = new_data.next_venue_id();
            new_data.venues.push(venue.into_venue(id));
            venue_ids.insert(key, id);
        }
        let mut artist_ids: HashMap<i32, ArtistId> = HashMap::new();
        for (key, artist) in contents.artists {
            let id = new_data.next_artist_id();
            new_data.artists.push(artist.into_artist(id));
            artist_ids.insert(key, id);
        }
        for show in contents.shows {
            new_data.insert_show(NewShow {
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
            })?;
        }

        *data = new_data;
        Ok(())
    }
}
