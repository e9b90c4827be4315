use crate::cli_error::CliError;
use crate::data_store::models::{DirectoryContents, ImportedShow};
use crate::data_store::{get_store_from_env, GigbookStore, GigbookStoreFacade};
use crate::directory::booking::{parse_start_time, START_TIME_FORMAT};
use crate::directory::validation::{validate_artist, validate_venue};
use gigbook_api_types::{ArtistData, VenueData};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// File format of directory imports and exports.
///
/// The ids of venues and artists are only used for referencing them from the shows within the same
/// file. New ids are assigned when importing.
#[derive(Serialize, Deserialize, Debug, Default)]
struct SavedDirectory {
    #[serde(default)]
    venues: Vec<SavedVenue>,
    #[serde(default)]
    artists: Vec<SavedArtist>,
    #[serde(default)]
    shows: Vec<SavedShow>,
}

#[derive(Serialize, Deserialize, Debug)]
struct SavedVenue {
    id: i32,
    #[serde(flatten)]
    data: VenueData,
}

#[derive(Serialize, Deserialize, Debug)]
struct SavedArtist {
    id: i32,
    #[serde(flatten)]
    data: ArtistData,
}

#[derive(Serialize, Deserialize, Debug)]
struct SavedShow {
    artist_id: i32,
    venue_id: i32,
    /// Formatted as `YYYY-MM-DD HH:MM:SS`
    start_time: String,
}

pub fn load_directory_from_file(path: &PathBuf) -> Result<(), CliError> {
    let data_store_pool = get_store_from_env()?;
    let mut data_store = data_store_pool.get_facade()?;

    let f = File::open(path).map_err(|e| {
        CliError::FileError(format!("Could not open {:?} for reading: {}", path, e))
    })?;
    let data: SavedDirectory = serde_json::from_reader(BufReader::new(f))?;

    import_directory(&mut *data_store, data)
}

pub fn export_directory_to_file(path: &PathBuf) -> Result<(), CliError> {
    let data_store_pool = get_store_from_env()?;
    let mut data_store = data_store_pool.get_facade()?;

    let data = collect_directory(&mut *data_store)?;

    let f = File::create(path).map_err(|e| {
        CliError::FileError(format!(
            "Could not create or open {:?} for writing: {}",
            path, e
        ))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(f), &data)?;
    info!(
        "Exported {} venues, {} artists and {} shows to {:?}",
        data.venues.len(),
        data.artists.len(),
        data.shows.len(),
        path
    );

    Ok(())
}

/// Validate the loaded data and import it into the store in a single transaction
fn import_directory(
    data_store: &mut dyn GigbookStoreFacade,
    data: SavedDirectory,
) -> Result<(), CliError> {
    let venues = data
        .venues
        .into_iter()
        .map(|v| {
            let id = v.id;
            validate_venue(v.data)
                .map(|venue| (id, venue))
                .map_err(|e| CliError::DataError(format!("Venue {}: {}", id, e)))
        })
        .collect::<Result<Vec<_>, CliError>>()?;
    let artists = data
        .artists
        .into_iter()
        .map(|a| {
            let id = a.id;
            validate_artist(a.data)
                .map(|artist| (id, artist))
                .map_err(|e| CliError::DataError(format!("Artist {}: {}", id, e)))
        })
        .collect::<Result<Vec<_>, CliError>>()?;
    let shows = data
        .shows
        .into_iter()
        .map(|s| {
            Ok(ImportedShow {
                artist_key: s.artist_id,
                venue_key: s.venue_id,
                start_time: parse_start_time(&s.start_time)
                    .map_err(|e| CliError::DataError(e.to_string()))?,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let (num_venues, num_artists, num_shows) = (venues.len(), artists.len(), shows.len());
    data_store.import_directory(DirectoryContents {
        venues,
        artists,
        shows,
    })?;
    info!(
        "Imported {} venues, {} artists and {} shows",
        num_venues, num_artists, num_shows
    );
    Ok(())
}

fn collect_directory(data_store: &mut dyn GigbookStoreFacade) -> Result<SavedDirectory, CliError> {
    Ok(SavedDirectory {
        venues: data_store
            .get_venues()?
            .into_iter()
            .map(|v| SavedVenue {
                id: v.id,
                data: v.into(),
            })
            .collect(),
        artists: data_store
            .get_artists()?
            .into_iter()
            .map(|a| SavedArtist {
                id: a.id,
                data: a.into(),
            })
            .collect(),
        shows: data_store
            .get_shows()?
            .into_iter()
            .map(|s| SavedShow {
                artist_id: s.artist_id,
                venue_id: s.venue_id,
                start_time: s.start_time.format(START_TIME_FORMAT).to_string(),
            })
            .collect(),
    })
}
