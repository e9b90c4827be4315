//! Grouping of venues by their (city, state) location

use crate::data_store::models::{Show, Venue};
use crate::data_store::VenueId;
use crate::directory::show_timing::count_upcoming;
use chrono::NaiveDateTime;
use gigbook_api_types::{LocationGroup, VenueSummary};
use std::collections::{BTreeMap, HashMap};

/// Partition the venues into groups of equal (city, state), each venue annotated with its number
/// of upcoming shows.
///
/// `shows` may contain shows of any venues; shows of venues not in `venues` are ignored. Groups
/// are ordered by state, then city. Within a group, the order of `venues` is kept.
pub fn group_by_location(
    venues: Vec<Venue>,
    shows: &[Show],
    now: NaiveDateTime,
) -> Vec<LocationGroup> {
    let mut shows_by_venue: HashMap<VenueId, Vec<&Show>> = HashMap::new();
    for show in shows {
        shows_by_venue.entry(show.venue_id).or_default().push(show);
    }

    let mut groups: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for venue in venues {
        groups
            .entry((venue.state.label().to_owned(), venue.city))
            .or_default()
            .push(VenueSummary {
                id: venue.id,
                num_upcoming_shows: shows_by_venue
                    .get(&venue.id)
                    .map(|venue_shows| count_upcoming(venue_shows.iter().copied(), now))
                    .unwrap_or(0),
                name: venue.name,
            });
    }

    groups
        .into_iter()
        .map(|((state, city), venues)| LocationGroup {
            city,
            state,
            venues,
        })
        .collect()
}
