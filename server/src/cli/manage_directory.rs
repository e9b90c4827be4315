use crate::cli_error::CliError;
use crate::data_store::{get_store_from_env, GigbookStore};
use crate::directory::locations::group_by_location;
use crate::directory::show_timing::current_time;

/// Print all venues, grouped by their location, with the number of upcoming shows of each venue
pub fn print_venue_list() -> Result<(), CliError> {
    let data_store_pool = get_store_from_env()?;
    let mut data_store = data_store_pool.get_facade()?;

    let venues = data_store.get_venues()?;
    let shows = data_store.get_shows()?;
    let groups = group_by_location(venues, &shows, current_time());

    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
        .set_header(vec!["state", "city", "id", "name", "upcoming shows"])
        .add_rows(groups.into_iter().flat_map(|group| {
            let city = group.city;
            let state = group.state;
            group.venues.into_iter().map(move |venue| {
                [
                    state.clone(),
                    city.clone(),
                    venue.id.to_string(),
                    venue.name,
                    venue.num_upcoming_shows.to_string(),
                ]
            })
        }));

    println!("{table}");
    Ok(())
}
