//! Classification of shows as past or upcoming, relative to the current wall-clock time

use chrono::NaiveDateTime;

/// Format of show start times in the past/upcoming show lists of venue and artist details
pub const SHOW_TIME_DISPLAY_FORMAT: &str = "%m/%d/%Y, %H:%M";

/// Anything that takes place at a specific (naive, local) point in time
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

/// Classify a show's start time relative to `now`.
///
/// A show starting exactly at `now` is neither past nor upcoming, so `None` is returned.
pub fn classify(start_time: NaiveDateTime, now: NaiveDateTime) -> Option<ShowTiming> {
    if start_time < now {
        Some(ShowTiming::Past)
    } else if start_time > now {
        Some(ShowTiming::Upcoming)
    } else {
        None
    }
}

pub fn count_upcoming<'a, T: Scheduled + 'a>(
    shows: impl IntoIterator<Item = &'a T>,
    now: NaiveDateTime,
) -> usize {
    shows
        .into_iter()
        .filter(|show| classify(show.start_time(), now) == Some(ShowTiming::Upcoming))
        .count()
}

#[derive(Debug)]
pub struct ClassifiedShows<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Split the given shows into past and upcoming shows, preserving their order.
///
/// Shows starting exactly at `now` are contained in neither list.
pub fn classify_shows<T: Scheduled>(
    shows: impl IntoIterator<Item = T>,
    now: NaiveDateTime,
) -> ClassifiedShows<T> {
    let mut result = ClassifiedShows {
        past: Vec::new(),
        upcoming: Vec::new(),
    };
    for show in shows {
        match classify(show.start_time(), now) {
            Some(ShowTiming::Past) => result.past.push(show),
            Some(ShowTiming::Upcoming) => result.upcoming.push(show),
            None => {}
        }
    }
    result
}

/// The current local wall-clock time, without timezone information, like the stored show times
pub fn current_time() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn format_show_time(start_time: NaiveDateTime) -> String {
    start_time.format(SHOW_TIME_DISPLAY_FORMAT).to_string()
}
