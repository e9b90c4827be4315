//! Domain logic of the directory, independent of the web framework and the database
//!
//! Most functions in this module are pure functions on data models. Only [booking::book_show]
//! interacts with a [crate::data_store::GigbookStoreFacade], which is passed in explicitly.

pub mod booking;
pub mod enumerations;
pub mod locations;
pub mod search;
pub mod show_timing;
pub mod validation;
