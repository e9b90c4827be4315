mod data_store;

pub mod cli;
pub mod cli_error;
mod directory;
mod setup;
pub mod web;
