pub mod config;
pub mod datastore;
pub mod datetime;
pub mod logbook;
pub mod tags;
pub mod task;
