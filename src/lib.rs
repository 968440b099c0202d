pub mod api;
pub mod cli;
pub mod config;
pub mod data_provider;
pub mod logging;
pub mod media;
pub mod persistence;
pub mod ui;
