pub mod assets;
pub mod config;
pub mod errors;
pub mod hls;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;
pub mod web;
