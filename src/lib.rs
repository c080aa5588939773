// Church Events Library
// Filtering, evaluation windows and countdowns for the events pages

pub mod error;
pub mod models;
pub mod services;
pub mod utils;
