// Module exports for models

pub mod countdown;
pub mod event;
pub mod filter;
pub mod settings;
