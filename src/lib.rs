slint::include_modules!();

pub mod backend;
pub mod callbacks;
pub mod config;
pub mod events;
pub mod geo;
pub mod net;
pub mod ops;
pub mod state;
pub mod tiles;
