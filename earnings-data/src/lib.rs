pub mod config;
pub mod currency;
pub mod export;
pub mod mock;
pub mod models;
pub mod state;
pub mod stats;

pub use config::*;
pub use models::*;
pub use stats::*;
