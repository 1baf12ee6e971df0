pub mod catalog;
pub mod config;
pub mod core;
pub mod gui;

pub use catalog::{
    CatalogLoader,
    CatalogSource,
    DetailAggregator,
    PokeApiClient,
};
pub use config::AppSettings;
pub use crate::core::DexError;
