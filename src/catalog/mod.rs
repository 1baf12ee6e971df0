pub mod api;
pub mod assets;
pub mod detail;
pub mod loader;
pub mod models;
pub mod source;

#[cfg(test)]
pub mod testing;

pub use api::PokeApiClient;
pub use detail::DetailAggregator;
pub use loader::{
    CatalogLoader,
    LoadOutcome,
    PageCommit,
};
pub use models::{
    Categories,
    DetailBase,
    DetailEvent,
    DetailRecord,
    StatEntry,
    SummaryItem,
};
pub use source::CatalogSource;
