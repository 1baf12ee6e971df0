pub mod app;
pub mod card;
pub mod detail_view;
pub mod palette;

pub use app::{
    DexApp,
    Route,
};
