use async_trait::async_trait;

use super::models::{
    Categories,
    StatEntry,
};
use crate::core::DexError;

/// One page of the remote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryListing {
    pub names: Vec<String>,
    pub has_next: bool,
}

/// Primary record of a single entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPayload {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: u32,
    pub image_url: Option<String>,
    pub categories: Categories,
    pub stats: Vec<StatEntry>,
    pub abilities: Vec<String>,
    pub species_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionEntry {
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesPayload {
    pub entries: Vec<DescriptionEntry>,
    pub chain_ref: Option<String>,
}

/// A node of the relation chain tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainNode {
    pub species_name: String,
    pub children: Vec<ChainNode>,
}

impl ChainNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self { species_name: name.into(), children: Vec::new() }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<ChainNode>) -> Self {
        Self { species_name: name.into(), children }
    }
}

/// The remote data service, as the loader and aggregator see it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_summaries(&self, offset: usize, limit: usize)
        -> Result<SummaryListing, DexError>;

    async fn get_record(&self, name: &str) -> Result<RecordPayload, DexError>;

    async fn get_species_text(&self, name: &str) -> Result<SpeciesPayload, DexError>;

    async fn get_chain(&self, chain_ref: &str) -> Result<ChainNode, DexError>;
}
