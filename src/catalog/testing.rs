use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::{
        atomic::{
            AtomicBool,
            AtomicUsize,
            Ordering,
        },
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{
    models::{
        Categories,
        StatEntry,
    },
    source::{
        CatalogSource,
        ChainNode,
        RecordPayload,
        SpeciesPayload,
        SummaryListing,
    },
};
use crate::core::DexError;

/// In-memory catalog for tests. Entry `i` is named `mon-{i}` with id `i + 1`.
#[derive(Default)]
pub struct FakeSource {
    pub names: Vec<String>,
    pub records: HashMap<String, RecordPayload>,
    pub species: HashMap<String, SpeciesPayload>,
    pub chains: HashMap<String, ChainNode>,
    pub failing_records: HashSet<String>,
    pub held_record: Option<(String, Arc<Notify>)>,
    pub fail_listing: AtomicBool,
    pub list_calls: AtomicUsize,
    pub records_started: AtomicUsize,
    pub records_finished: AtomicUsize,
    pub species_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_entries(count: usize) -> Self {
        let mut source = Self::default();
        for i in 0..count {
            let name = format!("mon-{i}");
            source.records.insert(name.clone(), record(&name, i as u32 + 1, &["fire", "flying"]));
            source.names.push(name);
        }
        source
    }

    pub fn fail_record(&mut self, name: &str) {
        self.failing_records.insert(name.to_string());
    }

    /// Makes the record lookup for `name` wait until `gate` is notified.
    pub fn hold_record(&mut self, name: &str, gate: Arc<Notify>) {
        self.held_record = Some((name.to_string(), gate));
    }
}

pub fn record(name: &str, id: u32, categories: &[&str]) -> RecordPayload {
    RecordPayload {
        id,
        name: name.to_string(),
        height: 17,
        weight: 905,
        base_experience: 267,
        image_url: Some(format!("https://example.test/{id}.png")),
        categories: Categories::new(categories.iter().map(|c| c.to_string()).collect()),
        stats: vec![
            StatEntry { label: "hp".to_string(), value: 78 },
            StatEntry { label: "special attack".to_string(), value: 109 },
        ],
        abilities: vec!["blaze".to_string()],
        species_name: Some(name.to_string()),
    }
}

fn unavailable(what: &str) -> DexError {
    DexError::HttpStatus { status: 404, url: format!("fake://{what}") }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn list_summaries(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<SummaryListing, DexError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Suspend once so overlapping callers can interleave.
        tokio::task::yield_now().await;

        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(unavailable("listing"));
        }

        let end = (offset + limit).min(self.names.len());
        let names = self.names.get(offset..end).map(|s| s.to_vec()).unwrap_or_default();
        Ok(SummaryListing { names, has_next: end < self.names.len() })
    }

    async fn get_record(&self, name: &str) -> Result<RecordPayload, DexError> {
        self.records_started.fetch_add(1, Ordering::SeqCst);
        match &self.held_record {
            Some((held, gate)) if held == name => gate.notified().await,
            _ => tokio::task::yield_now().await,
        }

        let result = if self.failing_records.contains(name) {
            Err(unavailable(name))
        } else {
            self.records.get(name).cloned().ok_or_else(|| unavailable(name))
        };
        self.records_finished.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn get_species_text(&self, name: &str) -> Result<SpeciesPayload, DexError> {
        self.species_calls.fetch_add(1, Ordering::SeqCst);
        self.species.get(name).cloned().ok_or_else(|| unavailable(name))
    }

    async fn get_chain(&self, chain_ref: &str) -> Result<ChainNode, DexError> {
        self.chains.get(chain_ref).cloned().ok_or_else(|| unavailable(chain_ref))
    }
}
