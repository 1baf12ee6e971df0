use std::sync::Arc;

use tracing::{
    debug,
    warn,
};

use super::{
    models::{
        fallback_description,
        DetailBase,
        DetailEvent,
        DetailRecord,
    },
    source::{
        CatalogSource,
        ChainNode,
        DescriptionEntry,
        SpeciesPayload,
    },
};
use crate::core::DexError;

const DESCRIPTION_LANGUAGE: &str = "en";

/// Assembles the detail record for one key.
///
/// An aggregator is consumed by [`DetailAggregator::fetch_detail`], so each
/// in-flight fetch owns its record outright.
pub struct DetailAggregator {
    source: Arc<dyn CatalogSource>,
    key: String,
}

impl DetailAggregator {
    pub fn new(source: Arc<dyn CatalogSource>, key: impl Into<String>) -> Self {
        Self { source, key: key.into() }
    }

    /// Runs the whole fetch, emitting `Base` as soon as the primary record
    /// is parsed and `Complete` once description and chain have settled.
    /// A failed primary record emits only `NotFound`.
    pub async fn fetch_detail<F>(self, mut emit: F) -> Result<DetailRecord, DexError>
    where
        F: FnMut(DetailEvent),
    {
        let base = match self.fetch_base().await {
            Ok(base) => base,
            Err(e) => {
                emit(DetailEvent::NotFound(self.key.clone()));
                return Err(e);
            }
        };

        emit(DetailEvent::Base(base.clone()));

        let record = self.complete(base).await;
        emit(DetailEvent::Complete(record.clone()));
        Ok(record)
    }

    async fn fetch_base(&self) -> Result<DetailBase, DexError> {
        let record = self.source.get_record(&self.key).await.map_err(|e| {
            warn!(key = %self.key, "primary record failed: {e}");
            DexError::RecordNotFound(self.key.clone())
        })?;

        Ok(DetailBase {
            name: record.name,
            id: record.id,
            height: record.height,
            weight: record.weight,
            base_experience: record.base_experience,
            image_url: record.image_url,
            categories: record.categories,
            stats: record.stats,
            abilities: record.abilities,
            species_name: record.species_name,
        })
    }

    /// Fills in description and relation chain. Never fails; each part
    /// degrades to its own fallback.
    async fn complete(&self, base: DetailBase) -> DetailRecord {
        let species_key = base.species_name.clone().unwrap_or_else(|| self.key.clone());

        let species = self.source.get_species_text(&species_key).await;
        if let Err(e) = &species {
            warn!(key = %species_key, "species record failed: {e}");
        }

        let description = species
            .as_ref()
            .ok()
            .and_then(|s| english_description(&s.entries))
            .unwrap_or_else(|| {
                debug!("{}", DexError::DescriptionUnavailable(species_key.clone()));
                fallback_description(&base.categories)
            });

        let relation_chain = match species {
            Ok(payload) => self.relation_chain(&species_key, payload).await,
            Err(_) => Vec::new(),
        };

        DetailRecord { base, description, relation_chain }
    }

    async fn relation_chain(&self, species_key: &str, payload: SpeciesPayload) -> Vec<String> {
        let Some(chain_ref) = payload.chain_ref else {
            debug!("{}", DexError::ChainUnavailable(species_key.to_string()));
            return Vec::new();
        };

        match self.source.get_chain(&chain_ref).await {
            Ok(root) => first_branch_path(&root),
            Err(e) => {
                warn!(%chain_ref, "{}: {e}", DexError::ChainUnavailable(species_key.to_string()));
                Vec::new()
            }
        }
    }
}

/// First English entry with line and form feeds replaced by spaces.
pub fn english_description(entries: &[DescriptionEntry]) -> Option<String> {
    entries
        .iter()
        .find(|entry| entry.language == DESCRIPTION_LANGUAGE)
        .map(|entry| entry.text.replace(['\n', '\u{000C}'], " "))
}

/// Names along the chain, following only the first child at each node.
///
/// Sibling branches are dropped, so a branching family (e.g. eevee) yields
/// a single path.
pub fn first_branch_path(root: &ChainNode) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(root);
    while let Some(node) = current {
        path.push(node.species_name.clone());
        current = node.children.first();
    }
    path
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::catalog::testing::{
        record,
        FakeSource,
    };

    const CHAIN_URL: &str = "https://pokeapi.co/api/v2/evolution-chain/2/";

    fn entry(language: &str, text: &str) -> DescriptionEntry {
        DescriptionEntry { language: language.to_string(), text: text.to_string() }
    }

    fn charizard_source() -> FakeSource {
        let mut source = FakeSource::default();
        source.records.insert("charizard".to_string(), record("charizard", 6, &["fire", "flying"]));
        source.species.insert("charizard".to_string(), SpeciesPayload {
            entries: vec![
                entry("ja", "テキスト"),
                entry("en", "Spits fire that\nis hot enough\u{000C}to melt boulders."),
                entry("en", "Second english entry."),
            ],
            chain_ref: Some(CHAIN_URL.to_string()),
        });
        source.chains.insert(
            CHAIN_URL.to_string(),
            ChainNode::with_children("charmander", vec![ChainNode::with_children(
                "charmeleon",
                vec![ChainNode::leaf("charizard")],
            )]),
        );
        source
    }

    async fn run(source: FakeSource, key: &str) -> (Result<DetailRecord, DexError>, Vec<DetailEvent>) {
        let mut events = Vec::new();
        let result =
            DetailAggregator::new(Arc::new(source), key).fetch_detail(|e| events.push(e)).await;
        (result, events)
    }

    #[tokio::test]
    async fn test_two_phase_emission() {
        let (result, events) = run(charizard_source(), "charizard").await;
        let record = result.unwrap();

        assert_eq!(events.len(), 2);
        match &events[0] {
            DetailEvent::Base(base) => {
                assert_eq!(base.name, "charizard");
                assert_eq!(base.height, 17);
                assert_eq!(base.categories.primary(), "fire");
            }
            other => panic!("Expected Base, got {:?}", other),
        }
        assert_eq!(events[1], DetailEvent::Complete(record.clone()));

        assert_eq!(record.description, "Spits fire that is hot enough to melt boulders.");
        assert_eq!(record.relation_chain, vec!["charmander", "charmeleon", "charizard"]);
    }

    #[tokio::test]
    async fn test_base_emitted_before_species_lookup() {
        let source = Arc::new(charizard_source());
        let mut species_calls_at_base = None;
        let mut events = Vec::new();

        DetailAggregator::new(source.clone(), "charizard")
            .fetch_detail(|e| {
                if let DetailEvent::Base(_) = &e {
                    species_calls_at_base = Some(source.species_calls.load(Ordering::SeqCst));
                }
                events.push(e);
            })
            .await
            .unwrap();

        assert_eq!(species_calls_at_base, Some(0));
        assert_eq!(source.species_calls.load(Ordering::SeqCst), 1);
        assert!(matches!(events.as_slice(), [DetailEvent::Base(_), DetailEvent::Complete(_)]));
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let (result, events) = run(charizard_source(), "missingmon").await;

        assert!(matches!(result, Err(DexError::RecordNotFound(key)) if key == "missingmon"));
        assert_eq!(events, vec![DetailEvent::NotFound("missingmon".to_string())]);
    }

    #[tokio::test]
    async fn test_description_failure_synthesises_text() {
        let mut source = charizard_source();
        source.species.clear();

        let (result, events) = run(source, "charizard").await;
        let record = result.unwrap();

        assert_eq!(record.description, "A fire/flying type Pokémon.");
        assert!(record.relation_chain.is_empty());
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn test_no_english_entry_synthesises_text() {
        let mut source = charizard_source();
        if let Some(species) = source.species.get_mut("charizard") {
            species.entries.retain(|e| e.language != "en");
        }

        let record = run(source, "charizard").await.0.unwrap();
        assert_eq!(record.description, "A fire/flying type Pokémon.");
        assert_eq!(record.relation_chain.len(), 3);
    }

    #[tokio::test]
    async fn test_chain_failure_leaves_chain_empty() {
        let mut source = charizard_source();
        source.chains.clear();

        let record = run(source, "charizard").await.0.unwrap();
        assert!(record.relation_chain.is_empty());
        assert_eq!(record.description, "Spits fire that is hot enough to melt boulders.");
    }

    #[tokio::test]
    async fn test_species_key_follows_record() {
        let mut source = charizard_source();
        let mut form = record("charizard-mega-x", 10034, &["fire", "dragon"]);
        form.species_name = Some("charizard".to_string());
        source.records.insert("charizard-mega-x".to_string(), form);

        let record = run(source, "charizard-mega-x").await.0.unwrap();
        assert_eq!(record.base.categories.joined("/"), "fire/dragon");
        assert_eq!(record.description, "Spits fire that is hot enough to melt boulders.");
    }

    #[test]
    fn test_branching_chain_keeps_first_path() {
        let root = ChainNode::with_children("eevee", vec![
            ChainNode::leaf("vaporeon"),
            ChainNode::leaf("jolteon"),
            ChainNode::leaf("flareon"),
        ]);
        assert_eq!(first_branch_path(&root), vec!["eevee", "vaporeon"]);

        let root = ChainNode::with_children("oddish", vec![ChainNode::with_children(
            "gloom",
            vec![ChainNode::leaf("vileplume"), ChainNode::leaf("bellossom")],
        )]);
        assert_eq!(first_branch_path(&root), vec!["oddish", "gloom", "vileplume"]);

        assert_eq!(first_branch_path(&ChainNode::leaf("tauros")), vec!["tauros"]);
    }

    #[test]
    fn test_english_description_selection() {
        assert_eq!(english_description(&[entry("de", "Text")]), None);
        assert_eq!(
            english_description(&[entry("fr", "Texte"), entry("en", "A\nB")]).as_deref(),
            Some("A B")
        );
    }
}
