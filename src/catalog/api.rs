use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{
    models::{
        Categories,
        StatEntry,
    },
    source::{
        CatalogSource,
        ChainNode,
        DescriptionEntry,
        RecordPayload,
        SpeciesPayload,
        SummaryListing,
    },
};
use crate::{
    config::AppSettings,
    core::{
        http::{
            get_json,
            http_client,
        },
        DexError,
    },
};

#[derive(Debug, Deserialize, Default)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type", default)]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct StatSlot {
    #[serde(default)]
    pub base_stat: u32,
    #[serde(default)]
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub ability: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RecordResponse {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub sprites: Option<Sprites>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub species: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub struct FlavorTextEntry {
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub language: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct ChainReference {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeciesResponse {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub evolution_chain: Option<ChainReference>,
}

#[derive(Debug, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Deserialize)]
pub struct ChainResponse {
    pub chain: ChainLink,
}

impl From<ListResponse> for SummaryListing {
    fn from(resp: ListResponse) -> Self {
        Self {
            names: resp.results.into_iter().map(|r| r.name).collect(),
            has_next: resp.next.is_some(),
        }
    }
}

impl From<RecordResponse> for RecordPayload {
    fn from(resp: RecordResponse) -> Self {
        let categories = Categories::new(resp.types.into_iter().map(|t| t.kind.name).collect());

        let stats = resp
            .stats
            .into_iter()
            .map(|s| StatEntry { label: s.stat.name.replacen('-', " ", 1), value: s.base_stat })
            .collect();

        Self {
            id: resp.id,
            name: resp.name,
            height: resp.height,
            weight: resp.weight,
            base_experience: resp.base_experience.unwrap_or_default(),
            image_url: resp.sprites.and_then(|s| s.front_default),
            categories,
            stats,
            abilities: resp
                .abilities
                .into_iter()
                .map(|a| a.ability.name)
                .filter(|n| !n.is_empty())
                .collect(),
            species_name: resp.species.map(|s| s.name).filter(|n| !n.is_empty()),
        }
    }
}

impl From<SpeciesResponse> for SpeciesPayload {
    fn from(resp: SpeciesResponse) -> Self {
        Self {
            entries: resp
                .flavor_text_entries
                .into_iter()
                .map(|e| DescriptionEntry { language: e.language.name, text: e.flavor_text })
                .collect(),
            chain_ref: resp.evolution_chain.map(|c| c.url).filter(|u| !u.is_empty()),
        }
    }
}

impl From<ChainLink> for ChainNode {
    fn from(link: ChainLink) -> Self {
        Self {
            species_name: link.species.name,
            children: link.evolves_to.into_iter().map(ChainNode::from).collect(),
        }
    }
}

/// HTTP implementation of [`CatalogSource`] for PokéAPI-shaped services.
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(settings: &AppSettings) -> Result<Self, DexError> {
        let client = http_client(Duration::from_secs(settings.request_timeout_secs))?;
        Ok(Self { client, base_url: settings.api_base_url.clone() })
    }

    fn endpoint(&self, path: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, path, urlencoding::encode(key))
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn list_summaries(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<SummaryListing, DexError> {
        let url = format!("{}/pokemon?limit={}&offset={}", self.base_url, limit, offset);
        debug!(%url, "listing summaries");
        let resp: ListResponse = get_json(&self.client, &url).await?;
        Ok(resp.into())
    }

    async fn get_record(&self, name: &str) -> Result<RecordPayload, DexError> {
        let url = self.endpoint("pokemon", name);
        let resp: RecordResponse = get_json(&self.client, &url).await?;
        Ok(resp.into())
    }

    async fn get_species_text(&self, name: &str) -> Result<SpeciesPayload, DexError> {
        let url = self.endpoint("pokemon-species", name);
        let resp: SpeciesResponse = get_json(&self.client, &url).await?;
        Ok(resp.into())
    }

    async fn get_chain(&self, chain_ref: &str) -> Result<ChainNode, DexError> {
        let resp: ChainResponse = get_json(&self.client, chain_ref).await?;
        Ok(resp.chain.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::models::fallback_description;

    #[test]
    fn test_list_response_mapping() {
        let resp: ListResponse = serde_json::from_value(json!({
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20",
            "previous": null,
            "results": [
                { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
                { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
            ]
        }))
        .unwrap();

        let listing = SummaryListing::from(resp);
        assert_eq!(listing.names, vec!["bulbasaur", "ivysaur"]);
        assert!(listing.has_next);

        let last: ListResponse =
            serde_json::from_value(json!({ "next": null, "results": [] })).unwrap();
        assert!(!SummaryListing::from(last).has_next);
    }

    #[test]
    fn test_record_response_mapping() {
        let resp: RecordResponse = serde_json::from_value(json!({
            "id": 6,
            "name": "charizard",
            "height": 17,
            "weight": 905,
            "base_experience": 267,
            "sprites": { "front_default": "https://example.test/6.png", "back_default": null },
            "types": [
                { "slot": 1, "type": { "name": "fire", "url": "" } },
                { "slot": 2, "type": { "name": "flying", "url": "" } }
            ],
            "stats": [
                { "base_stat": 78, "effort": 0, "stat": { "name": "hp", "url": "" } },
                { "base_stat": 109, "effort": 3, "stat": { "name": "special-attack", "url": "" } }
            ],
            "abilities": [
                { "ability": { "name": "blaze", "url": "" }, "is_hidden": false, "slot": 1 },
                { "ability": { "name": "solar-power", "url": "" }, "is_hidden": true, "slot": 3 }
            ],
            "species": { "name": "charizard", "url": "" }
        }))
        .unwrap();

        let record = RecordPayload::from(resp);
        assert_eq!(record.id, 6);
        assert_eq!(record.base_experience, 267);
        assert_eq!(record.image_url.as_deref(), Some("https://example.test/6.png"));
        assert_eq!(record.categories.as_slice(), &["fire".to_string(), "flying".to_string()]);
        assert_eq!(record.stats[1], StatEntry { label: "special attack".to_string(), value: 109 });
        assert_eq!(record.abilities, vec!["blaze", "solar-power"]);
        assert_eq!(record.species_name.as_deref(), Some("charizard"));
    }

    #[test]
    fn test_record_response_missing_fields() {
        let resp: RecordResponse = serde_json::from_value(json!({
            "id": 10001,
            "name": "deoxys-attack",
            "base_experience": null,
            "sprites": { "front_default": null }
        }))
        .unwrap();

        let record = RecordPayload::from(resp);
        assert_eq!(record.base_experience, 0);
        assert_eq!(record.image_url, None);
        assert_eq!(record.categories, Categories::default());
        assert_eq!(fallback_description(&record.categories), "A normal type Pokémon.");
        assert!(record.stats.is_empty());
        assert!(record.abilities.is_empty());
        assert_eq!(record.species_name, None);
    }

    #[test]
    fn test_record_response_malformed_slots() {
        let resp: RecordResponse = serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "types": [
                { "slot": 1 },
                { "slot": 2, "type": { "name": "poison", "url": "" } }
            ],
            "stats": [{ "base_stat": 45, "effort": 0 }],
            "abilities": [{ "is_hidden": false, "slot": 1 }]
        }))
        .unwrap();

        let record = RecordPayload::from(resp);
        assert_eq!(record.categories.as_slice(), &["poison".to_string()]);
        assert_eq!(fallback_description(&record.categories), "A poison type Pokémon.");
        assert_eq!(record.stats, vec![StatEntry { label: String::new(), value: 45 }]);
        assert!(record.abilities.is_empty());
    }

    #[test]
    fn test_species_and_chain_mapping() {
        let species: SpeciesResponse = serde_json::from_value(json!({
            "flavor_text_entries": [
                { "flavor_text": "Lorem", "language": { "name": "ja", "url": "" } },
                { "flavor_text": "Spits fire\nthat is hot.", "language": { "name": "en", "url": "" } }
            ],
            "evolution_chain": { "url": "https://pokeapi.co/api/v2/evolution-chain/2/" }
        }))
        .unwrap();

        let payload = SpeciesPayload::from(species);
        assert_eq!(payload.entries.len(), 2);
        assert_eq!(payload.entries[1].language, "en");
        assert_eq!(
            payload.chain_ref.as_deref(),
            Some("https://pokeapi.co/api/v2/evolution-chain/2/")
        );

        let chain: ChainResponse = serde_json::from_value(json!({
            "id": 2,
            "chain": {
                "species": { "name": "charmander", "url": "" },
                "evolves_to": [{
                    "species": { "name": "charmeleon", "url": "" },
                    "evolves_to": [{ "species": { "name": "charizard", "url": "" }, "evolves_to": [] }]
                }]
            }
        }))
        .unwrap();

        let root = ChainNode::from(chain.chain);
        assert_eq!(root.species_name, "charmander");
        assert_eq!(root.children[0].children[0], ChainNode::leaf("charizard"));
    }

    #[test]
    fn test_endpoint_encoding() {
        let settings = AppSettings::default();
        let client = PokeApiClient::new(&settings).unwrap();
        assert_eq!(
            client.endpoint("pokemon", "mr. mime"),
            "https://pokeapi.co/api/v2/pokemon/mr.%20mime"
        );
    }
}
