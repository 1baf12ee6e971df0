pub const FALLBACK_CATEGORY: &str = "normal";

/// One entry of the catalog list, as shown on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub name: String,
    pub id: u32,
    pub category: String,
}

impl SummaryItem {
    /// Stand-in for an entry whose record lookup failed.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self { name: name.into(), id: 1, category: FALLBACK_CATEGORY.to_string() }
    }
}

/// Ordered category labels. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<String>);

impl Categories {
    pub fn new(labels: Vec<String>) -> Self {
        let labels: Vec<String> = labels.into_iter().filter(|l| !l.trim().is_empty()).collect();
        if labels.is_empty() {
            return Self::default();
        }
        Self(labels)
    }

    pub fn primary(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or(FALLBACK_CATEGORY)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self(vec![FALLBACK_CATEGORY.to_string()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    pub label: String,
    pub value: u32,
}

/// First-phase detail: everything the primary record carries.
///
/// Height and weight are in the source's native units (decimetres and
/// hectograms); conversion happens at display time.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBase {
    pub name: String,
    pub id: u32,
    pub height: u32,
    pub weight: u32,
    pub base_experience: u32,
    pub image_url: Option<String>,
    pub categories: Categories,
    pub stats: Vec<StatEntry>,
    pub abilities: Vec<String>,
    pub species_name: Option<String>,
}

/// Second-phase detail: the base plus description and relation chain.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub base: DetailBase,
    pub description: String,
    pub relation_chain: Vec<String>,
}

/// What a detail fetch emits, in order: `Base` then `Complete`, or a
/// single `NotFound`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailEvent {
    Base(DetailBase),
    Complete(DetailRecord),
    NotFound(String),
}

/// Synthesised description used when the species text is unavailable.
pub fn fallback_description(categories: &Categories) -> String {
    format!("A {} type Pokémon.", categories.joined("/"))
}
