use crate::driver::ElementHandle;
use crate::error::ScrapeError;
use crate::keywords::KeywordDictionary;
use std::collections::BTreeMap;
use std::fmt;

/// One listing in the results list, addressed by its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferEntry {
    pub position: usize,
    pub handle: ElementHandle,
}

impl OfferEntry {
    pub fn new(position: usize, handle: ElementHandle) -> Self {
        Self { position, handle }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractFailure {
    ElementNotFound,
    Timeout,
    EmptyBody,
    Browser(String),
}

impl fmt::Display for ExtractFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractFailure::ElementNotFound => write!(f, "expand control never rendered"),
            ExtractFailure::Timeout => write!(f, "offer body did not become visible"),
            ExtractFailure::EmptyBody => write!(f, "offer body was empty"),
            ExtractFailure::Browser(message) => write!(f, "browser error: {message}"),
        }
    }
}

impl From<ScrapeError> for ExtractFailure {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::ElementNotFound { .. } => ExtractFailure::ElementNotFound,
            ScrapeError::VisibilityTimeout { .. } => ExtractFailure::Timeout,
            other => ExtractFailure::Browser(other.to_string()),
        }
    }
}

/// Plain text of an offer body, or the reason it could not be read.
pub type ExtractionResult = std::result::Result<String, ExtractFailure>;

/// Per-category counts for one dictionary. Keys are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    label: String,
    counts: BTreeMap<String, u32>,
}

impl Tally {
    pub fn zeroed(dictionary: &KeywordDictionary) -> Self {
        Self {
            label: dictionary.label().to_string(),
            counts: dictionary
                .categories()
                .map(|category| (category.name().to_string(), 0))
                .collect(),
        }
    }

    /// Unknown categories are ignored so the key set never changes.
    pub fn increment(&mut self, category: &str) {
        if let Some(count) = self.counts.get_mut(category) {
            *count += 1;
        }
    }

    /// What the categories are, e.g. "Language".
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get(&self, category: &str) -> Option<u32> {
        self.counts.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Descending by count; ties keep alphabetical order.
    pub fn sorted_desc(&self) -> Vec<(&str, u32)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallySnapshot {
    pub languages: Tally,
    pub frameworks: Tally,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub loaded: usize,
    pub met_minimum: bool,
    pub extracted: usize,
    pub skipped: Vec<(usize, ExtractFailure)>,
    pub tallies: TallySnapshot,
}
