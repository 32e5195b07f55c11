use crate::classifier::{MatchMode, TextClassifier};
use crate::keywords::KeywordDictionary;
use crate::models::{Tally, TallySnapshot};
use crate::Result;
use std::collections::BTreeSet;

/// A dictionary's classifier paired with the tally it feeds.
#[derive(Debug, Clone)]
pub struct KeywordTally {
    classifier: TextClassifier,
    tally: Tally,
}

impl KeywordTally {
    pub fn new(dictionary: &KeywordDictionary, mode: MatchMode) -> Result<Self> {
        Ok(Self {
            classifier: TextClassifier::new(dictionary, mode)?,
            tally: Tally::zeroed(dictionary),
        })
    }

    /// Increments each matched category once and returns what matched.
    pub fn record(&mut self, text: &str) -> BTreeSet<String> {
        let matched = self.classifier.classify(text);
        for category in &matched {
            self.tally.increment(category);
        }
        matched
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }
}

pub struct CountAggregator {
    languages: KeywordTally,
    frameworks: KeywordTally,
    recorded: usize,
}

impl CountAggregator {
    pub fn new(
        languages: &KeywordDictionary,
        frameworks: &KeywordDictionary,
        mode: MatchMode,
    ) -> Result<Self> {
        Ok(Self {
            languages: KeywordTally::new(languages, mode)?,
            frameworks: KeywordTally::new(frameworks, mode)?,
            recorded: 0,
        })
    }

    /// Aggregator over the built-in language and framework dictionaries.
    pub fn with_builtin(mode: MatchMode) -> Result<Self> {
        Self::new(
            &KeywordDictionary::languages(),
            &KeywordDictionary::frameworks(),
            mode,
        )
    }

    pub fn record(&mut self, text: &str) {
        let languages = self.languages.record(text);
        let frameworks = self.frameworks.record(text);
        self.recorded += 1;
        tracing::debug!(
            offer = self.recorded,
            ?languages,
            ?frameworks,
            "offer classified"
        );
    }

    /// Number of texts recorded so far; no tally entry can exceed it.
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            languages: self.languages.tally().clone(),
            frameworks: self.frameworks.tally().clone(),
        }
    }
}
