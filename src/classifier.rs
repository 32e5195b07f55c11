use crate::keywords::KeywordDictionary;
use crate::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;

/// How a synonym has to be delimited to count as a whole token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Exactly one space on each side. Misses tokens at the text edges or next to punctuation.
    SpaceDelimited,
    /// Text edge or any non-word character on each side. `+` and `#` count as word
    /// characters so "c" stays out of "c++" and "c#", and a `.` between two words joins
    /// them, so "js" stays out of "node.js".
    #[default]
    WordBoundary,
}

impl MatchMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "spaces" | "space" => Some(Self::SpaceDelimited),
            "words" | "word" => Some(Self::WordBoundary),
            _ => None,
        }
    }
}

/// Synonym boundary: text edge or a character that is not part of a word. `+` and `#`
/// belong to words, and so does a `.` glued to a word on the other side ("node.js").
const LEFT_EDGE: &str = r"(?:^|[^\w+#.]|(?:^|[^\w+#])\.)";
const RIGHT_EDGE: &str = r"(?:$|[^\w+#.]|\.(?:$|[^\w+#]))";

#[derive(Debug, Clone)]
enum Pattern {
    Spaced(String),
    Bounded(Regex),
}

#[derive(Debug, Clone)]
struct Matcher {
    pattern: Pattern,
    /// A single token joined by `-`, `.` or `/`, like "objective-c" or "pl/sql".
    compound: bool,
}

impl Matcher {
    fn build(synonym: &str, mode: MatchMode) -> Result<Self> {
        let pattern = match mode {
            MatchMode::SpaceDelimited => Pattern::Spaced(format!(" {synonym} ")),
            MatchMode::WordBoundary => Pattern::Bounded(Regex::new(&format!(
                "{LEFT_EDGE}({}){RIGHT_EDGE}",
                regex::escape(synonym)
            ))?),
        };
        Ok(Self {
            pattern,
            compound: is_compound(synonym),
        })
    }

    /// Byte range of the synonym itself, without its delimiters.
    fn find(&self, lowered: &str) -> Option<Range<usize>> {
        match &self.pattern {
            Pattern::Spaced(needle) => lowered
                .find(needle.as_str())
                .map(|start| start + 1..start + needle.len() - 1),
            Pattern::Bounded(re) => re
                .captures(lowered)
                .and_then(|caps| caps.get(1))
                .map(|m| m.range()),
        }
    }

    fn is_match(&self, lowered: &str) -> bool {
        match &self.pattern {
            Pattern::Spaced(needle) => lowered.contains(needle.as_str()),
            Pattern::Bounded(re) => re.is_match(lowered),
        }
    }
}

fn is_compound(synonym: &str) -> bool {
    !synonym.contains(char::is_whitespace) && synonym.contains(['-', '.', '/'])
}

/// Precompiled matchers for one dictionary.
///
/// Compound synonyms are blanked out of the text before the plain ones are tested, so
/// "c" and "sql" stay out of "objective-c" and "pl/sql".
#[derive(Debug, Clone)]
pub struct TextClassifier {
    categories: Vec<(String, Vec<Matcher>)>,
    /// Longest first.
    compounds: Vec<Matcher>,
}

impl TextClassifier {
    pub fn new(dictionary: &KeywordDictionary, mode: MatchMode) -> Result<Self> {
        let categories = dictionary
            .categories()
            .map(|category| -> Result<(String, Vec<Matcher>)> {
                let matchers = category
                    .synonyms()
                    .iter()
                    .map(|synonym| Matcher::build(synonym, mode))
                    .collect::<Result<Vec<_>>>()?;
                Ok((category.name().to_string(), matchers))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut compound_synonyms: Vec<&str> = dictionary
            .categories()
            .flat_map(|category| category.synonyms())
            .map(String::as_str)
            .filter(|synonym| is_compound(synonym))
            .collect();
        compound_synonyms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        compound_synonyms.dedup();
        let compounds = compound_synonyms
            .into_iter()
            .map(|synonym| Matcher::build(synonym, mode))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            categories,
            compounds,
        })
    }

    /// Names of every category with at least one synonym present in `text`.
    pub fn classify(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let masked = self.mask_compounds(&lowered);

        self.categories
            .iter()
            .filter(|(_, matchers)| {
                matchers.iter().any(|m| {
                    let haystack = if m.compound { &lowered } else { &masked };
                    m.is_match(haystack)
                })
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn mask_compounds(&self, lowered: &str) -> String {
        let mut masked = lowered.to_string();
        for compound in &self.compounds {
            while let Some(span) = compound.find(&masked) {
                let blank = " ".repeat(span.len());
                masked.replace_range(span, &blank);
            }
        }
        masked
    }
}

/// One-shot classification; compile a [`TextClassifier`] when classifying many texts.
pub fn classify(text: &str, dictionary: &KeywordDictionary, mode: MatchMode) -> Result<BTreeSet<String>> {
    Ok(TextClassifier::new(dictionary, mode)?.classify(text))
}
