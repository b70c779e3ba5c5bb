use serde::{Deserialize, Serialize};

pub const EXACT_MATCH: &str = "Exact match";
pub const PARTIAL_MATCH: &str = "Partial Match";

/// One ranked candidate returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// Reference entry exactly as it appears in the reference set
    pub name: String,
    /// 1.0 for exact matches, 0.0..=0.99 otherwise
    pub score: f64,
    pub method: String,
}

impl ScoredMatch {
    pub fn exact(name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: 1.0,
            method: EXACT_MATCH.to_string(),
        }
    }

    pub fn is_exact(&self) -> bool {
        self.method == EXACT_MATCH
    }
}

/// Signals that can contribute to a fuzzy score, in label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSignal {
    Soundex,
    Metaphone,
    Nysiis,
    Levenshtein,
}

impl MatchSignal {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Soundex => "Soundex",
            Self::Metaphone => "Metaphone",
            Self::Nysiis => "NYSIIS",
            Self::Levenshtein => "Levenshtein",
        }
    }
}

impl std::fmt::Display for MatchSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered list of known origin names. Duplicates are allowed and kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSet {
    names: Vec<String>,
}

impl ReferenceSet {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Missing entries (e.g. null cells) become empty names, which never match.
    pub fn from_optional<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            names: entries.into_iter().map(Option::unwrap_or_default).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for ReferenceSet {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<Vec<&str>> for ReferenceSet {
    fn from(names: Vec<&str>) -> Self {
        Self::new(names.into_iter().map(String::from).collect())
    }
}

impl AsRef<[String]> for ReferenceSet {
    fn as_ref(&self) -> &[String] {
        &self.names
    }
}
