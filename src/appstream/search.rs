// src/appstream/search.rs

//! Free-text search over loaded components
//!
//! Each component gets a token table built once per load. A query matches
//! a component when every query term is a prefix of at least one of its
//! tokens; matches are ranked by which fields the terms hit.

use super::Component;
use std::collections::HashMap;

/// Terms that carry no meaning in software searches
const STOP_WORDS: &[&str] = &[
    "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "the", "to", "with",
];

/// Shortest query term that is used for matching
const MIN_TERM_LEN: usize = 2;

/// Field a token was taken from, ordered by relevance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchField {
    Category,
    Summary,
    Keyword,
    Name,
    Package,
    Id,
}

impl MatchField {
    fn weight(self) -> u32 {
        match self {
            Self::Category => 10,
            Self::Summary => 20,
            Self::Keyword => 40,
            Self::Name => 50,
            Self::Package | Self::Id => 60,
        }
    }
}

/// Split text into lowercase alphanumeric words
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Normalize a user query into search terms
///
/// Short terms and stop words are dropped, duplicates removed.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in tokenize(query) {
        if term.chars().count() < MIN_TERM_LEN || STOP_WORDS.contains(&term.as_str()) {
            continue;
        }
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Search tokens for one component, each with the best field it came from
#[derive(Debug, Default, Clone)]
pub struct TokenTable {
    tokens: HashMap<String, MatchField>,
}

impl TokenTable {
    pub fn build(component: &Component) -> Self {
        let mut table = Self::default();

        table.add_text(&component.id, MatchField::Id);
        for package in &component.package_names {
            table.add_text(package, MatchField::Package);
        }
        if let Some(name) = &component.name {
            table.add_text(name, MatchField::Name);
        }
        for keyword in &component.keywords {
            table.add_text(keyword, MatchField::Keyword);
        }
        if let Some(summary) = &component.summary {
            table.add_text(summary, MatchField::Summary);
        }
        for category in &component.categories {
            table.add_text(category, MatchField::Category);
        }

        table
    }

    fn add_text(&mut self, text: &str, field: MatchField) {
        for token in tokenize(text) {
            self.insert(token, field);
        }
    }

    fn insert(&mut self, token: String, field: MatchField) {
        self.tokens
            .entry(token)
            .and_modify(|existing| *existing = (*existing).max(field))
            .or_insert(field);
    }

    /// Score of a single term, or `None` if no token starts with it
    fn term_score(&self, term: &str) -> Option<u32> {
        self.tokens
            .iter()
            .filter(|(token, _)| token.starts_with(term))
            .map(|(token, field)| {
                if token.as_str() == term {
                    field.weight() * 2
                } else {
                    field.weight()
                }
            })
            .max()
    }

    /// Score of a whole query; `None` unless every term matches
    pub fn score(&self, terms: &[String]) -> Option<u32> {
        if terms.is_empty() {
            return None;
        }
        terms
            .iter()
            .map(|term| self.term_score(term))
            .sum::<Option<u32>>()
    }
}

/// Rank components against a query
///
/// Returns indices into `tables` (and thus into the component list they
/// were built from), best match first; equal scores keep list order.
pub fn rank(tables: &[TokenTable], query: &str) -> Vec<usize> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<(usize, u32)> = tables
        .iter()
        .enumerate()
        .filter_map(|(i, table)| table.score(&terms).map(|score| (i, score)))
        .collect();
    hits.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    hits.into_iter().map(|(i, _)| i).collect()
}
