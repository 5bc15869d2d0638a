pub mod fold;

use crate::catalog::{Catalog, Category, EmojiRecord, EntryId};

pub use fold::fold;

/// Text a record is searched by: its name followed by its colon-wrapped
/// aliases, e.g. `THUMBS UP SIGN :+1: :thumbsup:`.
pub fn searchable_text(record: &EmojiRecord) -> String {
    format!("{} {}", record.name, record.aliases())
}

/// Folded searchable text for every catalog entry, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchIndex {
    haystacks: Vec<String>,
}

impl SearchIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let haystacks = catalog
            .records()
            .iter()
            .map(|r| fold(&searchable_text(r)))
            .collect();
        Self { haystacks }
    }

    pub fn len(&self) -> usize {
        self.haystacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haystacks.is_empty()
    }

    pub fn searchable(&self, id: EntryId) -> Option<&str> {
        self.haystacks.get(id.0).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult {
    query: String,
    matched: Vec<bool>,
    match_count: usize,
}

impl QueryResult {
    /// The state a picker opens in: everything visible.
    pub fn reset(total: usize) -> Self {
        Self {
            query: String::new(),
            matched: vec![true; total],
            match_count: total,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_reset(&self) -> bool {
        self.query.is_empty()
    }

    pub fn is_matched(&self, id: EntryId) -> bool {
        self.matched.get(id.0).copied().unwrap_or(false)
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    pub fn total(&self) -> usize {
        self.matched.len()
    }

    /// Whether the "no emoji found" notice applies.
    pub fn has_no_results(&self) -> bool {
        !self.is_reset() && self.match_count == 0
    }

    /// Matched ids in catalog order.
    pub fn matches(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.matched
            .iter()
            .enumerate()
            .filter(|(_, m)| **m)
            .map(|(i, _)| EntryId(i))
    }

    pub fn matches_in(&self, category: &Category) -> usize {
        category.ids().filter(|id| self.is_matched(*id)).count()
    }
}

/// Match `q` against every entry as a case-insensitive literal substring.
///
/// An empty query is the reset state and skips matching entirely. No
/// character in `q` has special meaning.
pub fn query(index: &SearchIndex, q: &str) -> QueryResult {
    if q.is_empty() {
        return QueryResult::reset(index.len());
    }

    let needle = fold(q);
    let matched: Vec<bool> = index
        .haystacks
        .iter()
        .map(|hay| hay.contains(needle.as_str()))
        .collect();
    let match_count = matched.iter().filter(|m| **m).count();

    QueryResult {
        query: q.to_string(),
        matched,
        match_count,
    }
}
