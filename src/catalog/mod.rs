pub mod record;
pub mod sections;

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PickerError, Result};

pub use record::{EmojiRecord, ImageAvailability, Provider, RawEmojiRecord};
pub use sections::{SKIN_TONES, SectionOrders, tab_icon};

/// What to do with a raw record that lacks a required attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Log a warning and leave the record out.
    #[default]
    Skip,
    /// Fail the whole build with the record's error.
    Abort,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Backend whose `has_img_*` flag decides whether a record is usable.
    /// `None` accepts a record if any backend can paint it.
    pub provider: Option<Provider>,
    pub invalid_records: InvalidRecordPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            provider: Some(Provider::Twitter),
            invalid_records: InvalidRecordPolicy::default(),
        }
    }
}

impl BuildOptions {
    fn accepts(&self, record: &EmojiRecord) -> bool {
        match self.provider {
            Some(provider) => record.has_image(provider),
            None => record.images.any(),
        }
    }
}

/// Position of a record in the flattened catalog. Stable for the lifetime of
/// the catalog it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    label: String,
    priority: i32,
    span: Range<usize>,
}

impl Category {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntryId> + use<> {
        self.span.clone().map(EntryId)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.span.contains(&id.0)
    }
}

/// Categories in display order, each holding its members in `sort_order`.
///
/// Records are stored flattened so that the search index and query results
/// can address them by [`EntryId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<EmojiRecord>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn records(&self) -> &[EmojiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&EmojiRecord> {
        self.records.get(id.0)
    }

    pub fn entries(&self, category: &Category) -> &[EmojiRecord] {
        &self.records[category.span.clone()]
    }

    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn category_of(&self, id: EntryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.contains(id))
    }

    pub fn sections(&self) -> impl Iterator<Item = (&Category, &[EmojiRecord])> {
        self.categories.iter().map(|c| (c, self.entries(c)))
    }

    pub fn ids(&self) -> impl Iterator<Item = EntryId> + use<> {
        (0..self.records.len()).map(EntryId)
    }
}

/// Group, order and filter raw records into a [`Catalog`].
///
/// The input is never modified; every catalog entry is a fresh copy.
pub fn build(
    raw_records: &[RawEmojiRecord],
    orders: &SectionOrders,
    options: &BuildOptions,
) -> Result<Catalog> {
    let mut groups: Vec<(String, Vec<EmojiRecord>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut invalid = 0usize;

    for (index, raw) in raw_records.iter().enumerate() {
        if raw.category.as_deref() == Some(SKIN_TONES) {
            continue;
        }

        let record = match raw.validate(index) {
            Ok(record) => record,
            Err(err) => match options.invalid_records {
                InvalidRecordPolicy::Abort => return Err(err),
                InvalidRecordPolicy::Skip => {
                    warn!(%err, "dropping emoji record");
                    invalid += 1;
                    continue;
                }
            },
        };

        let slot = *slots.entry(record.category.clone()).or_insert_with(|| {
            groups.push((record.category.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }

    let mut ranked = Vec::with_capacity(groups.len());
    for (label, mut members) in groups {
        let priority = orders
            .priority(&label)
            .ok_or_else(|| PickerError::Configuration {
                category: label.clone(),
            })?;
        // Stable: equal sort_order keeps input order.
        members.sort_by_key(|r| r.sort_order);
        members.retain(|r| options.accepts(r));
        ranked.push((label, priority, members));
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut records = Vec::new();
    let mut categories = Vec::new();
    for (label, priority, members) in ranked {
        if members.is_empty() {
            debug!(category = %label, "category has no displayable members");
            continue;
        }
        let start = records.len();
        records.extend(members);
        categories.push(Category {
            label,
            priority,
            span: start..records.len(),
        });
    }

    debug!(
        records = records.len(),
        categories = categories.len(),
        invalid,
        "built emoji catalog"
    );

    Ok(Catalog {
        records,
        categories,
    })
}
