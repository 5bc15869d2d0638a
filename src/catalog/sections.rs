use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category whose members are skin-tone modifiers, never offered on their own.
pub const SKIN_TONES: &str = "Skin Tones";

pub const DEFAULT_SECTION_ORDERS: [(&str, i32); 8] = [
    ("People", 8),
    ("Nature", 7),
    ("Foods", 6),
    ("Activity", 5),
    ("Places", 4),
    ("Objects", 3),
    ("Symbols", 2),
    ("Flags", 1),
];

/// Category label -> priority. Higher priorities are listed first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionOrders(BTreeMap<String, i32>);

impl SectionOrders {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn priority(&self, label: &str) -> Option<i32> {
        self.0.get(label).copied()
    }

    pub fn set(&mut self, label: impl Into<String>, priority: i32) {
        self.0.insert(label.into(), priority);
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Default for SectionOrders {
    fn default() -> Self {
        DEFAULT_SECTION_ORDERS.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for SectionOrders {
    fn from_iter<I: IntoIterator<Item = (S, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Shorthand shown on the tab button of each canonical category.
pub fn tab_icon(label: &str) -> Option<&'static str> {
    match label {
        "People" => Some("sunglasses"),
        "Nature" => Some("shamrock"),
        "Foods" => Some("pizza"),
        "Activity" => Some("football"),
        "Places" => Some("airplane"),
        "Objects" => Some("bulb"),
        "Symbols" => Some("heart"),
        "Flags" => Some("checkered_flag"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_rank_people_over_flags() {
        let orders = SectionOrders::default();
        assert_eq!(orders.priority("People"), Some(8));
        assert_eq!(orders.priority("Flags"), Some(1));
        assert_eq!(orders.priority(SKIN_TONES), None);
        assert_eq!(orders.labels().count(), 8);
    }

    #[test]
    fn every_canonical_category_has_a_tab_icon() {
        for (label, _) in DEFAULT_SECTION_ORDERS {
            assert!(tab_icon(label).is_some(), "{label} has no tab icon");
        }
        assert_eq!(tab_icon("Custom"), None);
    }

    #[test]
    fn toml_table_overrides() {
        let orders: SectionOrders = toml::from_str("Flags = 10\nPeople = 2\n").unwrap();
        assert_eq!(orders.priority("Flags"), Some(10));
        assert_eq!(orders.priority("Nature"), None);
    }
}
