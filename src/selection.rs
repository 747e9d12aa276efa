use std::collections::{btree_map, BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;

/// Current choice recorded for one item: whether it counts toward the
/// total and its numeric value (slider position, or the item's price for
/// checkbox and custom entries).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SelectionEntry {
    pub enabled: bool,
    pub value: f64,
}

/// Mapping from item id to its selection entry. Covers every catalog item
/// of the active day plus one entry per custom item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SelectionStore(BTreeMap<String, SelectionEntry>);

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_id: &str) -> Option<&SelectionEntry> {
        self.0.get(item_id)
    }

    pub fn get_mut(&mut self, item_id: &str) -> Option<&mut SelectionEntry> {
        self.0.get_mut(item_id)
    }

    pub fn insert(&mut self, item_id: impl Into<String>, entry: SelectionEntry) {
        self.0.insert(item_id.into(), entry);
    }

    pub fn remove(&mut self, item_id: &str) -> Option<SelectionEntry> {
        self.0.remove(item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.0.contains_key(item_id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SelectionEntry> {
        self.0.iter()
    }

    /// Replaces the contents with `other`'s entries, clear-then-refill,
    /// so observers see one wholesale replacement rather than a swap.
    pub fn replace_with(&mut self, other: &SelectionStore) {
        self.0.clear();
        for (id, entry) in other.iter() {
            self.0.insert(id.clone(), *entry);
        }
    }
}

/// A user-defined ad-hoc priced line item attached to a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomItem {
    pub id: String,
    pub category_id: String,
    pub label: String,
    pub price_usd: f64,
}

impl CustomItem {
    /// Creates a custom item with a freshly generated unique id.
    pub fn new(
        category_id: impl Into<String>,
        label: impl Into<String>,
        price_usd: f64,
    ) -> Self {
        Self {
            id: format!("custom-{}", Uuid::new_v4()),
            category_id: category_id.into(),
            label: label.into(),
            price_usd,
        }
    }
}

/// Set of category ids whose totals are currently zeroed out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DisabledCategories(BTreeSet<String>);

impl DisabledCategories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self, category_id: &str) -> bool {
        self.0.contains(category_id)
    }

    /// Flips the disabled flag, returning the new state.
    pub fn toggle(&mut self, category_id: &str) -> bool {
        if !self.0.remove(category_id) {
            self.0.insert(category_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn set(&mut self, category_id: &str, disabled: bool) {
        if disabled {
            self.0.insert(category_id.to_string());
        } else {
            self.0.remove(category_id);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn replace_with(&mut self, other: &DisabledCategories) {
        self.0.clear();
        self.0.extend(other.0.iter().cloned());
    }
}

/// Builds the default selection state for a catalog plus any custom items.
///
/// Checkboxes start at their catalog default (off unless marked), mirroring
/// the base price in `value`; sliders start enabled at their default value
/// (falling back to `min`, then 0); custom items start enabled at their
/// price. Pure and deterministic.
pub fn build_default_selections(catalog: &Catalog, custom_items: &[CustomItem]) -> SelectionStore {
    let mut selections = SelectionStore::new();

    for category in catalog.categories() {
        for item in &category.items {
            let entry = if item.is_checkbox() {
                SelectionEntry {
                    enabled: item.default_enabled.unwrap_or(false),
                    value: item.base_price_usd,
                }
            } else {
                SelectionEntry {
                    enabled: true,
                    value: item.default_value.or(item.min).unwrap_or(0.0),
                }
            };
            selections.insert(item.id.clone(), entry);
        }
    }

    for custom in custom_items {
        selections.insert(
            custom.id.clone(),
            SelectionEntry {
                enabled: true,
                value: custom.price_usd,
            },
        );
    }

    selections
}
