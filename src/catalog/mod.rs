mod istanbul;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::EstimatorError;

pub use istanbul::istanbul_catalog;

/// Interaction style of a catalog item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Checkbox,
    Slider,
}

/// A named stop along a slider, carrying the USD value it resolves to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliderOption {
    pub label: String,
    pub value_usd: f64,
}

/// One priced expense line in the catalog.
///
/// The optional fields only apply to sliders; checkboxes carry a flat
/// `base_price_usd` and an optional `default_enabled`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseItem {
    pub id: String,
    pub label: String,
    pub kind: ItemKind,
    pub base_price_usd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SliderOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
}

impl ExpenseItem {
    pub fn checkbox(id: impl Into<String>, label: impl Into<String>, price_usd: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ItemKind::Checkbox,
            base_price_usd: price_usd,
            min: None,
            max: None,
            step: None,
            options: None,
            unit: None,
            default_enabled: None,
            default_value: None,
        }
    }

    pub fn slider(id: impl Into<String>, label: impl Into<String>, price_usd: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ItemKind::Slider,
            base_price_usd: price_usd,
            min: None,
            max: None,
            step: None,
            options: None,
            unit: None,
            default_enabled: None,
            default_value: None,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == ItemKind::Checkbox
    }

    pub fn is_slider(&self) -> bool {
        self.kind == ItemKind::Slider
    }
}

/// Groups catalog items for budgeting and display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub items: Vec<ExpenseItem>,
}

/// Ordered, immutable list of expense categories supplied as static
/// configuration. The engine never mutates catalog data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog, enforcing that item ids are non-empty and
    /// globally unique across all categories.
    pub fn new(categories: Vec<Category>) -> Result<Self, EstimatorError> {
        let mut seen = HashSet::new();
        for category in &categories {
            for item in &category.items {
                if item.id.is_empty() {
                    return Err(EstimatorError::InvalidRef(format!(
                        "empty item id in category `{}`",
                        category.id
                    )));
                }
                if !seen.insert(item.id.as_str()) {
                    return Err(EstimatorError::InvalidRef(format!(
                        "duplicate item id `{}`",
                        item.id
                    )));
                }
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.category(id).is_some()
    }

    pub fn item(&self, id: &str) -> Option<&ExpenseItem> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter())
            .find(|item| item.id == id)
    }
}
