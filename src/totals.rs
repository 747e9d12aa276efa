//! Pure derivation of per-category and grand totals from a selection
//! snapshot. No state, no side effects; every malformed or out-of-range
//! input degrades to a documented fallback instead of failing.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, Category, ExpenseItem};
use crate::selection::{CustomItem, DisabledCategories, SelectionStore};

/// Category whose checkbox prices scale with the dining-tier slider.
pub const FOOD_CATEGORY: &str = "food";
/// Slider resolving the food price multiplier through its named options.
pub const FOOD_LEVEL_ITEM: &str = "food-level";
/// Category with the taxi ride-count pricing rule.
pub const TRANSPORT_CATEGORY: &str = "transport";
/// Checkbox priced per ride rather than flat.
pub const TAXI_ITEM: &str = "transport-taxi";
/// Slider holding the ride count; never priced itself.
pub const TAXI_RIDES_ITEM: &str = "transport-taxi-rides";

/// Computes the total for every catalog category.
///
/// Disabled categories are still emitted, pinned to exactly 0. Selection
/// entries whose ids match nothing in the catalog or custom-item list
/// contribute nothing.
pub fn calculate_category_totals(
    catalog: &Catalog,
    selections: &SelectionStore,
    custom_items: &[CustomItem],
    disabled: &DisabledCategories,
) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();

    for category in catalog.categories() {
        let total = if disabled.is_disabled(&category.id) {
            0.0
        } else if category.id == FOOD_CATEGORY {
            food_total(category, selections, custom_items)
        } else if category.id == TRANSPORT_CATEGORY {
            transport_total(category, selections, custom_items)
        } else {
            generic_total(category, selections, custom_items)
        };
        totals.insert(category.id.clone(), total);
    }

    totals
}

/// Sums category totals into the day total. Plain IEEE accumulation.
pub fn grand_total(category_totals: &BTreeMap<String, f64>) -> f64 {
    category_totals.values().sum()
}

/// Resolves a slider position to a named-option index by rounding to the
/// nearest integer. Negative positions are out of range.
fn option_index(value: f64) -> Option<usize> {
    let rounded = value.round();
    if rounded < 0.0 {
        None
    } else {
        Some(rounded as usize)
    }
}

fn named_option_value(item: &ExpenseItem, value: f64) -> Option<f64> {
    let options = item.options.as_ref()?;
    let idx = option_index(value)?;
    options.get(idx).map(|option| option.value_usd)
}

/// Every enabled checkbox scales by the dining-tier multiplier; the tier
/// slider itself never contributes. Missing or out-of-range tier data
/// falls back to a multiplier of 1.
fn food_total(
    category: &Category,
    selections: &SelectionStore,
    custom_items: &[CustomItem],
) -> f64 {
    let multiplier = category
        .items
        .iter()
        .find(|item| item.id == FOOD_LEVEL_ITEM)
        .and_then(|level| {
            let entry = selections.get(FOOD_LEVEL_ITEM)?;
            named_option_value(level, entry.value)
        })
        .unwrap_or(1.0);

    let mut total = 0.0;
    for item in &category.items {
        if item.id == FOOD_LEVEL_ITEM {
            continue;
        }
        if item.is_checkbox() && is_enabled(selections, &item.id) {
            total += item.base_price_usd * multiplier;
        }
    }
    for custom in category_customs(custom_items, &category.id) {
        if is_enabled(selections, &custom.id) {
            total += custom.price_usd * multiplier;
        }
    }
    total
}

/// The taxi checkbox is priced per ride (count taken from the ride-count
/// slider, default 0); the slider itself is never priced; remaining
/// checkboxes are flat.
fn transport_total(
    category: &Category,
    selections: &SelectionStore,
    custom_items: &[CustomItem],
) -> f64 {
    let mut total = 0.0;
    for item in &category.items {
        if item.id == TAXI_RIDES_ITEM {
            continue;
        }
        if item.id == TAXI_ITEM {
            if is_enabled(selections, &item.id) {
                let rides = selections
                    .get(TAXI_RIDES_ITEM)
                    .map(|entry| entry.value)
                    .unwrap_or(0.0);
                total += rides * item.base_price_usd;
            }
            continue;
        }
        if item.is_checkbox() && is_enabled(selections, &item.id) {
            total += item.base_price_usd;
        }
    }
    for custom in category_customs(custom_items, &category.id) {
        if is_enabled(selections, &custom.id) {
            total += custom.price_usd;
        }
    }
    total
}

fn generic_total(
    category: &Category,
    selections: &SelectionStore,
    custom_items: &[CustomItem],
) -> f64 {
    let mut total = 0.0;
    for item in &category.items {
        let entry = match selections.get(&item.id) {
            Some(entry) if entry.enabled => entry,
            _ => continue,
        };
        if item.is_checkbox() {
            total += item.base_price_usd;
        } else if item.options.is_some() {
            total += named_option_value(item, entry.value).unwrap_or(0.0);
        } else {
            total += entry.value;
        }
    }
    for custom in category_customs(custom_items, &category.id) {
        if is_enabled(selections, &custom.id) {
            total += custom.price_usd;
        }
    }
    total
}

fn is_enabled(selections: &SelectionStore, item_id: &str) -> bool {
    selections
        .get(item_id)
        .map(|entry| entry.enabled)
        .unwrap_or(false)
}

fn category_customs<'a>(
    custom_items: &'a [CustomItem],
    category_id: &'a str,
) -> impl Iterator<Item = &'a CustomItem> {
    custom_items
        .iter()
        .filter(move |custom| custom.category_id == category_id)
}
