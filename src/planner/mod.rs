//! Multi-day session state: the live day the UI mutates, per-day
//! snapshots, switching and resizing semantics, and debounced mirroring
//! of the whole session to durable storage.

mod debounce;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::errors::EstimatorError;
use crate::selection::{
    build_default_selections, CustomItem, DisabledCategories, SelectionEntry, SelectionStore,
};
use crate::storage::KeyValueStore;
use crate::totals::{calculate_category_totals, grand_total};

pub use debounce::{Debounce, DEFAULT_QUIET_PERIOD};

/// Storage key for the full multi-day bundle.
pub const MULTI_DAY_KEY: &str = "trip-calc-multi-day";
/// Storage key for the standalone custom-items record.
pub const CUSTOM_ITEMS_KEY: &str = "trip-calc-custom-items";

const BUNDLE_SCHEMA_VERSION: u8 = 1;

/// Full selection snapshot for one trip day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayState {
    pub selections: SelectionStore,
    #[serde(default)]
    pub custom_items: Vec<CustomItem>,
    #[serde(default)]
    pub disabled_categories: DisabledCategories,
}

/// Derived, ephemeral per-day totals.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day_index: usize,
    pub total: f64,
    pub category_totals: BTreeMap<String, f64>,
}

/// Persisted shape of the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBundle {
    #[serde(default = "DayBundle::schema_version_default")]
    pub schema_version: u8,
    pub number_of_days: usize,
    #[serde(default)]
    pub active_day_index: usize,
    pub day_states: Vec<DayState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl DayBundle {
    fn schema_version_default() -> u8 {
        BUNDLE_SCHEMA_VERSION
    }
}

/// Whether mutations currently reflect user edits or a wholesale
/// snapshot restore. Auto-save is suppressed while bulk-loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlannerMode {
    Idle,
    BulkLoading,
}

/// Owns all mutable session state for one local estimator session: the
/// live day, the per-day snapshot list, and the storage adapter.
///
/// Every mutating entry point runs to completion synchronously; the only
/// deferred work is the debounced bundle write, driven by the host
/// calling [`TripPlanner::poll_persistence`] when idle.
pub struct TripPlanner {
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    live: DayState,
    day_states: Vec<DayState>,
    number_of_days: usize,
    active_day_index: usize,
    mode: PlannerMode,
    initialized: bool,
    debounce: Debounce,
}

impl TripPlanner {
    /// Creates a planner and restores any previously persisted session.
    pub fn new(catalog: Catalog, store: Box<dyn KeyValueStore>) -> Self {
        Self::with_quiet_period(catalog, store, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(
        catalog: Catalog,
        store: Box<dyn KeyValueStore>,
        quiet: Duration,
    ) -> Self {
        let mut planner = Self {
            catalog,
            store,
            live: DayState::default(),
            day_states: Vec::new(),
            number_of_days: 1,
            active_day_index: 0,
            mode: PlannerMode::Idle,
            initialized: false,
            debounce: Debounce::new(quiet),
        };
        planner.initialize();
        planner
    }

    /// One-time startup restore: seed the live day from the legacy
    /// custom-items record, then adopt the persisted bundle when present
    /// and well-formed. Malformed storage falls back to defaults.
    fn initialize(&mut self) {
        let custom_items = self.load_custom_items();
        self.live = DayState {
            selections: build_default_selections(&self.catalog, &custom_items),
            custom_items,
            disabled_categories: DisabledCategories::new(),
        };

        if let Some(bundle) = self.load_bundle() {
            if bundle.number_of_days >= 1 {
                self.number_of_days = bundle.number_of_days;
                self.active_day_index = bundle.active_day_index.min(bundle.number_of_days - 1);
                self.day_states = bundle.day_states;
            }
        }

        if self.day_states.get(self.active_day_index).is_some() {
            self.load_day(self.active_day_index);
        } else {
            self.snapshot_active_day();
            self.debounce.schedule();
        }
        self.initialized = true;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn number_of_days(&self) -> usize {
        self.number_of_days
    }

    pub fn active_day_index(&self) -> usize {
        self.active_day_index
    }

    pub fn selections(&self) -> &SelectionStore {
        &self.live.selections
    }

    pub fn selection(&self, item_id: &str) -> Option<&SelectionEntry> {
        self.live.selections.get(item_id)
    }

    pub fn custom_items(&self) -> &[CustomItem] {
        &self.live.custom_items
    }

    pub fn custom_items_for_category(&self, category_id: &str) -> Vec<&CustomItem> {
        self.live
            .custom_items
            .iter()
            .filter(|item| item.category_id == category_id)
            .collect()
    }

    pub fn is_category_disabled(&self, category_id: &str) -> bool {
        self.live.disabled_categories.is_disabled(category_id)
    }

    // --- live-day mutations -------------------------------------------------

    /// Sets an item's enabled flag. Unknown ids are ignored.
    pub fn set_item_enabled(&mut self, item_id: &str, enabled: bool) {
        match self.live.selections.get_mut(item_id) {
            Some(entry) if entry.enabled != enabled => {
                entry.enabled = enabled;
                self.after_mutation(false);
            }
            Some(_) => {}
            None => tracing::debug!(item_id, "ignoring toggle for unknown item"),
        }
    }

    /// Flips an item's enabled flag, returning the new state when known.
    pub fn toggle_item(&mut self, item_id: &str) -> Option<bool> {
        let enabled = !self.live.selections.get(item_id)?.enabled;
        self.set_item_enabled(item_id, enabled);
        Some(enabled)
    }

    /// Moves a slider (or edits a numeric value). Unknown ids are ignored.
    pub fn set_slider_value(&mut self, item_id: &str, value: f64) {
        match self.live.selections.get_mut(item_id) {
            Some(entry) if entry.value != value => {
                entry.value = value;
                self.after_mutation(false);
            }
            Some(_) => {}
            None => tracing::debug!(item_id, "ignoring value for unknown item"),
        }
    }

    /// Adds a custom line item to a category, enabled at its price.
    /// Rejects unknown category ids.
    pub fn add_custom_item(
        &mut self,
        category_id: &str,
        label: &str,
        price_usd: f64,
    ) -> Result<String, EstimatorError> {
        if !self.catalog.has_category(category_id) {
            return Err(EstimatorError::InvalidRef(format!(
                "unknown category `{}`",
                category_id
            )));
        }
        let item = CustomItem::new(category_id, label, price_usd);
        let id = item.id.clone();
        self.live.selections.insert(
            id.clone(),
            SelectionEntry {
                enabled: true,
                value: price_usd,
            },
        );
        self.live.custom_items.push(item);
        self.after_mutation(true);
        Ok(id)
    }

    /// Removes a custom item and its selection entry. Unknown ids are a
    /// no-op.
    pub fn remove_custom_item(&mut self, item_id: &str) {
        let before = self.live.custom_items.len();
        self.live.custom_items.retain(|item| item.id != item_id);
        if self.live.custom_items.len() == before {
            return;
        }
        self.live.selections.remove(item_id);
        self.after_mutation(true);
    }

    /// Flips a category's disabled flag, returning the new state.
    pub fn toggle_category(&mut self, category_id: &str) -> bool {
        let disabled = self.live.disabled_categories.toggle(category_id);
        self.after_mutation(false);
        disabled
    }

    pub fn set_category_disabled(&mut self, category_id: &str, disabled: bool) {
        if self.is_category_disabled(category_id) == disabled {
            return;
        }
        self.live.disabled_categories.set(category_id, disabled);
        self.after_mutation(false);
    }

    // --- derived totals -----------------------------------------------------

    /// Per-category totals of the active day. Recomputed on every read.
    pub fn category_totals(&self) -> BTreeMap<String, f64> {
        calculate_category_totals(
            &self.catalog,
            &self.live.selections,
            &self.live.custom_items,
            &self.live.disabled_categories,
        )
    }

    /// Total of the active day.
    pub fn day_total(&self) -> f64 {
        grand_total(&self.category_totals())
    }

    /// Totals for every day, using the live state for the active day and
    /// stored (or default) snapshots for the rest.
    pub fn all_days_summary(&self) -> Vec<DaySummary> {
        (0..self.number_of_days)
            .map(|day_index| {
                let default_state;
                let state = if day_index == self.active_day_index {
                    &self.live
                } else if let Some(stored) = self.day_states.get(day_index) {
                    stored
                } else {
                    default_state = self.default_day();
                    &default_state
                };
                let category_totals = calculate_category_totals(
                    &self.catalog,
                    &state.selections,
                    &state.custom_items,
                    &state.disabled_categories,
                );
                let total = grand_total(&category_totals);
                DaySummary {
                    day_index,
                    total,
                    category_totals,
                }
            })
            .collect()
    }

    /// Sum of all day totals across the trip.
    pub fn grand_total(&self) -> f64 {
        self.all_days_summary()
            .iter()
            .map(|summary| summary.total)
            .sum()
    }

    // --- day switching and resizing -----------------------------------------

    /// Switches the active day, snapshotting the current one first.
    /// Out-of-range or same-day targets are a no-op.
    pub fn switch_day(&mut self, target: usize) {
        if target == self.active_day_index || target >= self.number_of_days {
            return;
        }
        self.snapshot_active_day();
        self.debounce.schedule();
        self.active_day_index = target;

        if self.day_states.get(target).is_some() {
            self.load_day(target);
        } else {
            self.reset_live_to_defaults();
            self.snapshot_active_day();
            self.debounce.schedule();
        }
    }

    /// Changes the trip length. Shrinking truncates stored days and moves
    /// an out-of-range active day to the new last day; growth materializes
    /// days lazily on first switch.
    pub fn set_number_of_days(&mut self, count: usize) {
        let count = count.max(1);
        if count == self.number_of_days {
            return;
        }
        if count < self.number_of_days {
            self.day_states.truncate(count);
            self.number_of_days = count;
            if self.active_day_index >= count {
                // The active day was removed; land on the last remaining
                // day without snapshotting the doomed live state.
                self.active_day_index = count - 1;
                if self.day_states.get(self.active_day_index).is_some() {
                    self.load_day(self.active_day_index);
                } else {
                    self.reset_live_to_defaults();
                    self.snapshot_active_day();
                }
            }
        } else {
            self.number_of_days = count;
        }
        self.debounce.schedule();
    }

    // --- persistence --------------------------------------------------------

    /// Performs the pending debounced write once its quiet period has
    /// elapsed. Hosts call this from their idle loop; returns whether a
    /// write happened.
    pub fn poll_persistence(&mut self) -> Result<bool, EstimatorError> {
        if self.debounce.fire_if_due(Instant::now()) {
            self.persist_bundle()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Forces any pending write out immediately.
    pub fn flush(&mut self) -> Result<(), EstimatorError> {
        if self.debounce.is_pending() {
            self.debounce.cancel();
            self.persist_bundle()?;
        }
        Ok(())
    }

    pub fn has_pending_write(&self) -> bool {
        self.debounce.is_pending()
    }

    fn persist_bundle(&mut self) -> Result<(), EstimatorError> {
        let bundle = DayBundle {
            schema_version: BUNDLE_SCHEMA_VERSION,
            number_of_days: self.number_of_days,
            active_day_index: self.active_day_index,
            day_states: self.day_states.clone(),
            saved_at: Some(Utc::now()),
        };
        let json = serde_json::to_string(&bundle)?;
        self.store.set(MULTI_DAY_KEY, &json)
    }

    fn persist_custom_items(&mut self) {
        match serde_json::to_string(&self.live.custom_items) {
            Ok(json) => {
                if let Err(error) = self.store.set(CUSTOM_ITEMS_KEY, &json) {
                    tracing::warn!(%error, "failed to persist custom items");
                }
            }
            Err(error) => tracing::warn!(%error, "failed to serialize custom items"),
        }
    }

    fn load_custom_items(&mut self) -> Vec<CustomItem> {
        match self.store.get(CUSTOM_ITEMS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                tracing::warn!(%error, "malformed custom-items record, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "unreadable custom-items record, starting empty");
                Vec::new()
            }
        }
    }

    fn load_bundle(&mut self) -> Option<DayBundle> {
        match self.store.get(MULTI_DAY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(bundle) => Some(bundle),
                Err(error) => {
                    tracing::warn!(%error, "malformed day bundle, starting fresh");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "unreadable day bundle, starting fresh");
                None
            }
        }
    }

    // --- snapshot / restore -------------------------------------------------

    fn default_day(&self) -> DayState {
        DayState {
            selections: build_default_selections(&self.catalog, &[]),
            custom_items: Vec::new(),
            disabled_categories: DisabledCategories::new(),
        }
    }

    /// Copies the live state into its slot, growing the list with default
    /// days when sparse. Snapshots are value copies, never aliases.
    fn snapshot_active_day(&mut self) {
        while self.day_states.len() <= self.active_day_index {
            self.day_states.push(self.default_day());
        }
        self.day_states[self.active_day_index] = self.live.clone();
    }

    /// Replaces the live state with a stored snapshot, clear-then-refill,
    /// with auto-save suppressed for the duration.
    fn load_day(&mut self, index: usize) {
        let Some(stored) = self.day_states.get(index).cloned() else {
            return;
        };
        self.mode = PlannerMode::BulkLoading;
        self.live.selections.replace_with(&stored.selections);
        self.live.custom_items = stored.custom_items;
        self.live
            .disabled_categories
            .replace_with(&stored.disabled_categories);
        self.mode = PlannerMode::Idle;
    }

    fn reset_live_to_defaults(&mut self) {
        self.mode = PlannerMode::BulkLoading;
        let defaults = build_default_selections(&self.catalog, &[]);
        self.live.selections.replace_with(&defaults);
        self.live.custom_items.clear();
        self.live.disabled_categories.clear();
        self.mode = PlannerMode::Idle;
    }

    /// Runs after every user-level edit: re-snapshot the active day and
    /// schedule the debounced bundle write. Suppressed while a bulk
    /// restore is replacing the live state wholesale.
    fn after_mutation(&mut self, custom_items_changed: bool) {
        if self.mode == PlannerMode::BulkLoading || !self.initialized {
            return;
        }
        self.snapshot_active_day();
        self.debounce.schedule();
        if custom_items_changed {
            self.persist_custom_items();
        }
    }
}

impl Drop for TripPlanner {
    fn drop(&mut self) {
        if self.debounce.is_pending() {
            if let Err(error) = self.persist_bundle() {
                tracing::warn!(%error, "failed to flush pending write on shutdown");
            }
        }
    }
}
