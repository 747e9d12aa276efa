use std::fs;
use std::time::Duration;

use tempfile::tempdir;
use trip_core::catalog::istanbul_catalog;
use trip_core::planner::{DayBundle, TripPlanner, CUSTOM_ITEMS_KEY, MULTI_DAY_KEY};
use trip_core::selection::CustomItem;
use trip_core::storage::{JsonFileStore, MemoryStore};

// Default Istanbul day: accommodation 25 + food 46 + transport 0.7 +
// connectivity 15 + health 5.
const DEFAULT_DAY_TOTAL: f64 = 91.7;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn memory_planner() -> TripPlanner {
    TripPlanner::with_quiet_period(
        istanbul_catalog().clone(),
        Box::new(MemoryStore::new()),
        Duration::ZERO,
    )
}

#[test]
fn fresh_start_has_one_default_day() {
    let planner = memory_planner();
    assert_eq!(planner.number_of_days(), 1);
    assert_eq!(planner.active_day_index(), 0);
    assert!(planner.custom_items().is_empty());
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL);
}

#[test]
fn toggling_items_updates_live_totals() {
    let mut planner = memory_planner();
    planner.set_item_enabled("food-snacks", true);
    // Snacks cost 3, scaled by the street-food multiplier 2.
    assert_close(planner.category_totals()["food"], 52.0);
    planner.set_item_enabled("food-snacks", false);
    assert_close(planner.category_totals()["food"], 46.0);
}

#[test]
fn slider_moves_update_live_totals() {
    let mut planner = memory_planner();
    planner.set_slider_value("shopping-budget", 80.0);
    assert_close(planner.category_totals()["shopping"], 80.0);
}

#[test]
fn unknown_item_mutations_are_ignored() {
    let mut planner = memory_planner();
    let before = planner.day_total();
    planner.set_item_enabled("ghost-item", true);
    planner.set_slider_value("ghost-item", 50.0);
    assert_eq!(planner.toggle_item("ghost-item"), None);
    assert_close(planner.day_total(), before);
}

#[test]
fn add_custom_item_rejects_unknown_categories() {
    let mut planner = memory_planner();
    assert!(planner.add_custom_item("souvenirs", "Magnet", 3.0).is_err());
    assert!(planner.custom_items().is_empty());
}

#[test]
fn custom_items_contribute_and_restore_exactly() {
    let mut planner = memory_planner();
    let before = planner.day_total();
    let id = planner
        .add_custom_item("shopping", "Carpet", 30.0)
        .expect("valid category");
    assert_close(planner.day_total(), before + 30.0);
    assert_eq!(planner.custom_items_for_category("shopping").len(), 1);

    planner.remove_custom_item(&id);
    assert_close(planner.day_total(), before);
    assert!(planner.selection(&id).is_none());
}

#[test]
fn removing_an_unknown_custom_item_is_a_noop() {
    let mut planner = memory_planner();
    planner.remove_custom_item("custom-missing");
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL);
}

#[test]
fn disabling_a_category_zeroes_only_that_day_slice() {
    let mut planner = memory_planner();
    assert!(planner.toggle_category("food"));
    assert_close(planner.category_totals()["food"], 0.0);
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL - 46.0);
    assert!(!planner.toggle_category("food"));
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL);
}

#[test]
fn switching_to_an_unvisited_day_resets_to_defaults() {
    let mut planner = memory_planner();
    planner.set_number_of_days(2);
    planner.set_item_enabled("food-snacks", true);
    planner
        .add_custom_item("food", "Baklava", 5.0)
        .expect("valid category");
    let day0_total = planner.day_total();

    planner.switch_day(1);
    assert_eq!(planner.active_day_index(), 1);
    assert!(planner.custom_items().is_empty());
    assert!(!planner.is_category_disabled("food"));
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL);

    // Day 0's snapshot is untouched by the fresh day.
    let summary = planner.all_days_summary();
    assert_close(summary[0].total, day0_total);
    assert_close(summary[1].total, DEFAULT_DAY_TOTAL);
}

#[test]
fn switching_back_restores_the_earlier_day() {
    let mut planner = memory_planner();
    planner.set_number_of_days(2);
    planner.set_item_enabled("entertainment-museum", true);
    let edited_total = planner.day_total();

    planner.switch_day(1);
    planner.set_slider_value("shopping-budget", 40.0);
    planner.switch_day(0);

    assert!(planner.selection("entertainment-museum").unwrap().enabled);
    assert_close(planner.day_total(), edited_total);

    let summary = planner.all_days_summary();
    assert_close(summary[1].total, DEFAULT_DAY_TOTAL + 40.0);
}

#[test]
fn out_of_range_or_same_day_switches_are_noops() {
    let mut planner = memory_planner();
    planner.set_number_of_days(2);
    planner.switch_day(0);
    planner.switch_day(5);
    assert_eq!(planner.active_day_index(), 0);
}

#[test]
fn grand_total_sums_every_day() {
    let mut planner = memory_planner();
    planner.set_number_of_days(3);
    planner.switch_day(1);
    planner.set_slider_value("shopping-budget", 10.0);
    let summary = planner.all_days_summary();
    assert_eq!(summary.len(), 3);
    assert_close(planner.grand_total(), 3.0 * DEFAULT_DAY_TOTAL + 10.0);
}

#[test]
fn growing_the_trip_materializes_days_lazily() {
    let planner = {
        let mut planner = memory_planner();
        planner.set_number_of_days(4);
        planner
    };
    let summary = planner.all_days_summary();
    assert_eq!(summary.len(), 4);
    for day in &summary[1..] {
        assert_close(day.total, DEFAULT_DAY_TOTAL);
    }
}

#[test]
fn shrinking_truncates_and_clamps_the_active_day() {
    let mut planner = memory_planner();
    planner.set_number_of_days(3);
    planner.switch_day(2);
    planner.set_item_enabled("food-snacks", true);

    planner.set_number_of_days(2);
    assert_eq!(planner.number_of_days(), 2);
    assert_eq!(planner.active_day_index(), 1);
    // The removed day's edits are gone; day 1 is a plain default day.
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL);
}

#[test]
fn bundle_round_trips_through_the_file_store() {
    let dir = tempdir().unwrap();
    let root = Some(dir.path().to_path_buf());

    {
        let store = JsonFileStore::new(root.clone()).unwrap();
        let mut planner = TripPlanner::with_quiet_period(
            istanbul_catalog().clone(),
            Box::new(store),
            Duration::ZERO,
        );
        planner.set_number_of_days(2);
        planner.set_item_enabled("food-snacks", true);
        planner
            .add_custom_item("shopping", "Carpet", 30.0)
            .expect("valid category");
        planner.switch_day(1);
        assert!(planner.poll_persistence().unwrap());
    }

    let store = JsonFileStore::new(root).unwrap();
    let planner = TripPlanner::with_quiet_period(
        istanbul_catalog().clone(),
        Box::new(store),
        Duration::ZERO,
    );
    assert_eq!(planner.number_of_days(), 2);
    assert_eq!(planner.active_day_index(), 1);
    let summary = planner.all_days_summary();
    assert_close(summary[0].total, DEFAULT_DAY_TOTAL + 2.0 * 3.0 + 30.0);
    assert_close(summary[1].total, DEFAULT_DAY_TOTAL);
}

#[test]
fn malformed_storage_falls_back_to_defaults() {
    let store = MemoryStore::with_entries([
        (MULTI_DAY_KEY, "{definitely not json"),
        (CUSTOM_ITEMS_KEY, "[broken"),
    ]);
    let planner = TripPlanner::with_quiet_period(
        istanbul_catalog().clone(),
        Box::new(store),
        Duration::ZERO,
    );
    assert_eq!(planner.number_of_days(), 1);
    assert!(planner.custom_items().is_empty());
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL);
}

#[test]
fn legacy_custom_items_seed_the_first_day() {
    let legacy = vec![CustomItem {
        id: "custom-legacy-1".into(),
        category_id: "shopping".into(),
        label: "Spices".into(),
        price_usd: 12.0,
    }];
    let store = MemoryStore::with_entries([(
        CUSTOM_ITEMS_KEY,
        serde_json::to_string(&legacy).unwrap(),
    )]);
    let planner = TripPlanner::with_quiet_period(
        istanbul_catalog().clone(),
        Box::new(store),
        Duration::ZERO,
    );
    assert_eq!(planner.custom_items().len(), 1);
    assert!(planner.selection("custom-legacy-1").unwrap().enabled);
    assert_close(planner.day_total(), DEFAULT_DAY_TOTAL + 12.0);
}

#[test]
fn custom_item_record_is_written_without_waiting_for_the_debounce() {
    let dir = tempdir().unwrap();
    let root = Some(dir.path().to_path_buf());
    let store = JsonFileStore::new(root.clone()).unwrap();
    let mut planner = TripPlanner::with_quiet_period(
        istanbul_catalog().clone(),
        Box::new(store),
        Duration::from_secs(3600),
    );
    planner
        .add_custom_item("food", "Baklava", 5.0)
        .expect("valid category");

    let reader = JsonFileStore::new(root).unwrap();
    let raw = fs::read_to_string(reader.key_path(CUSTOM_ITEMS_KEY)).unwrap();
    let stored: Vec<CustomItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].label, "Baklava");
}

#[test]
fn debounce_coalesces_edits_until_the_quiet_period() {
    let dir = tempdir().unwrap();
    let root = Some(dir.path().to_path_buf());
    let store = JsonFileStore::new(root.clone()).unwrap();
    let mut planner = TripPlanner::with_quiet_period(
        istanbul_catalog().clone(),
        Box::new(store),
        Duration::from_secs(3600),
    );
    planner.set_item_enabled("food-snacks", true);
    planner.set_slider_value("shopping-budget", 20.0);

    assert!(planner.has_pending_write());
    assert!(!planner.poll_persistence().unwrap());

    let reader = JsonFileStore::new(root).unwrap();
    assert!(!reader.key_path(MULTI_DAY_KEY).exists());

    planner.flush().unwrap();
    assert!(!planner.has_pending_write());
    let raw = fs::read_to_string(reader.key_path(MULTI_DAY_KEY)).unwrap();
    let bundle: DayBundle = serde_json::from_str(&raw).unwrap();
    assert_eq!(bundle.number_of_days, 1);
    assert_eq!(bundle.day_states.len(), 1);
    let snacks = bundle.day_states[0]
        .selections
        .get("food-snacks")
        .unwrap();
    assert!(snacks.enabled);
}
