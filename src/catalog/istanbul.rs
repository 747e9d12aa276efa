//! Stock Istanbul catalog shipped with the estimator. Prices are rough
//! per-day USD figures; the engine treats this like any other catalog.

use once_cell::sync::Lazy;

use super::{Catalog, Category, ExpenseItem, SliderOption};

static ISTANBUL: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(vec![
        accommodation(),
        food(),
        transport(),
        entertainment(),
        connectivity(),
        shopping(),
        health(),
    ])
    .expect("stock catalog ids are unique")
});

/// Returns the built-in Istanbul expense catalog.
pub fn istanbul_catalog() -> &'static Catalog {
    &ISTANBUL
}

fn option(label: &str, value_usd: f64) -> SliderOption {
    SliderOption {
        label: label.into(),
        value_usd,
    }
}

fn enabled(item: ExpenseItem) -> ExpenseItem {
    ExpenseItem {
        default_enabled: Some(true),
        ..item
    }
}

fn accommodation() -> Category {
    Category {
        id: "accommodation".into(),
        icon: "🏠".into(),
        title: "Accommodation".into(),
        items: vec![ExpenseItem {
            min: Some(0.0),
            max: Some(5.0),
            step: Some(1.0),
            default_value: Some(1.0),
            options: Some(vec![
                option("Hostel (dorm)", 12.0),
                option("Hostel (private)", 25.0),
                option("Airbnb / guesthouse", 45.0),
                option("3-star hotel", 70.0),
                option("4-star hotel", 120.0),
                option("5-star hotel", 200.0),
            ]),
            ..ExpenseItem::slider("accommodation-level", "Accommodation tier", 12.0)
        }],
    }
}

fn food() -> Category {
    Category {
        id: "food".into(),
        icon: "🍽".into(),
        title: "Food".into(),
        items: vec![
            ExpenseItem {
                min: Some(0.0),
                max: Some(3.0),
                step: Some(1.0),
                default_value: Some(0.0),
                options: Some(vec![
                    option("Street food", 2.0),
                    option("Budget cafe", 5.0),
                    option("Mid-range cafe", 8.0),
                    option("Restaurant", 15.0),
                ]),
                ..ExpenseItem::slider("food-level", "Dining tier (per meal)", 2.0)
            },
            enabled(ExpenseItem::checkbox("food-breakfast", "Breakfast", 4.0)),
            enabled(ExpenseItem::checkbox("food-lunch", "Lunch", 7.0)),
            enabled(ExpenseItem::checkbox("food-dinner", "Dinner", 10.0)),
            ExpenseItem::checkbox("food-snacks", "Snacks", 3.0),
            enabled(ExpenseItem::checkbox("food-coffee", "Coffee / tea", 2.0)),
        ],
    }
}

fn transport() -> Category {
    Category {
        id: "transport".into(),
        icon: "🚇".into(),
        title: "Transport".into(),
        items: vec![
            enabled(ExpenseItem::checkbox(
                "transport-istanbulkart",
                "IstanbulKart (metro/bus/tram, per ride)",
                0.7,
            )),
            ExpenseItem::checkbox("transport-taxi", "Taxi (short ride)", 6.0),
            ExpenseItem {
                min: Some(0.0),
                max: Some(5.0),
                step: Some(1.0),
                default_value: Some(1.0),
                unit: Some("rides".into()),
                ..ExpenseItem::slider("transport-taxi-rides", "Taxi rides per day", 6.0)
            },
            ExpenseItem::checkbox("transport-ferry", "Ferry", 1.5),
            ExpenseItem::checkbox("transport-dolmus", "Dolmus (minibus)", 1.0),
        ],
    }
}

fn entertainment() -> Category {
    Category {
        id: "entertainment".into(),
        icon: "🎭".into(),
        title: "Entertainment".into(),
        items: vec![
            ExpenseItem::checkbox(
                "entertainment-museum",
                "Museums (Hagia Sophia, Topkapi)",
                25.0,
            ),
            ExpenseItem::checkbox("entertainment-cruise", "Bosphorus cruise (short)", 12.0),
            ExpenseItem::checkbox("entertainment-hamam", "Hamam (standard)", 50.0),
            ExpenseItem::checkbox("entertainment-excursion", "Excursion (half day)", 40.0),
            ExpenseItem::checkbox(
                "entertainment-nightlife",
                "Nightlife (entry + drink)",
                12.0,
            ),
        ],
    }
}

fn connectivity() -> Category {
    Category {
        id: "connectivity".into(),
        icon: "📱".into(),
        title: "Connectivity".into(),
        items: vec![
            enabled(ExpenseItem::checkbox(
                "connectivity-sim",
                "Turkish SIM (10GB)",
                15.0,
            )),
            ExpenseItem::checkbox("connectivity-roaming", "Roaming (per day)", 10.0),
            ExpenseItem::checkbox("connectivity-esim", "eSIM (7 days)", 12.0),
        ],
    }
}

fn shopping() -> Category {
    Category {
        id: "shopping".into(),
        icon: "🛍".into(),
        title: "Shopping".into(),
        items: vec![ExpenseItem {
            min: Some(0.0),
            max: Some(200.0),
            step: Some(10.0),
            default_value: Some(0.0),
            unit: Some("$".into()),
            ..ExpenseItem::slider("shopping-budget", "Shopping / souvenir budget", 0.0)
        }],
    }
}

fn health() -> Category {
    Category {
        id: "health".into(),
        icon: "💊".into(),
        title: "Health".into(),
        items: vec![
            enabled(ExpenseItem::checkbox(
                "health-insurance",
                "Insurance (per day)",
                5.0,
            )),
            ExpenseItem::checkbox("health-pharmacy", "Pharmacy (medication)", 10.0),
        ],
    }
}
