//! Display-currency conversion and price formatting. Conversion is
//! presentation-only: stored amounts are always USD.

use serde::{Deserialize, Serialize};

/// Supported display currencies with fixed conversion rates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Usd,
    Try,
    Rub,
}

/// Fixed USD conversion rates, updated with catalog refreshes.
const USD_TO_TRY_RATE: f64 = 43.7;
const USD_TO_RUB_RATE: f64 = 77.3;

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Try, Currency::Rub];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Try => "TRY",
            Currency::Rub => "RUB",
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Try => USD_TO_TRY_RATE,
            Currency::Rub => USD_TO_RUB_RATE,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Try => "₺",
            Currency::Rub => "₽",
        }
    }
}

/// The session's single active display currency.
#[derive(Debug, Clone, Default)]
pub struct CurrencyContext {
    active: Currency,
}

impl CurrencyContext {
    pub fn new(active: Currency) -> Self {
        Self { active }
    }

    pub fn currency(&self) -> Currency {
        self.active
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.active = currency;
    }

    /// Converts a USD amount into the active currency, rounded half-up
    /// at the cent.
    pub fn convert(&self, usd: f64) -> f64 {
        (usd * self.active.rate() * 100.0).round() / 100.0
    }

    /// Formats a USD amount for display. USD renders symbol-first with
    /// cents only when fractional; TRY and RUB render whole-number
    /// amounts with a trailing symbol.
    pub fn format_price(&self, usd: f64) -> String {
        let converted = self.convert(usd);
        match self.active {
            Currency::Usd => {
                if converted.fract() == 0.0 {
                    format!("${:.0}", converted)
                } else {
                    format!("${:.2}", converted)
                }
            }
            _ => format!("{:.0} {}", converted, self.active.symbol()),
        }
    }
}
