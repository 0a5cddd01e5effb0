//! Cosmetic currency conversion for the quote display.
//!
//! Prices are always computed and compared in CZK; the converted figure is a
//! convenience for whoever reads the quote, never an input to carrier
//! selection. Every failure path short-circuits to an unconverted display.

use std::collections::HashMap;

/// Exchange rates relative to CZK, keyed by currency code.
pub type RateTable = HashMap<String, f64>;

pub const BASE_CURRENCY: &str = "CZK";
pub const BASE_SYMBOL: &str = "Kč";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountryCurrency {
    pub country: &'static str,
    pub code: &'static str,
    pub symbol: &'static str,
}

/// Display currencies per destination country.
pub const COUNTRY_CURRENCIES: &[CountryCurrency] = &[
    CountryCurrency { country: "CZ", code: "CZK", symbol: "Kč" },
    CountryCurrency { country: "SK", code: "EUR", symbol: "€" },
    CountryCurrency { country: "DE", code: "EUR", symbol: "€" },
    CountryCurrency { country: "HU", code: "HUF", symbol: "Ft" },
    CountryCurrency { country: "PL", code: "PLN", symbol: "zł" },
    CountryCurrency { country: "HR", code: "EUR", symbol: "€" },
    CountryCurrency { country: "SI", code: "EUR", symbol: "€" },
    CountryCurrency { country: "RO", code: "RON", symbol: "lei" },
];

/// Static rates for degraded display when the rate service is down.
pub fn fallback_rates() -> RateTable {
    let mut rates = RateTable::new();
    rates.insert("EUR".into(), 1.0 / 24.50);
    rates.insert("HUF".into(), 1.0 / 0.064);
    rates.insert("PLN".into(), 1.0 / 5.60);
    rates.insert("RON".into(), 1.0 / 5.35);
    rates
}

pub fn currency_for_country(country: &str) -> Option<&'static CountryCurrency> {
    COUNTRY_CURRENCIES.iter().find(|c| c.country == country)
}

/// A price ready for rendering, possibly converted to a local currency.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayPrice {
    pub value: f64,
    pub code: &'static str,
    pub symbol: &'static str,
    pub converted: bool,
}

impl DisplayPrice {
    fn base(value: f64) -> Self {
        Self {
            value,
            code: BASE_CURRENCY,
            symbol: BASE_SYMBOL,
            converted: false,
        }
    }
}

/// Converts a CZK price to the destination country's currency.
///
/// Missing rates, an unknown country, or a CZK destination all fall back to
/// the base currency; the quote itself is unaffected.
pub fn convert_price(price_czk: f64, country: &str, rates: Option<&RateTable>) -> DisplayPrice {
    let Some(rates) = rates else {
        return DisplayPrice::base(price_czk);
    };
    let Some(currency) = currency_for_country(country) else {
        return DisplayPrice::base(price_czk);
    };
    if currency.code == BASE_CURRENCY {
        return DisplayPrice::base(price_czk);
    }
    let Some(rate) = rates.get(currency.code).copied().filter(|r| *r > 0.0) else {
        return DisplayPrice::base(price_czk);
    };

    DisplayPrice {
        value: price_czk * rate,
        code: currency.code,
        symbol: currency.symbol,
        converted: true,
    }
}

/// Formats a display price with its symbol. CZK and HUF are whole-unit
/// currencies; everything else gets two decimals. Thousands are grouped with
/// a space, decimals use a comma, per the regional convention.
pub fn format_price(price: &DisplayPrice) -> String {
    let decimals = match price.code {
        "CZK" | "HUF" => 0,
        _ => 2,
    };
    format!("{} {}", format_amount(price.value, decimals), price.symbol)
}

fn format_amount(value: f64, decimals: usize) -> String {
    let rounded = format!("{value:.decimals$}");
    let (whole, frac) = match rounded.split_once('.') {
        Some((whole, frac)) => (whole.to_string(), Some(frac.to_string())),
        None => (rounded, None),
    };

    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    match frac {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateTable {
        let mut table = RateTable::new();
        table.insert("EUR".into(), 0.04);
        table.insert("HUF".into(), 15.6);
        table
    }

    #[test]
    fn converts_to_destination_currency() {
        let table = rates();
        let price = convert_price(1000.0, "SK", Some(&table));
        assert!(price.converted);
        assert_eq!(price.code, "EUR");
        assert!((price.value - 40.0).abs() < 1e-9);
    }

    #[test]
    fn base_country_is_never_converted() {
        let table = rates();
        let price = convert_price(450.0, "CZ", Some(&table));
        assert!(!price.converted);
        assert_eq!(price.code, "CZK");
        assert_eq!(price.value, 450.0);
    }

    #[test]
    fn missing_rates_fall_back_to_base_currency() {
        let price = convert_price(450.0, "SK", None);
        assert!(!price.converted);
        assert_eq!(price.symbol, "Kč");
    }

    #[test]
    fn unknown_country_falls_back_to_base_currency() {
        let table = rates();
        let price = convert_price(450.0, "XX", Some(&table));
        assert!(!price.converted);
    }

    #[test]
    fn missing_single_rate_falls_back() {
        let table = rates();
        let price = convert_price(450.0, "PL", Some(&table));
        assert!(!price.converted);
    }

    #[test]
    fn whole_unit_currencies_drop_decimals() {
        let czk = DisplayPrice {
            value: 12345.678,
            code: "CZK",
            symbol: "Kč",
            converted: false,
        };
        assert_eq!(format_price(&czk), "12 346 Kč");

        let eur = DisplayPrice {
            value: 1234.5,
            code: "EUR",
            symbol: "€",
            converted: true,
        };
        assert_eq!(format_price(&eur), "1 234,50 €");
    }

    #[test]
    fn fallback_table_covers_the_non_base_display_currencies() {
        let rates = fallback_rates();
        for currency in COUNTRY_CURRENCIES {
            if currency.code != BASE_CURRENCY {
                assert!(rates.contains_key(currency.code), "{}", currency.code);
            }
        }
    }
}
