//! Currency table, USD conversion and display formatting.
//!
//! All backend amounts are USD. A fixed lookup decides the symbol and the
//! display precision per currency; rates can be overridden from the config
//! file but symbols and precision are not locale dependent.

use anyhow::{Result, bail};
use std::collections::HashMap;

/// A display currency with its fixed multiplier against the USD base.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySpec {
    pub code: String,
    pub symbol: String,
    /// Multiplier from USD: `display_value = usd_amount * rate`.
    pub rate: f64,
    /// Fraction digits for display. Zero means grouped whole units.
    pub decimals: u8,
}

/// Read-only table of supported display currencies.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    currencies: Vec<CurrencySpec>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        let spec = |code: &str, symbol: &str, rate: f64, decimals: u8| CurrencySpec {
            code: code.to_string(),
            symbol: symbol.to_string(),
            rate,
            decimals,
        };

        CurrencyTable {
            currencies: vec![
                spec("USD", "$", 1.0, 0),
                spec("EUR", "€", 0.92, 0),
                spec("SOL", "◎", 9.85, 2),
                spec("BTC", "₿", 0.000015, 4),
                spec("ETH", "Ξ", 0.00031, 4),
            ],
        }
    }
}

impl CurrencyTable {
    /// Builds the table from the defaults with rate overrides applied.
    /// Override codes unknown to the table are rejected, since no symbol or
    /// precision rule exists for them.
    pub fn with_overrides(overrides: &HashMap<String, f64>) -> Result<Self> {
        let mut table = CurrencyTable::default();
        for (code, rate) in overrides {
            if *rate <= 0.0 {
                bail!("Rate for {code} must be positive, got {rate}");
            }
            match table.currencies.iter_mut().find(|c| &c.code == code) {
                Some(spec) => spec.rate = *rate,
                None => bail!("Unknown currency code in rate overrides: {code}"),
            }
        }
        Ok(table)
    }

    pub fn get(&self, code: &str) -> Result<&CurrencySpec> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                anyhow::anyhow!("Unsupported currency: {code} (supported: {})", self.codes())
            })
    }

    pub fn codes(&self) -> String {
        self.currencies
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl CurrencySpec {
    /// Converts a USD amount into this currency.
    pub fn convert(&self, usd_amount: f64) -> f64 {
        usd_amount * self.rate
    }

    /// Converts and formats a USD amount for display, e.g. `$95,000`,
    /// `₿1.4250`, `◎985.00`.
    pub fn format(&self, usd_amount: f64) -> String {
        let value = self.convert(usd_amount);
        if self.decimals == 0 {
            format!("{}{}", self.symbol, group_thousands(value.round() as i64))
        } else {
            format!(
                "{}{:.prec$}",
                self.symbol,
                value,
                prec = self.decimals as usize
            )
        }
    }
}

/// Renders a whole number with `,` thousands separators.
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let table = CurrencyTable::default();
        assert_eq!(table.get("USD").unwrap().rate, 1.0);
        assert_eq!(table.get("EUR").unwrap().rate, 0.92);
        assert_eq!(table.get("SOL").unwrap().rate, 9.85);
        assert_eq!(table.get("BTC").unwrap().rate, 0.000015);
        assert_eq!(table.get("ETH").unwrap().rate, 0.00031);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = CurrencyTable::default();
        assert_eq!(table.get("eur").unwrap().code, "EUR");
    }

    #[test]
    fn test_unknown_currency_is_an_error() {
        let table = CurrencyTable::default();
        let err = table.get("GBP").unwrap_err().to_string();
        assert!(err.contains("Unsupported currency: GBP"));
    }

    #[test]
    fn test_conversion_round_trip() {
        let table = CurrencyTable::default();
        for code in ["USD", "EUR", "SOL", "BTC", "ETH"] {
            let spec = table.get(code).unwrap();
            let original = 95_000.0;
            let round_tripped = spec.convert(original) / spec.rate;
            assert!(
                (round_tripped - original).abs() < 1e-6,
                "round trip through {code} drifted: {round_tripped}"
            );
        }
    }

    #[test]
    fn test_fiat_formats_grouped_whole_units() {
        let table = CurrencyTable::default();
        assert_eq!(table.get("USD").unwrap().format(95_000.0), "$95,000");
        assert_eq!(table.get("EUR").unwrap().format(95_000.0), "€87,400");
        assert_eq!(table.get("USD").unwrap().format(1_234_567.0), "$1,234,567");
        assert_eq!(table.get("USD").unwrap().format(999.0), "$999");
    }

    #[test]
    fn test_crypto_formats_high_precision() {
        let table = CurrencyTable::default();
        assert_eq!(table.get("BTC").unwrap().format(95_000.0), "₿1.4250");
        assert_eq!(table.get("ETH").unwrap().format(95_000.0), "Ξ29.4500");
        assert_eq!(table.get("SOL").unwrap().format(100.0), "◎985.00");
    }

    #[test]
    fn test_rate_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("EUR".to_string(), 0.95);
        let table = CurrencyTable::with_overrides(&overrides).unwrap();
        assert_eq!(table.get("EUR").unwrap().rate, 0.95);
        assert_eq!(table.get("USD").unwrap().rate, 1.0);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("EUR".to_string(), -1.0);
        assert!(CurrencyTable::with_overrides(&overrides).is_err());

        let mut overrides = HashMap::new();
        overrides.insert("XYZ".to_string(), 2.0);
        assert!(CurrencyTable::with_overrides(&overrides).is_err());
    }
}
