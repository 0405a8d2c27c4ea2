//! Money type and locale-aware currency formatting.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues in totals. Prices arrive from the backend as decimals
//! and are converted once, at the edge.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    MXN,
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
}

impl Currency {
    /// Get the currency code (e.g., "MXN").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::MXN => "MXN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
        }
    }

    /// Symbol used outside the currency's home locale.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::MXN => "MX$",
            Currency::USD => "US$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "MXN" => Some(Currency::MXN),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., centavos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Non-finite input yields `None`.
    ///
    /// ```
    /// use hbspa_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::MXN).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let multiplier = 10_i64.pow(currency.decimal_places());
        let scaled = (amount * multiplier as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Try to add another Money value, returning None on currency mismatch
    /// or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| {
            if m.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: m.currency.code().to_string(),
                });
            }
            acc.try_add(m).ok_or(CommerceError::Overflow)
        })
    }

    /// Plain `$1234.50` rendering used when no locale rules apply.
    pub fn display_fallback(&self) -> String {
        format!("${:.2}", self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_fallback())
    }
}

/// Number and symbol conventions of one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleRules {
    group: &'static str,
    decimal: &'static str,
    /// Integer digits needed before grouping kicks in.
    min_grouping_digits: usize,
    symbol_after: bool,
    home_currency: Currency,
    home_symbol: &'static str,
}

impl LocaleRules {
    fn for_tag(tag: &str) -> Option<Self> {
        let rules = match tag.to_ascii_lowercase().replace('_', "-").as_str() {
            "es-mx" => Self::prefix(",", ".", Currency::MXN, "$"),
            "en-us" | "en" => Self::prefix(",", ".", Currency::USD, "$"),
            "en-ca" => Self::prefix(",", ".", Currency::CAD, "$"),
            "en-gb" => Self::prefix(",", ".", Currency::GBP, "\u{00a3}"),
            "ja-jp" => Self::prefix(",", ".", Currency::JPY, "\u{ffe5}"),
            "es-es" | "es" => LocaleRules {
                min_grouping_digits: 5,
                ..Self::suffix(".", ",", Currency::EUR, "\u{20ac}")
            },
            "de-de" | "de" => Self::suffix(".", ",", Currency::EUR, "\u{20ac}"),
            "fr-fr" | "fr" => Self::suffix("\u{202f}", ",", Currency::EUR, "\u{20ac}"),
            _ => return None,
        };
        Some(rules)
    }

    fn prefix(group: &'static str, decimal: &'static str, home: Currency, sym: &'static str) -> Self {
        Self {
            group,
            decimal,
            min_grouping_digits: 4,
            symbol_after: false,
            home_currency: home,
            home_symbol: sym,
        }
    }

    fn suffix(group: &'static str, decimal: &'static str, home: Currency, sym: &'static str) -> Self {
        Self {
            symbol_after: true,
            ..Self::prefix(group, decimal, home, sym)
        }
    }

    fn symbol_for(&self, currency: Currency) -> &'static str {
        if currency == self.home_currency {
            self.home_symbol
        } else {
            currency.symbol()
        }
    }
}

/// Locale-aware currency formatter.
///
/// ```
/// use hbspa_commerce::money::{Currency, Money, MoneyFormatter};
/// let fmt = MoneyFormatter::new("es-MX", Currency::MXN);
/// assert_eq!(fmt.format_or_fallback(&Money::new(123450, Currency::MXN)), "$1,234.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormatter {
    locale: String,
    currency: Currency,
}

impl Default for MoneyFormatter {
    fn default() -> Self {
        Self::new("es-MX", Currency::MXN)
    }
}

impl MoneyFormatter {
    /// Create a formatter for a BCP 47 locale tag and display currency.
    pub fn new(locale: impl Into<String>, currency: Currency) -> Self {
        Self {
            locale: locale.into(),
            currency,
        }
    }

    /// The configured locale tag.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The display currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Format per the locale's rules.
    pub fn format(&self, money: &Money) -> Result<String, CommerceError> {
        let rules = LocaleRules::for_tag(&self.locale)
            .ok_or_else(|| CommerceError::UnsupportedLocale(self.locale.clone()))?;

        let places = money.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let magnitude = money.amount_cents.unsigned_abs();
        let whole = group_digits(&(magnitude / divisor).to_string(), &rules);
        let number = if places == 0 {
            whole
        } else {
            format!(
                "{}{}{:0width$}",
                whole,
                rules.decimal,
                magnitude % divisor,
                width = places as usize
            )
        };

        let sign = if money.amount_cents < 0 { "-" } else { "" };
        let symbol = rules.symbol_for(money.currency);
        Ok(if rules.symbol_after {
            format!("{sign}{number}\u{a0}{symbol}")
        } else {
            format!("{sign}{symbol}{number}")
        })
    }

    /// Format per the locale's rules, falling back to `$0.00` style text.
    pub fn format_or_fallback(&self, money: &Money) -> String {
        self.format(money)
            .unwrap_or_else(|_| money.display_fallback())
    }

    /// Format a raw decimal amount in the display currency.
    ///
    /// Non-finite amounts render as empty text.
    pub fn format_amount(&self, amount: f64) -> String {
        match Money::from_decimal(amount, self.currency) {
            Some(money) => self.format_or_fallback(&money),
            None => String::new(),
        }
    }
}

fn group_digits(digits: &str, rules: &LocaleRules) -> String {
    if digits.len() < rules.min_grouping_digits {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * rules.group.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(rules.group);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::MXN).unwrap();
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY).unwrap();
        assert_eq!(m.amount_cents, 100);

        assert!(Money::from_decimal(f64::NAN, Currency::MXN).is_none());
        assert!(Money::from_decimal(f64::INFINITY, Currency::MXN).is_none());
    }

    #[test]
    fn test_try_sum_and_multiply() {
        let a = Money::new(5000, Currency::MXN);
        let doubled = a.try_multiply(2).unwrap();
        assert_eq!(doubled.amount_cents, 10000);

        let total = Money::try_sum([a, doubled].iter(), Currency::MXN).unwrap();
        assert_eq!(total.amount_cents, 15000);

        assert!(Money::new(i64::MAX, Currency::MXN).try_multiply(2).is_none());
    }

    #[test]
    fn test_try_sum_currency_mismatch() {
        let items = [Money::new(1, Currency::MXN), Money::new(1, Currency::USD)];
        let err = Money::try_sum(items.iter(), Currency::MXN).unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_format_es_mx() {
        let fmt = MoneyFormatter::default();
        assert_eq!(fmt.format(&Money::new(10000, Currency::MXN)).unwrap(), "$100.00");
        assert_eq!(fmt.format(&Money::new(123456789, Currency::MXN)).unwrap(), "$1,234,567.89");
        assert_eq!(fmt.format(&Money::new(-150, Currency::MXN)).unwrap(), "-$1.50");
        assert_eq!(fmt.format(&Money::new(500, Currency::USD)).unwrap(), "US$5.00");
    }

    #[test]
    fn test_format_suffix_locales() {
        let de = MoneyFormatter::new("de-DE", Currency::EUR);
        assert_eq!(de.format(&Money::new(123450, Currency::EUR)).unwrap(), "1.234,50\u{a0}\u{20ac}");

        let es = MoneyFormatter::new("es-ES", Currency::EUR);
        assert_eq!(es.format(&Money::new(123450, Currency::EUR)).unwrap(), "1234,50\u{a0}\u{20ac}");
        assert_eq!(es.format(&Money::new(1234500, Currency::EUR)).unwrap(), "12.345,00\u{a0}\u{20ac}");
    }

    #[test]
    fn test_format_zero_decimal_currency() {
        let fmt = MoneyFormatter::new("ja-JP", Currency::JPY);
        assert_eq!(fmt.format(&Money::new(1235, Currency::JPY)).unwrap(), "\u{ffe5}1,235");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let fmt = MoneyFormatter::new("xx-YY", Currency::MXN);
        assert!(fmt.format(&Money::new(10000, Currency::MXN)).is_err());
        assert_eq!(fmt.format_or_fallback(&Money::new(123450, Currency::MXN)), "$1234.50");
    }

    #[test]
    fn test_format_amount_non_finite_is_empty() {
        let fmt = MoneyFormatter::default();
        assert_eq!(fmt.format_amount(f64::NAN), "");
        assert_eq!(fmt.format_amount(50.0), "$50.00");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("MXN"), Some(Currency::MXN));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
