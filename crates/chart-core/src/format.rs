//! Value formatting for axis ticks, tooltips and labels

choice_enum! {
    /// How plotted values are displayed
    pub enum ValueFormat ("value format") {
        /// Plain number with K/M suffixing
        Number => "number",
        /// Raw number followed by `%`
        Percent => "percent",
        /// Currency symbol, then number with K/M suffixing
        Currency => "currency",
        /// Raw number followed by `x`
        Multiplier => "multiplier",
    }
    default = Number;
}

// ============================================================================
// STRATEGY PATTERN: Number Formatter
// ============================================================================

/// Strategy trait for turning plotted values into display text
pub trait NumberFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Formatter driven by a [`ValueFormat`] and a currency symbol
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormatter {
    pub format: ValueFormat,
    pub currency_symbol: String,
}

impl ValueFormatter {
    pub fn new(format: ValueFormat, currency_symbol: impl Into<String>) -> Self {
        Self {
            format,
            currency_symbol: currency_symbol.into(),
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(ValueFormat::Number, "$")
    }
}

impl NumberFormatter for ValueFormatter {
    fn format(&self, value: f64) -> String {
        match self.format {
            ValueFormat::Percent => format!("{}%", js_number(value)),
            ValueFormat::Multiplier => format!("{}x", js_number(value)),
            ValueFormat::Currency => format!("{}{}", self.currency_symbol, compact(value)),
            ValueFormat::Number => compact(value),
        }
    }
}

/// K/M suffixed form used by number and currency formats
fn compact(value: f64) -> String {
    let abs = value.abs();

    if abs >= 1_000_000.0 {
        format!("{}M", to_fixed(value / 1_000_000.0, 1))
    } else if abs >= 1_000.0 {
        format!("{}K", to_fixed(value / 1_000.0, 1))
    } else {
        js_number(value)
    }
}

// ============================================================================
// JS-COMPATIBLE NUMBER TEXT
// ============================================================================

/// Shortest round-trip text of a number, spelled the way JavaScript prints it.
///
/// `-0` prints as `0`, non-finite values as `NaN` / `Infinity`, and
/// magnitudes outside `[1e-7, 1e21)` use exponent notation.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }

    value.to_string()
}

/// Fixed-point text with `digits` decimals, like JavaScript `toFixed`.
///
/// Rounding is on the exact binary value, so `1.005` stays `1.00`, but an
/// exact tie goes away from zero (`1.25` -> `1.3`, `-1.25` -> `-1.3`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return js_number(value);
    }
    let magnitude = value.abs();
    let text = match exact_tie(magnitude, digits) {
        Some(kept) => increment_last_digit(&kept),
        None => format!("{:.prec$}", magnitude, prec = digits),
    };

    if value < 0.0 { format!("-{}", text) } else { text }
}

/// Digits kept by `to_fixed` when `magnitude` sits exactly halfway between
/// two candidates.
///
/// A tie needs a decimal expansion ending in `5` at `digits + 1` places, which
/// implies at most `digits + 1` binary fraction bits. Under that condition the
/// `digits + 1` expansion is exact.
fn exact_tie(magnitude: f64, digits: usize) -> Option<String> {
    let bits = i32::try_from(digits + 1).ok()?;
    if (magnitude * 2_f64.powi(bits)).fract() != 0.0 {
        return None;
    }
    let exact = format!("{:.prec$}", magnitude, prec = digits + 1);
    exact.strip_suffix('5').map(|kept| kept.trim_end_matches('.').to_string())
}

/// Add one unit in the last place of a plain decimal string
fn increment_last_digit(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let mut carry = true;

    for c in chars.iter_mut().rev() {
        match *c {
            '.' => continue,
            '9' => *c = '0',
            digit => {
                *c = char::from_digit(digit.to_digit(10).unwrap_or(0) + 1, 10).unwrap_or(digit);
                carry = false;
                break;
            }
        }
    }
    if carry {
        chars.insert(0, '1');
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_format_suffixes() {
        let f = ValueFormatter::new(ValueFormat::Number, "$");
        assert_eq!(f.format(999.0), "999");
        assert_eq!(f.format(1000.0), "1.0K");
        assert_eq!(f.format(2_400.0), "2.4K");
        assert_eq!(f.format(1_000_000.0), "1.0M");
        assert_eq!(f.format(-1_500.0), "-1.5K");
        assert_eq!(f.format(12.5), "12.5");
    }

    #[test]
    fn test_currency_prefixes_symbol() {
        let f = ValueFormatter::new(ValueFormat::Currency, "$");
        assert_eq!(f.format(1500.0), "$1.5K");
        assert_eq!(f.format(42.0), "$42");
        assert_eq!(f.format(-2_000_000.0), "$-2.0M");

        let pounds = ValueFormatter::new(ValueFormat::Currency, "£");
        assert_eq!(pounds.format(9_800.0), "£9.8K");
    }

    #[test]
    fn test_percent_and_multiplier_skip_suffixes() {
        let pct = ValueFormatter::new(ValueFormat::Percent, "$");
        assert_eq!(pct.format(14.8), "14.8%");
        assert_eq!(pct.format(25_000.0), "25000%");

        let mult = ValueFormatter::new(ValueFormat::Multiplier, "$");
        assert_eq!(mult.format(2.5), "2.5x");
        assert_eq!(mult.format(1_000_000.0), "1000000x");
    }

    #[test]
    fn test_nan_propagates() {
        let f = ValueFormatter::new(ValueFormat::Currency, "$");
        assert_eq!(f.format(f64::NAN), "$NaN");
        assert_eq!(ValueFormatter::default().format(f64::NAN), "NaN");
    }

    #[test]
    fn test_js_number() {
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(js_number(1e21), "1e+21");
        assert_eq!(js_number(1.5e-7), "1.5e-7");
        assert_eq!(js_number(f64::INFINITY), "Infinity");
        assert_eq!(js_number(56.25), "56.25");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(0.5625, 4), "0.5625");
        assert_eq!(to_fixed(1.0, 1), "1.0");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
    }

    #[test]
    fn test_to_fixed_ties_round_away_from_zero() {
        assert_eq!(to_fixed(1.25, 1), "1.3");
        assert_eq!(to_fixed(-1.25, 1), "-1.3");
        assert_eq!(to_fixed(9.75, 1), "9.8");
        assert_eq!(to_fixed(9.95, 1), "9.9");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        // Not a tie once the binary value is exact
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
    }

    #[test]
    fn test_suffixes_round_ties_up() {
        let f = ValueFormatter::default();
        let labels = [1250.0, 2750.0, -1250.0, 1_250_000.0, 3750.0].map(|v| f.format(v));
        assert_eq!(labels, ["1.3K", "2.8K", "-1.3K", "1.3M", "3.8K"]);
    }

    #[test]
    fn test_value_format_parse() {
        assert_eq!("currency".parse::<ValueFormat>().unwrap(), ValueFormat::Currency);
        assert!("Currency".parse::<ValueFormat>().is_err());
        assert_eq!(ValueFormat::Multiplier.to_string(), "multiplier");
    }
}
