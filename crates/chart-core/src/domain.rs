//! Axis domain derivation

use serde::{Deserialize, Serialize};

/// Domain used when no data and no overrides are available
pub const FALLBACK_DOMAIN: Domain = Domain { min: 0.0, max: 20.0 };

/// Fraction of the observed range added to an auto-derived bound
pub const DOMAIN_PADDING: f64 = 0.1;

/// `[min, max]` range an axis is scaled to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// A zero reference line is drawn when the domain crosses zero
    pub fn straddles_zero(&self) -> bool {
        self.min < 0.0 && self.max > 0.0
    }

    /// Zero when it lies inside the domain, otherwise the nearest bound.
    /// Bars and areas grow from this value.
    pub fn baseline(&self) -> f64 {
        0.0_f64.clamp(self.min.min(self.max), self.max.max(self.min))
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Optional explicit bounds for one axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DomainBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DomainBounds {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub const fn auto() -> Self {
        Self::new(None, None)
    }
}

/// Derive an axis domain from data values and optional overrides.
///
/// Both overrides present: used verbatim. Otherwise every auto-derived bound
/// is padded outward by 10% of the range, and zero stays inside the domain
/// whenever the data reaches across it. Non-finite values are ignored.
pub fn calculate_domain(values: &[f64], bounds: DomainBounds) -> Domain {
    if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
        return Domain::new(min, max);
    }

    let finite = values.iter().copied().filter(|v| v.is_finite());
    let Some((data_min, data_max)) = finite.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return Domain::new(
            bounds.min.unwrap_or(FALLBACK_DOMAIN.min),
            bounds.max.unwrap_or(FALLBACK_DOMAIN.max),
        );
    };

    let mut min = bounds.min.unwrap_or(data_min);
    let mut max = bounds.max.unwrap_or(data_max);

    if data_min < 0.0 && min > 0.0 {
        min = 0.0;
    }
    if data_max > 0.0 && max < 0.0 {
        max = 0.0;
    }

    let padding = (max - min).abs() * DOMAIN_PADDING;

    if bounds.min.is_none() {
        min = if min < 0.0 { min - padding } else { min.min(0.0) };
    }
    if bounds.max.is_none() {
        max = if max > 0.0 { max + padding } else { max.max(0.0) };
    }

    tracing::debug!(min, max, "Calculated axis domain");
    Domain::new(min, max)
}

/// Domain for value axes that always start from zero (bar, line, area).
///
/// `fixed_max` pins the domain to `[0, fixed_max]`; otherwise the data
/// extrema are widened to include zero. A flat data set gets a unit span.
pub fn zero_based_domain(values: &[f64], fixed_max: Option<f64>) -> Domain {
    if let Some(max) = fixed_max.filter(|m| m.is_finite()) {
        return Domain::new(0.0, max);
    }

    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min == max {
        Domain::new(min, min + 1.0)
    } else {
        Domain::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_overrides_verbatim() {
        let d = calculate_domain(&[-50.0, 500.0], DomainBounds::new(Some(0.0), Some(20.0)));
        assert_eq!(d, Domain::new(0.0, 20.0));
    }

    #[test]
    fn test_auto_domain_pads_and_includes_zero() {
        let d = calculate_domain(&[-22.0, 6.0, 18.0], DomainBounds::auto());
        assert_eq!(d, Domain::new(-26.0, 22.0));
        assert!(d.straddles_zero());
    }

    #[test]
    fn test_positive_data_starts_at_zero() {
        let d = calculate_domain(&[14.8, 16.5, 17.5], DomainBounds::auto());
        assert_eq!(d.min, 0.0);
        // Padding comes from the observed range, before zero is pulled in.
        assert!((d.max - 17.77).abs() < 1e-9);
        assert!(!d.straddles_zero());
    }

    #[test]
    fn test_negative_data_ends_at_zero() {
        let d = calculate_domain(&[-10.0, -4.0], DomainBounds::auto());
        assert_eq!(d.max, 0.0);
        assert!((d.min - (-10.6)).abs() < 1e-9);
    }

    #[test]
    fn test_single_override() {
        // Max fixed at 10; min auto-derived from data with padding.
        let d = calculate_domain(&[-5.0, 3.0], DomainBounds::new(None, Some(10.0)));
        assert_eq!(d.max, 10.0);
        assert!((d.min - (-5.0 - 1.5)).abs() < 1e-9);

        // A positive min override is pulled to zero when data goes negative.
        let d = calculate_domain(&[-5.0, 3.0], DomainBounds::new(Some(2.0), None));
        assert_eq!(d.min, 0.0);
        assert!((d.max - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(calculate_domain(&[], DomainBounds::auto()), FALLBACK_DOMAIN);
        assert_eq!(
            calculate_domain(&[f64::NAN], DomainBounds::new(Some(-1.0), None)),
            Domain::new(-1.0, 20.0)
        );
    }

    #[test]
    fn test_baseline() {
        assert_eq!(Domain::new(-10.0, 10.0).baseline(), 0.0);
        assert_eq!(Domain::new(5.0, 10.0).baseline(), 5.0);
        assert_eq!(Domain::new(-10.0, -5.0).baseline(), -5.0);
    }

    #[test]
    fn test_zero_based_domain() {
        assert_eq!(zero_based_domain(&[4.0, 9.0], None), Domain::new(0.0, 9.0));
        assert_eq!(zero_based_domain(&[-3.0, 9.0], None), Domain::new(-3.0, 9.0));
        assert_eq!(zero_based_domain(&[4.0], Some(100.0)), Domain::new(0.0, 100.0));
        assert_eq!(zero_based_domain(&[], None), Domain::new(0.0, 1.0));
        assert_eq!(zero_based_domain(&[4.0], Some(f64::NAN)), Domain::new(0.0, 4.0));
    }
}
