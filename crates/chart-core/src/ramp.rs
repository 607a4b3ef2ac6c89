//! Emphasis ramps: how series (or rows) sharing one base color are told apart

use crate::format::{js_number, to_fixed};

choice_enum! {
    /// Visual channel used to differentiate series
    pub enum ColorMode ("color mode") {
        Opacity => "opacity",
        Brightness => "brightness",
        Contrast => "contrast",
        Saturation => "saturation",
        HueRotate => "hue-rotate",
        None => "none",
    }
    default = Opacity;
}

choice_enum! {
    /// Which end of the sequence carries the base (100%) emphasis
    pub enum ColorDirection ("color direction") {
        FirstToLast => "first-to-last",
        LastToFirst => "last-to-first",
    }
    default = FirstToLast;
}

/// Opacity and optional CSS filter applied to one rendered element
#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis {
    pub opacity: f64,
    pub filter: Option<String>,
}

impl Emphasis {
    pub const fn full() -> Self {
        Self {
            opacity: 1.0,
            filter: None,
        }
    }

    pub const fn with_opacity(opacity: f64) -> Self {
        Self {
            opacity,
            filter: None,
        }
    }

    /// Inline style carrying the filter, if any
    pub fn filter_style(&self) -> Option<String> {
        self.filter.as_ref().map(|f| format!("filter: {};", f))
    }
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::full()
    }
}

/// Ramp parameters shared by the line and scatter families
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampSpec {
    pub mode: ColorMode,
    /// Percentage step (degrees for hue-rotate)
    pub increment: f64,
    pub direction: ColorDirection,
}

impl Default for RampSpec {
    fn default() -> Self {
        Self {
            mode: ColorMode::Opacity,
            increment: 25.0,
            direction: ColorDirection::FirstToLast,
        }
    }
}

// ============================================================================
// RAMP GENERATION
// ============================================================================

/// Generate `count` emphasis descriptors.
///
/// Hue rotation is additive. Every other mode compounds from a base of 100:
/// brightness grows by `increment`% per step, opacity, contrast and
/// saturation shrink by it. The first entry is always the base value before
/// any compounding, so a single series is never de-emphasised.
pub fn generate_ramp(count: usize, spec: &RampSpec) -> Vec<Emphasis> {
    if count == 0 {
        return Vec::new();
    }

    match spec.mode {
        ColorMode::None => vec![Emphasis::full(); count],
        ColorMode::HueRotate => (0..count)
            .map(|i| {
                let degrees = i as f64 * spec.increment;
                let degrees = match spec.direction {
                    ColorDirection::FirstToLast => degrees,
                    ColorDirection::LastToFirst => -degrees,
                };
                Emphasis {
                    opacity: 1.0,
                    filter: Some(format!("hue-rotate({}deg)", js_number(degrees))),
                }
            })
            .collect(),
        mode => {
            let factor = match mode {
                ColorMode::Brightness => 1.0 + spec.increment / 100.0,
                _ => 1.0 - spec.increment / 100.0,
            };

            let mut raw = Vec::with_capacity(count);
            let mut current = 100.0;
            for _ in 0..count {
                raw.push(current);
                current *= factor;
            }

            if spec.direction == ColorDirection::LastToFirst {
                raw.reverse();
            }

            raw.into_iter().map(|value| emphasis_for(mode, value)).collect()
        }
    }
}

fn emphasis_for(mode: ColorMode, value: f64) -> Emphasis {
    match mode {
        ColorMode::Opacity => Emphasis::with_opacity(value / 100.0),
        ColorMode::Saturation => Emphasis {
            opacity: 1.0,
            filter: Some(format!("saturate({})", to_fixed(value / 100.0, 4))),
        },
        other => Emphasis {
            opacity: 1.0,
            filter: Some(format!("{}({}%)", other.as_str(), js_number(value))),
        },
    }
}

/// Fixed opacity ladder used by the bar families.
///
/// The first element is lightest and the last boldest:
/// `[1.0]`, `[0.75, 1.0]`, `[0.5, 0.75, .., 0.75, 1.0]`.
pub fn step_ladder(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![1.0],
        2 => vec![0.75, 1.0],
        n => (0..n)
            .map(|i| {
                if i == 0 {
                    0.5
                } else if i == n - 1 {
                    1.0
                } else {
                    0.75
                }
            })
            .collect(),
    }
}

// ============================================================================
// SERIES PAINT
// ============================================================================

/// Where series colors come from
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    /// One base color differentiated by a ramp
    Base(String),
    /// Literal comma-separated colors assigned round-robin
    List(Vec<String>),
}

impl ColorSource {
    pub fn parse(base_color: &str) -> Self {
        if base_color.contains(',') {
            Self::List(base_color.split(',').map(|c| c.trim().to_string()).collect())
        } else {
            Self::Base(base_color.to_string())
        }
    }
}

/// Resolved color and emphasis of one series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPaint {
    pub color: String,
    pub emphasis: Emphasis,
}

/// Color and emphasis for `count` series.
///
/// A comma-separated color list bypasses the ramp entirely.
pub fn paint_series(base_color: &str, count: usize, spec: &RampSpec) -> Vec<SeriesPaint> {
    match ColorSource::parse(base_color) {
        ColorSource::List(colors) => (0..count)
            .map(|i| SeriesPaint {
                color: colors[i % colors.len()].clone(),
                emphasis: Emphasis::full(),
            })
            .collect(),
        ColorSource::Base(color) => generate_ramp(count, spec)
            .into_iter()
            .map(|emphasis| SeriesPaint {
                color: color.clone(),
                emphasis,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(mode: ColorMode, increment: f64, direction: ColorDirection) -> RampSpec {
        RampSpec {
            mode,
            increment,
            direction,
        }
    }

    fn filters(ramp: &[Emphasis]) -> Vec<&str> {
        ramp.iter().map(|e| e.filter.as_deref().unwrap_or("")).collect()
    }

    #[test]
    fn test_opacity_compounds_downward() {
        let ramp = generate_ramp(3, &spec(ColorMode::Opacity, 25.0, ColorDirection::FirstToLast));
        let opacities: Vec<f64> = ramp.iter().map(|e| e.opacity).collect();
        assert_eq!(opacities, vec![1.0, 0.75, 0.5625]);
        assert!(ramp.iter().all(|e| e.filter.is_none()));
    }

    #[test]
    fn test_brightness_compounds_upward() {
        let ramp = generate_ramp(3, &spec(ColorMode::Brightness, 25.0, ColorDirection::FirstToLast));
        assert_eq!(
            filters(&ramp),
            vec!["brightness(100%)", "brightness(125%)", "brightness(156.25%)"]
        );
        assert!(ramp.iter().all(|e| e.opacity == 1.0));
    }

    #[test]
    fn test_contrast_and_saturation() {
        let contrast = generate_ramp(2, &spec(ColorMode::Contrast, 25.0, ColorDirection::FirstToLast));
        assert_eq!(filters(&contrast), vec!["contrast(100%)", "contrast(75%)"]);

        let saturation =
            generate_ramp(3, &spec(ColorMode::Saturation, 25.0, ColorDirection::FirstToLast));
        assert_eq!(
            filters(&saturation),
            vec!["saturate(1.0000)", "saturate(0.7500)", "saturate(0.5625)"]
        );
    }

    #[test]
    fn test_hue_rotate_is_additive() {
        let forward = generate_ramp(3, &spec(ColorMode::HueRotate, 30.0, ColorDirection::FirstToLast));
        assert_eq!(
            filters(&forward),
            vec!["hue-rotate(0deg)", "hue-rotate(30deg)", "hue-rotate(60deg)"]
        );

        let backward = generate_ramp(3, &spec(ColorMode::HueRotate, 30.0, ColorDirection::LastToFirst));
        assert_eq!(
            filters(&backward),
            vec!["hue-rotate(0deg)", "hue-rotate(-30deg)", "hue-rotate(-60deg)"]
        );
    }

    #[test]
    fn test_last_to_first_reverses() {
        let forward = generate_ramp(4, &spec(ColorMode::Opacity, 20.0, ColorDirection::FirstToLast));
        let mut backward =
            generate_ramp(4, &spec(ColorMode::Opacity, 20.0, ColorDirection::LastToFirst));
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_none_mode_and_edges() {
        let none = generate_ramp(3, &spec(ColorMode::None, 25.0, ColorDirection::LastToFirst));
        assert_eq!(none, vec![Emphasis::full(); 3]);

        assert!(generate_ramp(0, &RampSpec::default()).is_empty());

        let single = generate_ramp(1, &spec(ColorMode::Opacity, 25.0, ColorDirection::LastToFirst));
        assert_eq!(single, vec![Emphasis::full()]);
    }

    #[test]
    fn test_step_ladder() {
        assert!(step_ladder(0).is_empty());
        assert_eq!(step_ladder(1), vec![1.0]);
        assert_eq!(step_ladder(2), vec![0.75, 1.0]);
        assert_eq!(step_ladder(3), vec![0.5, 0.75, 1.0]);
        assert_eq!(step_ladder(5), vec![0.5, 0.75, 0.75, 0.75, 1.0]);
    }

    #[test]
    fn test_color_list_round_robin() {
        let paints = paint_series("#111, #222", 3, &RampSpec::default());
        let colors: Vec<&str> = paints.iter().map(|p| p.color.as_str()).collect();
        assert_eq!(colors, vec!["#111", "#222", "#111"]);
        assert!(paints.iter().all(|p| p.emphasis == Emphasis::full()));
    }

    #[test]
    fn test_base_color_uses_ramp() {
        let paints = paint_series("#00a0dc", 2, &RampSpec::default());
        assert_eq!(paints[0].color, "#00a0dc");
        assert_eq!(paints[1].emphasis.opacity, 0.75);
    }

    #[test]
    fn test_filter_style() {
        let e = Emphasis {
            opacity: 1.0,
            filter: Some("contrast(75%)".to_string()),
        };
        assert_eq!(e.filter_style().as_deref(), Some("filter: contrast(75%);"));
        assert_eq!(Emphasis::full().filter_style(), None);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("hue-rotate".parse::<ColorMode>().unwrap(), ColorMode::HueRotate);
        assert!("hue_rotate".parse::<ColorMode>().is_err());
        assert_eq!(
            "last-to-first".parse::<ColorDirection>().unwrap(),
            ColorDirection::LastToFirst
        );
    }
}
