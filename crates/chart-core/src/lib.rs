//! # chart-core
//!
//! Shared logic behind the builder chart components.
//! Every chart family goes through the same pipeline:
//!
//! ```text
//! data string -> records -> series keys -> emphasis ramp / axis domain -> renderer
//! ```
//!
//! ## Modules
//!
//! - `record` - JSON data parsing and JS-style value coercion
//! - `format` - Value formatting (number, percent, currency, multiplier)
//! - `ramp` - Per-series / per-row emphasis (opacity and CSS filter) ramps
//! - `domain` - Axis domain derivation with overrides, padding and zero inclusion
//! - `options` - Typed option surfaces for each chart family
//! - `declare` - Property-panel declarations for the page builder
//! - `samples` - Example datasets used as defaults and empty-state guidance

#[macro_use]
mod choice;

pub mod declare;
pub mod domain;
pub mod error;
pub mod format;
pub mod options;
pub mod ramp;
pub mod record;
pub mod samples;

pub use choice::Choice;
pub use domain::*;
pub use error::{ChartError, Result};
pub use format::*;
pub use options::*;
pub use ramp::*;
pub use record::*;

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const BAR_BASE: &str = "#00a0dc";
    pub const HORIZONTAL_BAR_BASE: &str = "#ff007a";
    pub const PIE: [&str; 4] = ["#ff6b35", "#004e89", "#1a8fe3", "#b8b8b8"];

    pub const AXIS_LINE: &str = "#666";
    pub const GRID: &str = "#ccc";
    pub const GRID_LIGHT: &str = "#e6e6e6";
    pub const TOOLTIP_BG: &str = "#ffffff";
    pub const TOOLTIP_BORDER: &str = "#cccccc";
    pub const TEXT_MUTED: &str = "#666";
    pub const ZERO_LINE: &str = "#000000";
    pub const DOT_STROKE: &str = "#fff";

    /// Hover cursor band behind the active category
    pub fn cursor_alpha(alpha: f64) -> String {
        format!("rgba(0, 0, 0, {:.2})", alpha)
    }
}
