//! # chartkit
//!
//! Core chart primitives: scales, path builders, shape generators.
//! Implements Strategy pattern for flexible scale and rendering behaviors.

use chart_core::PointShape;
use std::f64::consts::PI;
use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Extend the domain outward to round tick values
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        if !(start.is_finite() && stop.is_finite()) || stop <= start || count == 0 {
            return self;
        }

        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == previous {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = step;
        }

        self.domain = (start, stop);
        self
    }

    /// "Nice" tick values (round numbers) inside the domain
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if !(min.is_finite() && max.is_finite()) || count == 0 {
            return Vec::new();
        }
        if min == max {
            return vec![min];
        }

        let (lo, hi) = if min < max { (min, max) } else { (max, min) };
        let step = tick_increment(lo, hi, count);
        if step == 0.0 || !step.is_finite() {
            return Vec::new();
        }

        // Integer multipliers keep ticks free of accumulated float error
        if step > 0.0 {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            let inv = -step;
            let first = (lo * inv).ceil() as i64;
            let last = (hi * inv).floor() as i64;
            (first..=last).map(|i| i as f64 / inv).collect()
        }
    }
}

/// Step between nice ticks; negative values encode `1 / step` for sub-unit steps
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10_f64.powf(power)
    } else {
        -10_f64.powf(-power) / factor
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value - d_min) / (d_max - d_min);
        r_min + normalized * (r_max - r_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        self.nice_ticks(count)
    }
}

// ============================================================================
// BAND SCALE (for categorical data like bar positions)
// ============================================================================

/// Band scale for categorical data
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain_count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(count: usize) -> Self {
        Self {
            domain_count: count,
            range: (0.0, 1.0),
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Distance between the starts of adjacent bands
    pub fn step(&self) -> f64 {
        if self.domain_count == 0 {
            return 0.0;
        }

        let (r_min, r_max) = self.range;
        let n = self.domain_count as f64;
        (r_max - r_min) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    /// Get band width (width of each bar group)
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Get position for index
    pub fn scale(&self, index: usize) -> f64 {
        if self.domain_count == 0 {
            return self.range.0;
        }

        let (r_min, r_max) = self.range;
        let n = self.domain_count as f64;
        let step = self.step();
        let start = r_min + (r_max - r_min - step * (n - self.padding_inner)) / 2.0;

        start + index as f64 * step
    }

    /// Get center position for index
    pub fn scale_center(&self, index: usize) -> f64 {
        self.scale(index) + self.bandwidth() / 2.0
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Monotone cubic curve in x (D3 `curveMonotoneX`).
///
/// Never overshoots the data between points, so a series that stays
/// positive is drawn positive. Points must be sorted by x.
#[derive(Debug, Clone, Default)]
pub struct MonotonePath;

impl MonotonePath {
    /// Append the curve through `points` to `builder`, starting with a line
    /// to the first point when `continue_path` is set.
    fn extend(builder: PathBuilder, points: &[(f64, f64)], continue_path: bool) -> PathBuilder {
        let Some(&(x0, y0)) = points.first() else {
            return builder;
        };

        let mut builder = if continue_path {
            builder.line_to(x0, y0)
        } else {
            builder.move_to(x0, y0)
        };

        match points.len() {
            1 => return builder,
            2 => {
                let (x1, y1) = points[1];
                return builder.line_to(x1, y1);
            }
            _ => {}
        }

        let tangents = monotone_tangents(points);
        for (i, pair) in points.windows(2).enumerate() {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            let dx = (x1 - x0) / 3.0;
            builder = builder.cubic_to(
                x0 + dx,
                y0 + dx * tangents[i],
                x1 - dx,
                y1 - dx * tangents[i + 1],
                x1,
                y1,
            );
        }

        builder
    }
}

impl PathGenerator for MonotonePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        Self::extend(PathBuilder::new(), points, false).build()
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Tangent at every point (three or more points)
fn monotone_tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let slopes: Vec<f64> = points
        .windows(2)
        .map(|w| (w[1].1 - w[0].1) / (w[1].0 - w[0].0))
        .collect();

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = points[i].0 - points[i - 1].0;
        let h1 = points[i + 1].0 - points[i].0;
        let (s0, s1) = (slopes[i - 1], slopes[i]);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = if t.is_nan() { 0.0 } else { t };
    }

    tangents[0] = end_tangent(slopes[0], tangents[1]);
    tangents[n - 1] = end_tangent(slopes[n - 2], tangents[n - 2]);
    tangents
}

fn end_tangent(slope: f64, neighbour: f64) -> f64 {
    let t = (3.0 * slope - neighbour) / 2.0;
    if t.is_finite() { t } else { neighbour }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

// Writing into a String cannot fail, so `write!` results are ignored below.
impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        let _ = write!(self.commands, "H{:.2}", x);
        self
    }

    pub fn vertical_to(mut self, y: f64) -> Self {
        let _ = write!(self.commands, "V{:.2}", y);
        self
    }

    pub fn cubic_to(mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        let _ = write!(
            self.commands,
            "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            x1, y1, x2, y2, x, y
        );
        self
    }

    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        let _ = write!(
            self.commands,
            "A{:.2},{:.2},{:.2},{},{},{:.2},{:.2}",
            rx, ry, rotation, large_arc as u8, sweep as u8, x, y
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// AREA PATH GENERATOR
// ============================================================================

/// Closed area under a monotone curve
pub fn monotone_area_path(points: &[(f64, f64)], baseline_y: f64) -> String {
    let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
        return String::new();
    };

    let builder = PathBuilder::new().move_to(first_x, baseline_y);
    MonotonePath::extend(builder, points, true)
        .line_to(last_x, baseline_y)
        .close()
        .build()
}

/// Generate monotone curve path (non-closed)
pub fn curve_path(points: &[(f64, f64)]) -> String {
    MonotonePath.generate(points)
}

// ============================================================================
// SHAPES
// ============================================================================

/// Rectangle with per-corner radii `[top-left, top-right, bottom-right, bottom-left]`.
///
/// Radii are clamped to half the shorter side.
pub fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, radii: [f64; 4]) -> String {
    let max_r = (width.min(height) / 2.0).max(0.0);
    let [tl, tr, br, bl] = radii.map(|r| r.clamp(0.0, max_r));

    let mut builder = PathBuilder::new().move_to(x + tl, y).horizontal_to(x + width - tr);
    if tr > 0.0 {
        builder = builder.arc_to(tr, tr, 0.0, false, true, x + width, y + tr);
    }
    builder = builder.vertical_to(y + height - br);
    if br > 0.0 {
        builder = builder.arc_to(br, br, 0.0, false, true, x + width - br, y + height);
    }
    builder = builder.horizontal_to(x + bl);
    if bl > 0.0 {
        builder = builder.arc_to(bl, bl, 0.0, false, true, x, y + height - bl);
    }
    builder = builder.vertical_to(y + tl);
    if tl > 0.0 {
        builder = builder.arc_to(tl, tl, 0.0, false, true, x + tl, y);
    }

    builder.close().build()
}

/// Point on a circle. Angles are degrees, 0 at three o'clock, increasing
/// counter-clockwise.
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg.to_radians();
    (cx + radius * radians.cos(), cy - radius * radians.sin())
}

/// Annular (or full when `inner_radius` is 0) sector between two angles
pub fn sector_path(
    cx: f64,
    cy: f64,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let delta = (end_angle - start_angle).clamp(-359.999, 359.999);
    let end_angle = start_angle + delta;
    let large_arc = delta.abs() > 180.0;
    let clockwise = start_angle > end_angle;

    let (osx, osy) = polar_to_cartesian(cx, cy, outer_radius, start_angle);
    let (oex, oey) = polar_to_cartesian(cx, cy, outer_radius, end_angle);

    let builder = PathBuilder::new().move_to(osx, osy).arc_to(
        outer_radius,
        outer_radius,
        0.0,
        large_arc,
        clockwise,
        oex,
        oey,
    );

    if inner_radius > 0.0 {
        let (iex, iey) = polar_to_cartesian(cx, cy, inner_radius, end_angle);
        let (isx, isy) = polar_to_cartesian(cx, cy, inner_radius, start_angle);
        builder
            .line_to(iex, iey)
            .arc_to(inner_radius, inner_radius, 0.0, large_arc, !clockwise, isx, isy)
            .close()
            .build()
    } else {
        builder.line_to(cx, cy).close().build()
    }
}

/// Symbol of the given area centred on the origin (D3 symbol geometry)
pub fn symbol_path(shape: PointShape, area: f64) -> String {
    let area = area.max(0.0);

    match shape {
        PointShape::Circle => {
            let r = (area / PI).sqrt();
            PathBuilder::new()
                .move_to(r, 0.0)
                .arc_to(r, r, 0.0, true, true, -r, 0.0)
                .arc_to(r, r, 0.0, true, true, r, 0.0)
                .close()
                .build()
        }
        PointShape::Square => {
            let half = area.sqrt() / 2.0;
            PathBuilder::new()
                .move_to(-half, -half)
                .horizontal_to(half)
                .vertical_to(half)
                .horizontal_to(-half)
                .close()
                .build()
        }
        PointShape::Triangle => {
            let sqrt3 = 3_f64.sqrt();
            let y = -(area / (sqrt3 * 3.0)).sqrt();
            PathBuilder::new()
                .move_to(0.0, y * 2.0)
                .line_to(-sqrt3 * y, -y)
                .line_to(sqrt3 * y, -y)
                .close()
                .build()
        }
        PointShape::Diamond => {
            let tan30 = (1.0_f64 / 3.0).sqrt();
            let y = (area / (tan30 * 2.0)).sqrt();
            let x = y * tan30;
            PathBuilder::new()
                .move_to(0.0, -y)
                .line_to(x, 0.0)
                .line_to(0.0, y)
                .line_to(-x, 0.0)
                .close()
                .build()
        }
    }
}

// ============================================================================
// TICKS
// ============================================================================

/// A labelled position along an axis
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Ticks of `scale`, labelled with `label`
pub fn value_ticks(scale: &impl Scale, count: usize, label: impl Fn(f64) -> String) -> Vec<Tick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| Tick {
            position: scale.scale(value),
            label: label(value),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_nice_domain() {
        let scale = LinearScale::new().domain(0.0, 9800.0).nice(5);
        assert_eq!(scale.domain_bounds(), (0.0, 10000.0));

        let scale = LinearScale::new().domain(-26.0, 22.0).nice(5);
        assert_eq!(scale.domain_bounds(), (-30.0, 30.0));
    }

    #[test]
    fn test_nice_ticks() {
        let scale = LinearScale::new().domain(0.0, 10000.0);
        assert_eq!(
            scale.nice_ticks(5),
            vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0, 10000.0]
        );

        // Sub-unit steps stay exact
        let scale = LinearScale::new().domain(0.0, 1.0);
        assert_eq!(scale.nice_ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_band_scale() {
        let scale = BandScale::new(5).range(0.0, 100.0).padding(0.0, 0.0);
        assert_eq!(scale.step(), 20.0);
        assert_eq!(scale.bandwidth(), 20.0);
        assert_eq!(scale.scale(2), 40.0);

        let padded = BandScale::new(5).range(0.0, 100.0);
        let bw = padded.bandwidth();
        assert!(bw > 0.0);
        assert!(bw < 20.0);
        // Bands are centred in the range
        let left_gap = padded.scale(0);
        let right_gap = 100.0 - (padded.scale(4) + bw);
        assert!((left_gap - right_gap).abs() < 1e-9);
    }

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .close()
            .build();

        assert_eq!(path, "M0.00,0.00L100.00,100.00Z");
    }

    #[test]
    fn test_monotone_two_points_is_straight() {
        assert_eq!(curve_path(&[(0.0, 0.0), (10.0, 5.0)]), "M0.00,0.00L10.00,5.00");
        assert_eq!(curve_path(&[(3.0, 4.0)]), "M3.00,4.00");
    }

    #[test]
    fn test_monotone_collinear_points() {
        // Straight data gives control points on the same line
        let path = curve_path(&[(0.0, 0.0), (30.0, 30.0), (60.0, 60.0)]);
        assert_eq!(
            path,
            "M0.00,0.00C10.00,10.00,20.00,20.00,30.00,30.00C40.00,40.00,50.00,50.00,60.00,60.00"
        );
    }

    #[test]
    fn test_monotone_flat_at_extremum() {
        // The middle point is a peak, so its tangent is flat
        let tangents = monotone_tangents(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
        assert_eq!(tangents[1], 0.0);
    }

    #[test]
    fn test_area_path_closes_on_baseline() {
        let points = [(0.0, 10.0), (50.0, 5.0), (100.0, 8.0)];
        let curved = monotone_area_path(&points, 100.0);
        assert!(curved.starts_with("M0.00,100.00L0.00,10.00C"));
        assert!(curved.ends_with("L100.00,100.00Z"));
        assert!(monotone_area_path(&[], 100.0).is_empty());
    }

    #[test]
    fn test_rounded_rect_path() {
        let square = rounded_rect_path(0.0, 0.0, 10.0, 20.0, [0.0; 4]);
        assert_eq!(square, "M0.00,0.00H10.00V20.00H0.00V0.00Z");

        let top = rounded_rect_path(0.0, 0.0, 10.0, 20.0, [2.0, 2.0, 0.0, 0.0]);
        assert!(top.starts_with("M2.00,0.00H8.00A2.00,2.00,0.00,0,1,10.00,2.00"));

        // Radius larger than the bar is clamped to half its width
        let clamped = rounded_rect_path(0.0, 0.0, 10.0, 20.0, [50.0, 50.0, 0.0, 0.0]);
        assert!(clamped.starts_with("M5.00,0.00H5.00A5.00,5.00"));
    }

    #[test]
    fn test_polar_to_cartesian() {
        let (x, y) = polar_to_cartesian(100.0, 100.0, 10.0, 90.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_sector_path() {
        let donut = sector_path(0.0, 0.0, 5.0, 10.0, 0.0, 90.0);
        assert!(donut.starts_with("M10.00,0.00A10.00,10.00,0.00,0,0,0.00,-10.00"));
        assert!(donut.contains("L0.00,-5.00A5.00,5.00,0.00,0,1,5.00,0.00Z"));

        let wedge = sector_path(0.0, 0.0, 0.0, 10.0, 0.0, 270.0);
        assert!(wedge.contains(",1,0,"));
        assert!(wedge.ends_with("L0.00,0.00Z"));
    }

    #[test]
    fn test_symbol_paths() {
        let square = symbol_path(PointShape::Square, 64.0);
        assert_eq!(square, "M-4.00,-4.00H4.00V4.00H-4.00Z");

        let circle = symbol_path(PointShape::Circle, PI * 16.0);
        assert!(circle.starts_with("M4.00,0.00A4.00,4.00"));

        assert!(symbol_path(PointShape::Triangle, 60.0).starts_with("M0.00,-"));
        assert!(symbol_path(PointShape::Diamond, 60.0).ends_with('Z'));
    }

    #[test]
    fn test_value_ticks() {
        let scale = LinearScale::new().domain(0.0, 10.0).range(100.0, 0.0);
        let ticks = value_ticks(&scale, 2, |v| format!("{v}"));
        assert_eq!(ticks.first().map(|t| t.position), Some(100.0));
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("10"));
    }
}
