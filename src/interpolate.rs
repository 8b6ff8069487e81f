//! Line interpolation and SVG line path generation.
//!
//! Each [`Interpolation`] mode turns a list of screen-space points into SVG
//! path data starting with `M`. Curved modes emit cubic (`C`, `S`) or
//! quadratic (`Q`) Bézier segments; modes that need more points than they
//! are given fall back to straight segments.
//!
//! # References
//!
//! - Catmull, E., & Rom, R. (1974). "A class of local interpolating splines."
//! - Fritsch, F. N., & Carlson, R. E. (1980). "Monotone Piecewise Cubic
//!   Interpolation." SIAM Journal on Numerical Analysis, 17(2), 238-246.

use crate::error::{Error, Result};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as FmtWrite};
use std::str::FromStr;

/// Tension of the cardinal and bundle curves.
const DEFAULT_TENSION: f64 = 0.7;

/// Slopes below this are treated as flat by the monotone curve.
const MONOTONE_EPSILON: f64 = 1e-6;

/// Uniform B-spline basis weights for the three Bézier control points.
const BASIS_BEZIER_1: [f64; 4] = [0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
const BASIS_BEZIER_2: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 0.0];
const BASIS_BEZIER_3: [f64; 4] = [0.0, 1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0];

/// How consecutive points of a line are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    /// Straight segments.
    #[default]
    Linear,
    /// Straight segments, closed back to the first point.
    LinearClosed,
    /// Horizontal-vertical steps centred between points.
    Step,
    /// Vertical then horizontal steps.
    StepBefore,
    /// Horizontal then vertical steps.
    StepAfter,
    /// Cubic B-spline through the end points.
    Basis,
    /// Cubic B-spline not reaching the end points.
    BasisOpen,
    /// Closed cubic B-spline.
    BasisClosed,
    /// B-spline straightened towards the chord between the end points.
    Bundle,
    /// Cardinal spline through every point.
    Cardinal,
    /// Cardinal spline skipping the first and last segments.
    CardinalOpen,
    /// Closed cardinal spline.
    CardinalClosed,
    /// Monotone cubic interpolation (no overshoot in y).
    Monotone,
}

impl Interpolation {
    /// Every mode with its name.
    pub const ALL: [(Interpolation, &'static str); 13] = [
        (Interpolation::Linear, "linear"),
        (Interpolation::LinearClosed, "linear-closed"),
        (Interpolation::Step, "step"),
        (Interpolation::StepBefore, "step-before"),
        (Interpolation::StepAfter, "step-after"),
        (Interpolation::Basis, "basis"),
        (Interpolation::BasisOpen, "basis-open"),
        (Interpolation::BasisClosed, "basis-closed"),
        (Interpolation::Bundle, "bundle"),
        (Interpolation::Cardinal, "cardinal"),
        (Interpolation::CardinalOpen, "cardinal-open"),
        (Interpolation::CardinalClosed, "cardinal-closed"),
        (Interpolation::Monotone, "monotone"),
    ];

    /// Name of the mode.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(mode, _)| *mode == self)
            .map_or("linear", |(_, name)| name)
    }
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(mode, _)| *mode)
            .ok_or_else(|| Error::UnknownInterpolation(s.to_string()))
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generate SVG path data for a line through `points`.
///
/// Returns an empty string for no points.
#[must_use]
pub fn line_path(points: &[Point], mode: Interpolation) -> String {
    if points.is_empty() {
        return String::new();
    }
    let body = match mode {
        Interpolation::Linear => linear(points),
        Interpolation::LinearClosed => linear_closed(points),
        Interpolation::Step => step(points),
        Interpolation::StepBefore => step_before(points),
        Interpolation::StepAfter => step_after(points),
        Interpolation::Basis => basis(points),
        Interpolation::BasisOpen => basis_open(points),
        Interpolation::BasisClosed => basis_closed(points),
        Interpolation::Bundle => bundle(points, DEFAULT_TENSION),
        Interpolation::Cardinal => cardinal(points, DEFAULT_TENSION),
        Interpolation::CardinalOpen => cardinal_open(points, DEFAULT_TENSION),
        Interpolation::CardinalClosed => cardinal_closed(points, DEFAULT_TENSION),
        Interpolation::Monotone => monotone(points),
    };
    format!("M{body}")
}

fn linear(points: &[Point]) -> String {
    points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join("L")
}

fn linear_closed(points: &[Point]) -> String {
    format!("{}Z", linear(points))
}

fn step(points: &[Point]) -> String {
    let mut p = points[0];
    let mut path = p.to_string();
    for &next in &points[1..] {
        let _ = write!(path, "H{}V{}", (p.x + next.x) / 2.0, next.y);
        p = next;
    }
    if points.len() > 1 {
        let _ = write!(path, "H{}", p.x);
    }
    path
}

fn step_before(points: &[Point]) -> String {
    let mut path = points[0].to_string();
    for p in &points[1..] {
        let _ = write!(path, "V{}H{}", p.y, p.x);
    }
    path
}

fn step_after(points: &[Point]) -> String {
    let mut path = points[0].to_string();
    for p in &points[1..] {
        let _ = write!(path, "H{}V{}", p.x, p.y);
    }
    path
}

// ============================================================================
// B-splines
// ============================================================================

fn dot4(a: [f64; 4], b: [f64; 4]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// Slide a four-point window forward by one point.
fn shift_in(px: &mut [f64; 4], py: &mut [f64; 4], p: Point) {
    px.rotate_left(1);
    py.rotate_left(1);
    px[3] = p.x;
    py[3] = p.y;
}

fn basis_bezier(path: &mut String, px: [f64; 4], py: [f64; 4]) {
    let _ = write!(
        path,
        "C{},{},{},{},{},{}",
        dot4(BASIS_BEZIER_1, px),
        dot4(BASIS_BEZIER_1, py),
        dot4(BASIS_BEZIER_2, px),
        dot4(BASIS_BEZIER_2, py),
        dot4(BASIS_BEZIER_3, px),
        dot4(BASIS_BEZIER_3, py),
    );
}

fn basis(points: &[Point]) -> String {
    let n = points.len();
    if n < 3 {
        return linear(points);
    }
    let first = points[0];
    let second = points[1];
    let mut px = [first.x, first.x, first.x, second.x];
    let mut py = [first.y, first.y, first.y, second.y];
    let mut path = format!(
        "{first}L{},{}",
        dot4(BASIS_BEZIER_3, px),
        dot4(BASIS_BEZIER_3, py)
    );
    // The last point is repeated once so the curve reaches it.
    let last = points[n - 1];
    for i in 2..=n {
        let p = points.get(i).copied().unwrap_or(last);
        shift_in(&mut px, &mut py, p);
        basis_bezier(&mut path, px, py);
    }
    let _ = write!(path, "L{last}");
    path
}

fn basis_open(points: &[Point]) -> String {
    let n = points.len();
    if n < 4 {
        return linear(points);
    }
    let mut px = [0.0, points[0].x, points[1].x, points[2].x];
    let mut py = [0.0, points[0].y, points[1].y, points[2].y];
    let mut path = format!("{},{}", dot4(BASIS_BEZIER_3, px), dot4(BASIS_BEZIER_3, py));
    for &p in &points[3..] {
        shift_in(&mut px, &mut py, p);
        basis_bezier(&mut path, px, py);
    }
    path
}

fn basis_closed(points: &[Point]) -> String {
    let n = points.len();
    let at = |i: usize| points[i % n];
    let mut px = [at(0).x, at(1).x, at(2).x, at(3).x];
    let mut py = [at(0).y, at(1).y, at(2).y, at(3).y];
    let mut path = format!("{},{}", dot4(BASIS_BEZIER_3, px), dot4(BASIS_BEZIER_3, py));
    for i in 4..n + 4 {
        shift_in(&mut px, &mut py, at(i));
        basis_bezier(&mut path, px, py);
    }
    path
}

fn bundle(points: &[Point], tension: f64) -> String {
    let n = points.len() - 1;
    if n == 0 {
        return basis(points);
    }
    let first = points[0];
    let last = points[n];
    let straightened: Vec<Point> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let chord = first.lerp(last, i as f64 / n as f64);
            chord.lerp(p, tension)
        })
        .collect();
    basis(&straightened)
}

// ============================================================================
// Hermite splines (cardinal, monotone)
// ============================================================================

/// Cubic Hermite segments through `points` with the given tangents.
///
/// With two fewer tangents than points the first and last segments are
/// quadratic.
fn hermite(points: &[Point], tangents: &[Point]) -> String {
    let quad = points.len() != tangents.len();
    if tangents.is_empty() || (quad && points.len() != tangents.len() + 2) {
        return linear(points);
    }

    let mut path = String::new();
    let mut p0 = points[0];
    let mut p = points[1];
    let t0 = tangents[0];
    let mut t = t0;
    let mut pi = 1;

    if quad {
        let control = p.offset(-t0.x * 2.0 / 3.0, -t0.y * 2.0 / 3.0);
        let _ = write!(path, "Q{control},{p}");
        p0 = points[1];
        pi = 2;
    }

    if tangents.len() > 1 {
        t = tangents[1];
        p = points[pi];
        pi += 1;
        let c1 = p0.offset(t0.x, t0.y);
        let c2 = p.offset(-t.x, -t.y);
        let _ = write!(path, "C{c1},{c2},{p}");
        for &tangent in &tangents[2..] {
            p = points[pi];
            t = tangent;
            let c = p.offset(-t.x, -t.y);
            let _ = write!(path, "S{c},{p}");
            pi += 1;
        }
    }

    if quad {
        let control = p.offset(t.x * 2.0 / 3.0, t.y * 2.0 / 3.0);
        let _ = write!(path, "Q{control},{}", points[pi]);
    }

    path
}

fn cardinal_tangents(points: &[Point], tension: f64) -> Vec<Point> {
    let a = (1.0 - tension) / 2.0;
    points
        .windows(3)
        .map(|w| Point::new(a * (w[2].x - w[0].x), a * (w[2].y - w[0].y)))
        .collect()
}

fn cardinal(points: &[Point], tension: f64) -> String {
    if points.len() < 3 {
        return linear(points);
    }
    format!(
        "{}{}",
        points[0],
        hermite(points, &cardinal_tangents(points, tension))
    )
}

fn cardinal_open(points: &[Point], tension: f64) -> String {
    let n = points.len();
    if n < 4 {
        return linear(points);
    }
    format!(
        "{}{}",
        points[1],
        hermite(&points[1..n - 1], &cardinal_tangents(points, tension))
    )
}

fn cardinal_closed(points: &[Point], tension: f64) -> String {
    let n = points.len();
    if n < 3 {
        return linear_closed(points);
    }
    let mut closed = points.to_vec();
    closed.push(points[0]);

    let mut wrapped = Vec::with_capacity(n + 3);
    wrapped.push(points[n - 1]);
    wrapped.extend_from_slice(&closed);
    wrapped.push(points[1]);

    format!(
        "{}{}",
        points[0],
        hermite(&closed, &cardinal_tangents(&wrapped, tension))
    )
}

fn slope(p0: Point, p1: Point) -> f64 {
    (p1.y - p0.y) / (p1.x - p0.x)
}

/// Fritsch-Carlson tangents.
fn monotone_tangents(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    let j = n - 1;

    let mut m = vec![0.0; n];
    let mut d = slope(points[0], points[1]);
    m[0] = d;
    for i in 1..j {
        let next = slope(points[i], points[i + 1]);
        m[i] = (d + next) / 2.0;
        d = next;
    }
    m[j] = d;

    for i in 0..j {
        let d = slope(points[i], points[i + 1]);
        if d.abs() < MONOTONE_EPSILON {
            m[i] = 0.0;
            m[i + 1] = 0.0;
        } else {
            let a = m[i] / d;
            let b = m[i + 1] / d;
            let s = a * a + b * b;
            if s > 9.0 {
                let s = d * 3.0 / s.sqrt();
                m[i] = s * a;
                m[i + 1] = s * b;
            }
        }
    }

    (0..n)
        .map(|i| {
            let span = points[(i + 1).min(j)].x - points[i.saturating_sub(1)].x;
            let s = span / (6.0 * (1.0 + m[i] * m[i]));
            let dx = if s.is_nan() { 0.0 } else { s };
            let dy = m[i] * s;
            Point::new(dx, if dy.is_nan() { 0.0 } else { dy })
        })
        .collect()
}

fn monotone(points: &[Point]) -> String {
    if points.len() < 3 {
        return linear(points);
    }
    format!("{}{}", points[0], hermite(points, &monotone_tangents(points)))
}
