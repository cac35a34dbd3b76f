//! Plot geometry: maps data coordinates into a rectangle of world space

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log10,
}

/// One chart axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub scale: Scale,
}

impl Axis {
    pub fn linear(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            scale: Scale::Linear,
        }
    }

    pub fn log10(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            scale: Scale::Log10,
        }
    }

    fn transform(&self, v: f64) -> Option<f64> {
        match self.scale {
            Scale::Linear => v.is_finite().then_some(v),
            Scale::Log10 => (v.is_finite() && v > 0.0).then(|| v.log10()),
        }
    }

    /// Position of `v` along the axis: 0 at `min`, 1 at `max`, unclamped
    ///
    /// `None` for values the scale cannot place (non-finite, or ≤ 0 on a log axis).
    pub fn normalize(&self, v: f64) -> Option<f64> {
        let lo = self.transform(self.min)?;
        let hi = self.transform(self.max)?;
        let t = self.transform(v)?;
        if hi == lo {
            return None;
        }
        Some((t - lo) / (hi - lo))
    }

    /// Tick values inside the axis range
    ///
    /// Linear axes step by `step` from the first multiple of it; log axes
    /// ignore `step` and place one tick per decade.
    pub fn ticks(&self, step: f64) -> Vec<f64> {
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        match self.scale {
            Scale::Linear => {
                if !(step > 0.0) {
                    return Vec::new();
                }
                let first = (lo / step).ceil() as i64;
                let last = (hi / step).floor() as i64;
                (first..=last).map(|k| k as f64 * step).collect()
            }
            Scale::Log10 => {
                if lo <= 0.0 {
                    return Vec::new();
                }
                let first = lo.log10().ceil() as i32;
                let last = hi.log10().floor() as i32;
                (first..=last).map(|e| 10f64.powi(e)).collect()
            }
        }
    }
}

/// A plot frame in world space: `origin` is the bottom-left corner
#[derive(Debug, Clone, Copy)]
pub struct Chart {
    pub x: Axis,
    pub y: Axis,
    pub origin: Vec2,
    pub size: Vec2,
}

impl Chart {
    pub fn new(x: Axis, y: Axis, origin: Vec2, size: Vec2) -> Self {
        Self { x, y, origin, size }
    }

    fn place(&self, fx: f64, fy: f64) -> Vec2 {
        self.origin + Vec2::new(fx as f32 * self.size.x, fy as f32 * self.size.y)
    }

    /// World position of a data point, possibly outside the frame
    pub fn to_world(&self, x: f64, y: f64) -> Option<Vec2> {
        Some(self.place(self.x.normalize(x)?, self.y.normalize(y)?))
    }

    /// World position clamped to the frame
    pub fn to_world_clamped(&self, x: f64, y: f64) -> Option<Vec2> {
        let fx = self.x.normalize(x)?.clamp(0.0, 1.0);
        let fy = self.y.normalize(y)?.clamp(0.0, 1.0);
        Some(self.place(fx, fy))
    }

    /// World x of a data x at the bottom edge
    pub fn x_on_axis(&self, x: f64) -> Option<Vec2> {
        Some(self.place(self.x.normalize(x)?, 0.0))
    }

    /// World point on the left edge for a data y
    pub fn y_on_axis(&self, y: f64) -> Option<Vec2> {
        Some(self.place(0.0, self.y.normalize(y)?))
    }

    pub fn top_right(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Split a curve into drawable runs that stay inside the frame
    ///
    /// A run ends where the curve leaves the frame, with the crossing point
    /// interpolated onto the edge; points the axes cannot place also end a run.
    pub fn clip_polyline(&self, points: &[[f64; 2]]) -> Vec<Vec<Vec2>> {
        let inside = |f: (f64, f64)| (0.0..=1.0).contains(&f.0) && (0.0..=1.0).contains(&f.1);

        let mut runs = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        let mut prev: Option<(f64, f64)> = None;

        for p in points {
            let f = match (self.x.normalize(p[0]), self.y.normalize(p[1])) {
                (Some(fx), Some(fy)) => Some((fx, fy)),
                _ => None,
            };

            match (prev, f) {
                (_, None) => {
                    flush(&mut runs, &mut current);
                }
                (None, Some(f)) => {
                    if inside(f) {
                        current.push(self.place(f.0, f.1));
                    }
                }
                (Some(a), Some(b)) => match (inside(a), inside(b)) {
                    (true, true) => current.push(self.place(b.0, b.1)),
                    (true, false) => {
                        let c = clip_to_unit(a, b);
                        current.push(self.place(c.0, c.1));
                        flush(&mut runs, &mut current);
                    }
                    (false, true) => {
                        let c = clip_to_unit(b, a);
                        current.push(self.place(c.0, c.1));
                        current.push(self.place(b.0, b.1));
                    }
                    (false, false) => {}
                },
            }
            prev = f;
        }

        flush(&mut runs, &mut current);
        runs
    }

    /// Triangles filling the area between `lower` and `upper` where upper > lower
    ///
    /// Both curves must share the same x samples. Values are clamped to the frame.
    pub fn fill_between(&self, lower: &[[f64; 2]], upper: &[[f64; 2]]) -> Vec<[Vec2; 3]> {
        let mut triangles = Vec::new();

        for (lo, hi) in lower.windows(2).zip(upper.windows(2)) {
            if !(hi[0][1] > lo[0][1] && hi[1][1] > lo[1][1]) {
                continue;
            }
            let corners = (
                self.to_world_clamped(lo[0][0], lo[0][1]),
                self.to_world_clamped(lo[1][0], lo[1][1]),
                self.to_world_clamped(hi[1][0], hi[1][1]),
                self.to_world_clamped(hi[0][0], hi[0][1]),
            );
            if let (Some(a), Some(b), Some(c), Some(d)) = corners {
                triangles.push([a, b, c]);
                triangles.push([a, c, d]);
            }
        }

        triangles
    }

    /// World rectangle spanning data x from `x0` to `x1` over the full height
    pub fn band(&self, x0: f64, x1: f64) -> Option<(Vec2, Vec2)> {
        let f0 = self.x.normalize(x0)?.clamp(0.0, 1.0);
        let f1 = self.x.normalize(x1)?.clamp(0.0, 1.0);
        Some((self.place(f0.min(f1), 0.0), self.place(f0.max(f1), 1.0)))
    }
}

/// A 1-2-5 step giving roughly `target` ticks across `span`
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !(span > 0.0 && span.is_finite()) || target == 0 {
        return 0.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn flush(runs: &mut Vec<Vec<Vec2>>, current: &mut Vec<Vec2>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Point where the segment from `inside` towards `outside` meets the unit square
fn clip_to_unit(inside: (f64, f64), outside: (f64, f64)) -> (f64, f64) {
    let (dx, dy) = (outside.0 - inside.0, outside.1 - inside.1);
    let mut t: f64 = 1.0;
    for (start, delta) in [(inside.0, dx), (inside.1, dy)] {
        if delta > 0.0 {
            t = t.min((1.0 - start) / delta);
        } else if delta < 0.0 {
            t = t.min(-start / delta);
        }
    }
    let t = t.clamp(0.0, 1.0);
    (inside.0 + t * dx, inside.1 + t * dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_chart(y: Axis) -> Chart {
        Chart::new(Axis::linear(0.0, 10.0), y, Vec2::ZERO, Vec2::new(10.0, 5.0))
    }

    #[test]
    fn test_linear_normalize() {
        let axis = Axis::linear(200.0, 3000.0);
        assert_eq!(axis.normalize(200.0), Some(0.0));
        assert_eq!(axis.normalize(3000.0), Some(1.0));
        assert_eq!(axis.normalize(1600.0), Some(0.5));
        assert_eq!(axis.normalize(f64::NAN), None);
    }

    #[test]
    fn test_log_normalize_rejects_non_positive() {
        let axis = Axis::log10(1.0, 1e4);
        assert!((axis.normalize(100.0).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(axis.normalize(0.0), None);
        assert_eq!(axis.normalize(-3.0), None);
    }

    #[test]
    fn test_linear_ticks() {
        let ticks = Axis::linear(1.0, 3000.0).ticks(500.0);
        assert_eq!(ticks, vec![500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0]);
        assert!(Axis::linear(0.0, 1.0).ticks(0.0).is_empty());
    }

    #[test]
    fn test_log_ticks_per_decade() {
        let ticks = Axis::log10(0.5, 2e3).ticks(1.0);
        assert_eq!(ticks, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn test_nice_step() {
        assert!((nice_step(2800.0, 6) - 500.0).abs() < 1e-9);
        assert!((nice_step(35.0, 5) - 10.0).abs() < 1e-12);
        assert!((nice_step(0.07, 3) - 0.05).abs() < 1e-12);
        assert_eq!(nice_step(0.0, 5), 0.0);
    }

    #[test]
    fn test_to_world_maps_corners() {
        let chart = unit_chart(Axis::linear(0.0, 1.0));
        assert_eq!(chart.to_world(0.0, 0.0), Some(Vec2::ZERO));
        assert_eq!(chart.to_world(10.0, 1.0), Some(Vec2::new(10.0, 5.0)));
        assert_eq!(
            chart.to_world_clamped(20.0, 2.0),
            Some(Vec2::new(10.0, 5.0))
        );
    }

    #[test]
    fn test_clip_polyline_cuts_at_top_edge() {
        let chart = unit_chart(Axis::linear(0.0, 1.0));
        // Rises through the top edge between x=1 and x=2, comes back down after x=3
        let points = [[0.0, 0.5], [1.0, 0.5], [2.0, 1.5], [3.0, 1.5], [4.0, 0.5], [5.0, 0.5]];
        let runs = chart.clip_polyline(&points);
        assert_eq!(runs.len(), 2);

        let exit = *runs[0].last().unwrap();
        assert!((exit.y - 5.0).abs() < 1e-5);
        assert!((exit.x - 1.5).abs() < 1e-5);

        let entry = runs[1][0];
        assert!((entry.y - 5.0).abs() < 1e-5);
        assert!((entry.x - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_clip_polyline_breaks_on_unplaceable_points() {
        let chart = unit_chart(Axis::log10(1e-3, 1.0));
        let points = [[0.0, 0.1], [1.0, 0.1], [2.0, 0.0], [3.0, 0.1], [4.0, 0.1]];
        let runs = chart.clip_polyline(&points);
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_fill_between_only_where_upper_exceeds_lower() {
        let chart = unit_chart(Axis::linear(0.0, 1.0));
        let lower = [[0.0, 0.2], [1.0, 0.2], [2.0, 0.2], [3.0, 0.2]];
        let upper = [[0.0, 0.5], [1.0, 0.5], [2.0, 0.1], [3.0, 0.1]];
        let tris = chart.fill_between(&lower, &upper);
        // Only the first interval has upper above lower at both ends
        assert_eq!(tris.len(), 2);
    }

    #[test]
    fn test_band_is_clamped() {
        let chart = unit_chart(Axis::linear(0.0, 1.0));
        let (min, max) = chart.band(-5.0, 4.0).unwrap();
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::new(4.0, 5.0));
    }
}
