use derive_more::{Display, From, Into};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` on the circle of `radius` around `self`.
    pub fn polar(self, radius: f64, angle: Radians) -> Self {
        let (sin, cos) = angle.value().sin_cos();
        Self::new(self.x + radius * cos, self.y + radius * sin)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Angle of `other` as seen from `self`, in `(-PI, PI]`.
    pub fn angle_to(self, other: Point) -> Radians {
        Radians((other.y - self.y).atan2(other.x - self.x))
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, From, Into)]
#[display("{_0}°")]
pub struct Degrees(f64);

crate::impl_angle_newtype!(Degrees);

impl Degrees {
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, From, Into)]
#[display("{_0} rad")]
pub struct Radians(f64);

crate::impl_angle_newtype!(Radians);

impl Radians {
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Perpendicular distance from `p` to the infinite line through both endpoints.
    pub fn distance_to(&self, p: Point) -> f64 {
        let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let len = dx.hypot(dy);
        if len == 0.0 {
            return self.start.distance_to(p);
        }
        ((p.x - self.start.x) * dy - (p.y - self.start.y) * dx).abs() / len
    }
}

/// `count` points spread evenly around a circle, the first one on the positive x-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleLayout {
    pub center: Point,
    pub radius: f64,
    pub count: usize,
}

impl CircleLayout {
    pub fn new(center: Point, radius: f64, count: usize) -> Self {
        Self {
            center,
            radius,
            count,
        }
    }

    pub fn angle_step(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            TAU / self.count as f64
        }
    }

    pub fn angle(&self, index: usize) -> Radians {
        Radians(self.angle_step() * index as f64)
    }

    pub fn point(&self, index: usize) -> Point {
        self.center.polar(self.radius, self.angle(index))
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.count).map(|i| self.point(i))
    }
}

pub fn ring_points(center: Point, radius: f64, count: usize) -> Vec<Point> {
    CircleLayout::new(center, radius, count).points().collect()
}

/// Line through `center` from the point at `angle` to the opposite point.
pub fn diameter_line(center: Point, radius: f64, angle: Radians) -> Line {
    Line::new(
        center.polar(radius, angle),
        center.polar(radius, Radians(angle.value() + PI)),
    )
}

pub fn spokes(center: Point, radius: f64, count: usize) -> Vec<Line> {
    let layout = CircleLayout::new(center, radius, count);
    (0..count)
        .map(|i| diameter_line(center, radius, layout.angle(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: Point, b: Point) {
        assert!(
            a.distance_to(b) < EPS,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_ring_points_on_circle() {
        let center = Point::new(12.25, -3.0);
        for count in [1, 2, 3, 7, 12, 24, 100] {
            let points = ring_points(center, 42.0, count);
            assert_eq!(points.len(), count);
            for p in points {
                assert!((center.distance_to(p) - 42.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_ring_points_even_spacing() {
        let center = Point::new(0.0, 0.0);
        for count in [2, 5, 12, 24] {
            let points = ring_points(center, 10.0, count);
            let step = TAU / count as f64;
            for i in 0..count {
                let a = center.angle_to(points[i]).value();
                let b = center.angle_to(points[(i + 1) % count]).value();
                assert!(((b - a).rem_euclid(TAU) - step).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_ring_points_reference_layout() {
        let points = ring_points(Point::new(400.5, 300.5), 270.0, 24);
        assert_close(points[0], Point::new(670.5, 300.5));
        assert_close(points[6], Point::new(400.5, 570.5));
        assert_close(points[12], Point::new(130.5, 300.5));
        assert_close(points[18], Point::new(400.5, 30.5));
    }

    #[test]
    fn test_ring_points_empty_and_repeatable() {
        assert!(ring_points(Point::default(), 5.0, 0).is_empty());

        let layout = CircleLayout::new(Point::new(1.0, 2.0), 3.0, 9);
        let first: Vec<_> = layout.points().collect();
        let second: Vec<_> = layout.points().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_diameter_line_symmetric() {
        let center = Point::new(400.5, 300.5);
        for i in 0..24 {
            let angle = Radians::new(TAU / 24.0 * i as f64);
            let line = diameter_line(center, 270.0, angle);
            assert_close(line.start.midpoint(line.end), center);
            assert!((line.length() - 540.0).abs() < EPS);
            assert!(line.distance_to(center) < EPS);
        }
    }

    #[test]
    fn test_spokes_match_ring_points() {
        let center = Point::new(10.0, 20.0);
        let points = ring_points(center, 5.0, 24);
        let spokes = spokes(center, 5.0, 24);
        assert_eq!(spokes.len(), 24);
        for (i, spoke) in spokes.iter().enumerate() {
            assert_close(spoke.start, points[i]);
            assert_close(spoke.end, points[(i + 12) % 24]);
        }
    }

    #[test]
    fn test_angle_conversions() {
        let cases = vec![(0.0, 0.0), (90.0, PI / 2.0), (180.0, PI), (360.0, TAU)];
        for (deg, rad) in cases {
            assert!((Degrees::new(deg).to_radians().value() - rad).abs() < EPS);
            assert!((Radians::new(rad).to_degrees().value() - deg).abs() < EPS);
        }
    }
}
