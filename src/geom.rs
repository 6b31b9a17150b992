// Copyright 2025 Lars Brubaker
//
// Pure geometric functions on 2D points.
//
// Segment crossings are decided with the parametric line-intersection
// formulation: both parameters must lie strictly inside (0, 1). Shared or
// touching endpoints and parallel segments never count as a crossing.

use std::ops::{Add, Mul, Sub};

pub type Real = f64;

/// A 2D coordinate. Plain value type with no identity.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn dist2(self, other: Point) -> Real {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dist(self, other: Point) -> Real {
        self.dist2(other).sqrt()
    }

    /// Point at parameter `t` along `self → other`.
    #[inline]
    pub fn lerp(self, other: Point, t: Real) -> Point {
        self + (other - self) * t
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(self, other: Point) -> Real {
        self.x * other.y - self.y * other.x
    }

    /// True if both coordinates are within `eps` of `other`.
    #[inline]
    pub fn approx_eq(self, other: Point, eps: Real) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Real> for Point {
    type Output = Point;
    fn mul(self, rhs: Real) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Twice the signed area of triangle (p, q, r).
/// Negative when p → q → r turns clockwise, positive when counter-clockwise.
#[inline]
pub fn orient(p: Point, q: Point, r: Point) -> Real {
    (q - p).cross(r - p)
}

/// Signed area of a closed polygon given by its vertices in order.
/// Negative for clockwise rings.
pub fn polygon_signed_area(points: &[Point]) -> Real {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area * 0.5
}

/// Outcome of a segment/segment test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentIntersection {
    /// Crossing point, present only when `intersects` is true.
    pub point: Option<Point>,
    pub intersects: bool,
}

impl SegmentIntersection {
    pub const NONE: SegmentIntersection = SegmentIntersection {
        point: None,
        intersects: false,
    };
}

/// Intersect the finite segments [p1, p2] and [q1, q2].
///
/// Solves for `a` along p and `b` along q where the infinite extensions
/// cross. A crossing is reported only if both lie in the open interval
/// (0, 1), so endpoint contact is never an intersection. A zero denominator
/// (parallel or collinear lines) reports no intersection either.
pub fn segment_intersection(p1: Point, p2: Point, q1: Point, q2: Point) -> SegmentIntersection {
    let denominator = (q2.y - q1.y) * (p2.x - p1.x) - (q2.x - q1.x) * (p2.y - p1.y);
    if denominator == 0.0 {
        return SegmentIntersection::NONE;
    }

    let dy = p1.y - q1.y;
    let dx = p1.x - q1.x;
    let numerator_a = (q2.x - q1.x) * dy - (q2.y - q1.y) * dx;
    let numerator_b = (p2.x - p1.x) * dy - (p2.y - p1.y) * dx;
    let a = numerator_a / denominator;
    let b = numerator_b / denominator;

    let on_p = a > 0.0 && a < 1.0;
    let on_q = b > 0.0 && b < 1.0;
    if !(on_p && on_q) {
        return SegmentIntersection::NONE;
    }

    SegmentIntersection {
        point: Some(p1.lerp(p2, a)),
        intersects: true,
    }
}
