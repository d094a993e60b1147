use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

use ordered_float::{FloatIsNan, NotNan};

/// Two `y` coordinates closer than this are considered equal.
pub const EPSILON: f64 = 0.0001;

/// Compares two doubles, treating anything within `EPSILON` as equal.
pub fn compare_with_epsilon(a: f64, b: f64) -> Ordering {
    if (a - b).abs() < EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Whether `min < num < max`.
pub fn in_range_exclusive(min: f64, num: f64, max: f64) -> bool {
    min < num && num < max
}

/// Whether `min <= num <= max`.
pub fn in_range_inclusive(min: f64, num: f64, max: f64) -> bool {
    min <= num && num <= max
}

/// The larger of two values, where a NaN on either side wins.
fn max_or_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// The smaller of two values, where a NaN on either side wins.
fn min_or_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Basic Point type for usage in the Voronoi lib.
///
/// Points are ordered (and compared for equality) by their `y` coordinate only,
/// within `EPSILON`. The `x` coordinate never takes part in comparisons, so two
/// sites on the same horizontal line are "equal".
#[derive(Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64
}

impl Point {
    /// Create a new point. Returns Err(FloatIsNan) if either parameter is NaN.
    pub fn new(x: f64, y: f64) -> Result<Point, FloatIsNan> {
        let x = NotNan::new(x)?;
        let y = NotNan::new(y)?;

        Ok(Point { x: x.into_inner(), y: y.into_inner() })
    }

    /// Like new, but panics instead of return an Err.
    pub fn new_unwrap(x: f64, y: f64) -> Point {
        Point::new(x, y).expect("Points cannot have NaN values.")
    }

    pub fn compare(&self, other: &Point) -> Ordering {
        compare_with_epsilon(self.y, other.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        LineSegment { from: *self, to: *other }.length()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Point) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Point {{ x: {}, y: {} }}", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point
}

impl LineSegment {
    pub fn length(&self) -> f64 {
        (self.dx().powi(2) + self.dy().powi(2)).sqrt()
    }

    pub fn midpoint(&self) -> Point {
        Point {
            x: (self.from.x + self.to.x) / 2f64,
            y: (self.from.y + self.to.y) / 2f64
        }
    }

    pub fn dx(&self) -> f64 {
        self.to.x - self.from.x
    }

    pub fn dy(&self) -> f64 {
        self.to.y - self.from.y
    }

    pub fn slope(&self) -> f64 {
        self.dy() / self.dx()
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\{{({}, {}) -> ({}, {})}}", self.from.x, self.from.y, self.to.x, self.to.y)
    }
}

/// The infinite line an edge lies on.
///
/// Bisectors of two sites with the exact same `y` are vertical and cannot be
/// written as `y = mx + b`, so they carry their `x` instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line {
    /// `y = slope * x + y_at_zero`
    Sloped { slope: f64, y_at_zero: f64 },
    /// `x = x`
    Vertical { x: f64 }
}

impl Line {
    /// The perpendicular bisector of `left` and `right`, passing through `start`.
    pub fn bisector_through(start: Point, left: Point, right: Point) -> Line {
        if left.y == right.y {
            return Line::Vertical { x: (left.x + right.x) / 2f64 };
        }

        let slope = (right.x - left.x) / (left.y - right.y);

        Line::Sloped { slope, y_at_zero: start.y - slope * start.x }
    }

    pub fn slope(&self) -> f64 {
        match *self {
            Line::Sloped { slope, .. } => slope,
            Line::Vertical { .. } => f64::INFINITY
        }
    }

    /// The `y` of the line at `x`. Vertical lines have no single answer.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            Line::Sloped { slope, y_at_zero } => Some(slope * x + y_at_zero),
            Line::Vertical { .. } => None
        }
    }

    /// Where the two lines cross.
    ///
    /// Parallel distinct lines never cross. Coincident sloped lines are not
    /// special cased and yield a non-finite point.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        match (*self, *other) {
            (Line::Sloped { slope: m1, y_at_zero: b1 }, Line::Sloped { slope: m2, y_at_zero: b2 }) => {
                if m1 == m2 && b1 != b2 {
                    return None;
                }

                let x = (b2 - b1) / (m1 - m2);
                Some(Point { x, y: m1 * x + b1 })
            },
            (Line::Vertical { x }, Line::Sloped { slope, y_at_zero })
            | (Line::Sloped { slope, y_at_zero }, Line::Vertical { x }) => {
                Some(Point { x, y: slope * x + y_at_zero })
            },
            (Line::Vertical { .. }, Line::Vertical { .. }) => None
        }
    }
}

/// Which direction the Triangle points are going in.
///
/// Measured in the usual mathematical frame, where a positive signed area is
/// counterclockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleOrientation {
    /// Points go around like a clock.
    Clockwise,
    /// Points go around opposite of a clock.
    Counterclockwise,
    /// Points coincide on a line.
    Collinear
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle(pub Point, pub Point, pub Point);

impl Triangle {
    /// Twice the signed area of the triangle.
    pub fn signed_area(&self) -> f64 {
        let Triangle(a, b, c) = *self;
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// Find the orientation of the triangle.
    ///
    /// See the TriangleOrientation docs for more information.
    pub fn orientation(&self) -> TriangleOrientation {
        use self::TriangleOrientation::*;

        let area = self.signed_area();
        if area > 0f64 { Counterclockwise } else if area < 0f64 { Clockwise } else { Collinear }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "△{{({}, {}), ({}, {}), ({}, {})}}", self.0.x, self.0.y, self.1.x, self.1.y, self.2.x, self.2.y)
    }
}

/// A parabola described as a focus and a directrix.
///
/// The parabola is the set of points where the distance between the focus
/// and the directrix are the same. The directrix here is always the sweepline.
///
/// A focus on the directrix is degenerate; nothing checks for it and the
/// arithmetic below produces non-finite values in that case.
#[derive(Debug, Clone, Copy)]
pub struct FocusDirectrixParabola {
    focus: Point,
    /// y = directrix
    directrix: f64
}

impl FocusDirectrixParabola {
    pub fn new(focus: Point, directrix: f64) -> FocusDirectrixParabola {
        FocusDirectrixParabola { focus, directrix }
    }

    /// The `y` of the point on the parabola above `x`.
    ///
    /// Uses the vertex form `(x - h)^2 = 4p(y - k)`, where `(h, k)` is the vertex
    /// and `p` the signed distance from the vertex to the focus.
    pub fn y_at(&self, x: f64) -> f64 {
        let h = self.focus.x;
        let k = (self.focus.y + self.directrix) / 2f64;
        let p = self.focus.y - k;

        ((x - h) * (x - h) + 4f64 * p * k) / 4f64 / p
    }
}

/// A parabola described by the equation `y = ax^2 + bx + c`.
#[derive(Debug, Clone, Copy)]
pub struct QuadraticParabola {
    a: f64,
    b: f64,
    c: f64
}

impl QuadraticParabola {
    /// Both roots of `ax^2 + bx + c = 0`, `+` root first.
    ///
    /// A negative discriminant or a zero `a` gives NaN or infinite roots.
    pub fn roots(&self) -> (f64, f64) {
        let discriminant_root = (self.b * self.b - 4f64 * self.a * self.c).sqrt();

        let q1 = (-self.b + discriminant_root) / (2f64 * self.a);
        let q2 = (-self.b - discriminant_root) / (2f64 * self.a);

        (q1, q2)
    }
}

impl From<FocusDirectrixParabola> for QuadraticParabola {
    fn from(FocusDirectrixParabola { focus: Point { x: fx, y: fy }, directrix: dy }: FocusDirectrixParabola) -> QuadraticParabola {
        // Let (x, y) be some point on the parabola. By definition its distance to the
        // focus equals its distance to the directrix:
        //
        // (y - dy)^2 = (x - fx)^2 + (y - fy)^2
        //
        // Expanding and cancelling the y^2 terms leaves
        //
        // 2*y*(fy - dy) = x^2 - 2*x*fx + fx^2 + fy^2 - dy^2
        //
        // and dividing by `div = 2*(fy - dy)` gives the coefficients below.
        let div = 2f64 * (fy - dy);

        QuadraticParabola {
            a: 1f64 / div,
            b: -2f64 * fx / div,
            c: (fx * fx + fy * fy - dy * dy) / div
        }
    }
}

impl<'p> Sub for &'p QuadraticParabola {
    type Output = QuadraticParabola;

    fn sub(self, other: &'p QuadraticParabola) -> QuadraticParabola {
        QuadraticParabola {
            a: self.a - other.a,
            b: self.b - other.b,
            c: self.c - other.c
        }
    }
}

/// The `x` where the parabolas of `left` and `right` meet, with the sweepline as
/// their shared directrix.
///
/// Two parabolas cross twice; the breakpoint between an arc of `left` and an arc
/// of `right` (in that order) is the larger root when `left` is the lower focus,
/// the smaller one otherwise. Foci sharing a `y` are translates of each other and
/// meet only at their midpoint.
pub fn breakpoint_x(left: Point, right: Point, sweepline: f64) -> f64 {
    if left.y == right.y {
        return (left.x + right.x) / 2f64;
    }

    let left_parabola = QuadraticParabola::from(FocusDirectrixParabola::new(left, sweepline));
    let right_parabola = QuadraticParabola::from(FocusDirectrixParabola::new(right, sweepline));
    let (x1, x2) = (&left_parabola - &right_parabola).roots();

    if left.y > right.y { max_or_nan(x1, x2) } else { min_or_nan(x1, x2) }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn points_compare_by_y_only() {
        let a = Point::new_unwrap(0.0, 5.0);
        let b = Point::new_unwrap(100.0, 5.00005);
        let c = Point::new_unwrap(0.0, 6.0);

        assert!(a == b);
        assert!(a < c);
        assert!(c > b);
    }

    #[test]
    fn point_rejects_nan() {
        assert!(Point::new(::std::f64::NAN, 1.0).is_err());
        assert!(Point::new(1.0, ::std::f64::NAN).is_err());
        assert!(Point::new(1.0, 2.0).is_ok());
    }

    #[test]
    fn ranges() {
        assert!(in_range_exclusive(0.0, 0.5, 1.0));
        assert!(!in_range_exclusive(0.0, 0.0, 1.0));
        assert!(!in_range_exclusive(0.0, 1.0, 1.0));
        assert!(in_range_inclusive(0.0, 0.0, 1.0));
        assert!(in_range_inclusive(0.0, 1.0, 1.0));
        assert!(!in_range_exclusive(0.0, ::std::f64::NAN, 1.0));
    }

    #[test]
    fn bisector_slope_and_intercept() {
        let left = Point::new_unwrap(10.0, 20.0);
        let right = Point::new_unwrap(90.0, 80.0);
        let midpoint = LineSegment { from: left, to: right }.midpoint();

        match Line::bisector_through(midpoint, left, right) {
            Line::Sloped { slope, y_at_zero } => {
                assert!(close(slope, 80.0 / -60.0));
                assert!(close(slope * 50.0 + y_at_zero, 50.0));
            },
            Line::Vertical { .. } => panic!("sites have distinct y")
        }
    }

    #[test]
    fn bisector_of_level_sites_is_vertical() {
        let line = Line::bisector_through(Point::new_unwrap(0.0, 0.0), Point::new_unwrap(20.0, 20.0), Point::new_unwrap(80.0, 20.0));

        assert_eq!(line, Line::Vertical { x: 50.0 });
        assert!(line.y_at(50.0).is_none());
        assert_eq!(line.slope(), ::std::f64::INFINITY);
    }

    #[test]
    fn intersection_1() {
        let l1 = Line::Sloped { slope: -1.0, y_at_zero: 2.0 };
        let l2 = Line::Sloped { slope: 1.0, y_at_zero: 0.0 };

        let point = l1.intersection(&l2).expect("lines cross");
        assert!(close(point.x, 1.0) && close(point.y, 1.0));
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let l1 = Line::Sloped { slope: 0.5, y_at_zero: 2.0 };
        let l2 = Line::Sloped { slope: 0.5, y_at_zero: 3.0 };

        assert!(l1.intersection(&l2).is_none());
        assert!(Line::Vertical { x: 1.0 }.intersection(&Line::Vertical { x: 2.0 }).is_none());
    }

    #[test]
    fn vertical_intersection() {
        let point = Line::Vertical { x: 50.0 }
            .intersection(&Line::Sloped { slope: 0.5, y_at_zero: 17.5 })
            .expect("lines cross");

        assert!(close(point.x, 50.0) && close(point.y, 42.5));
    }

    #[test]
    fn orientation() {
        let a = Point::new_unwrap(0.0, 0.0);
        let b = Point::new_unwrap(1.0, 0.0);
        let c = Point::new_unwrap(0.0, 1.0);

        assert_eq!(Triangle(a, b, c).orientation(), TriangleOrientation::Counterclockwise);
        assert_eq!(Triangle(a, c, b).orientation(), TriangleOrientation::Clockwise);
        assert_eq!(Triangle(a, b, Point::new_unwrap(2.0, 0.0)).orientation(), TriangleOrientation::Collinear);
    }

    #[test]
    fn parabola_point_is_equidistant() {
        let focus = Point::new_unwrap(20.0, 20.0);
        let parabola = FocusDirectrixParabola::new(focus, 80.0);
        let y = parabola.y_at(50.0);

        assert!(close(y, 42.5));
        assert!(close(focus.distance_to(&Point::new_unwrap(50.0, y)), 80.0 - y));
    }

    #[test]
    fn breakpoint_is_on_both_parabolas() {
        let left = Point::new_unwrap(20.0, 10.0);
        let right = Point::new_unwrap(60.0, 30.0);
        let sweepline = 50.0;

        let x = breakpoint_x(left, right, sweepline);
        let y_left = FocusDirectrixParabola::new(left, sweepline).y_at(x);
        let y_right = FocusDirectrixParabola::new(right, sweepline).y_at(x);

        assert!((y_left - y_right).abs() < 1e-6);
        // Swapping the sides picks the other root.
        assert!(x < breakpoint_x(right, left, sweepline));
    }

    #[test]
    fn breakpoint_of_level_foci_is_midpoint() {
        let x = breakpoint_x(Point::new_unwrap(20.0, 20.0), Point::new_unwrap(80.0, 20.0), 20.0);
        assert!(close(x, 50.0));
    }

    #[test]
    fn nan_roots_poison_choice() {
        assert!(max_or_nan(::std::f64::NAN, 1.0).is_nan());
        assert!(min_or_nan(1.0, ::std::f64::NAN).is_nan());
        assert_eq!(max_or_nan(1.0, 2.0), 2.0);
    }
}
