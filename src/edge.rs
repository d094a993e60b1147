use std::fmt;
use std::ops::{Index, IndexMut};

use crate::geometry::{in_range_inclusive, Line, LineSegment, Point};

/// Handle to an edge inside an `EdgeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

/// A boundary segment between two sites.
///
/// The line the edge lies on is fixed when the edge is created. The `end` is
/// found later in the sweep, and both ends may be snapped back onto the line by
/// `adjust_to_bounds`.
#[derive(Clone, Debug)]
pub struct Edge {
    pub start: Point,
    pub end: Option<Point>,
    line: Line,
    /// The twin edge born at the same breakpoint, growing the other way.
    neighbor: Option<EdgeId>
}

impl Edge {
    /// A new edge starting at `start`, separating `left_site` from `right_site`.
    pub fn new(start: Point, left_site: Point, right_site: Point) -> Edge {
        Edge {
            start,
            end: None,
            line: Line::bisector_through(start, left_site, right_site),
            neighbor: None
        }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn slope(&self) -> f64 {
        self.line.slope()
    }

    /// The `y` of the line when `x` is zero. `None` for vertical edges.
    pub fn y_at_zero(&self) -> Option<f64> {
        self.line.y_at(0f64)
    }

    pub fn neighbor(&self) -> Option<EdgeId> {
        self.neighbor
    }

    pub fn intersection_with(&self, other: &Edge) -> Option<Point> {
        self.line.intersection(&other.line)
    }

    /// The finished segment, once the end is known.
    pub fn segment(&self) -> Option<LineSegment> {
        self.end.map(|end| LineSegment { from: self.start, to: end })
    }

    /// Recompute each endpoint's `y` from its `x` when the endpoint's `x` lies
    /// outside `[0, width]` or its `y` lies inside `[0, height]`.
    ///
    /// This is not clipping. Endpoints may stay outside the rectangle.
    pub fn adjust_to_bounds(&mut self, width: f64, height: f64) {
        let line = self.line;
        let needs_adjusting = |point: &Point| {
            !in_range_inclusive(0f64, point.x, width) || in_range_inclusive(0f64, point.y, height)
        };
        let project = |point: Point| match line.y_at(point.x) {
            Some(y) => Point { x: point.x, y },
            None => point
        };

        if needs_adjusting(&self.start) {
            self.start = project(self.start);
        }

        if let Some(end) = self.end {
            if needs_adjusting(&end) {
                self.end = Some(project(end));
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "\\{{{} -> {}}}", self.start, end),
            None => write!(f, "\\{{{} -> ?}}", self.start)
        }
    }
}

/// Owns every edge created during one pass of the sweep.
#[derive(Clone, Debug, Default)]
pub struct EdgeArena(Vec<Edge>);

impl EdgeArena {
    pub fn new() -> EdgeArena {
        EdgeArena(vec![])
    }

    pub fn insert(&mut self, edge: Edge) -> EdgeId {
        self.0.push(edge);
        EdgeId(self.0.len() - 1)
    }

    /// Make `a` and `b` each other's neighbor.
    pub fn link_neighbors(&mut self, a: EdgeId, b: EdgeId) {
        self[a].neighbor = Some(b);
        self[b].neighbor = Some(a);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Index<EdgeId> for EdgeArena {
    type Output = Edge;

    fn index(&self, id: EdgeId) -> &Edge {
        &self.0[id.0]
    }
}

impl IndexMut<EdgeId> for EdgeArena {
    fn index_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.0[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn slope_is_perpendicular_to_sites() {
        let left = Point::new_unwrap(10.0, 20.0);
        let right = Point::new_unwrap(90.0, 80.0);
        let edge = Edge::new(Point::new_unwrap(50.0, 50.0), left, right);

        assert!(close(edge.slope(), (90.0 - 10.0) / (20.0 - 80.0)));
        assert!(close(edge.y_at_zero().expect("sloped edge"), 50.0 - edge.slope() * 50.0));
        assert!(edge.end.is_none());
        assert!(edge.segment().is_none());
    }

    #[test]
    fn twins_share_a_line() {
        let start = Point::new_unwrap(50.0, 50.0);
        let left = Point::new_unwrap(10.0, 20.0);
        let right = Point::new_unwrap(90.0, 80.0);

        assert_eq!(Edge::new(start, left, right).line(), Edge::new(start, right, left).line());
    }

    #[test]
    fn intersection_of_edges() {
        let a = Edge::new(Point::new_unwrap(0.0, 0.0), Point::new_unwrap(0.0, 1.0), Point::new_unwrap(1.0, 0.0));
        let b = Edge::new(Point::new_unwrap(0.0, 2.0), Point::new_unwrap(0.0, 1.0), Point::new_unwrap(-1.0, 0.0));

        let point = a.intersection_with(&b).expect("edges cross");
        assert!(close(point.x, 1.0) && close(point.y, 1.0));
    }

    #[test]
    fn parallel_edges_do_not_intersect() {
        let left = Point::new_unwrap(0.0, 0.0);
        let right = Point::new_unwrap(2.0, 1.0);
        let a = Edge::new(Point::new_unwrap(0.0, 0.0), left, right);
        let b = Edge::new(Point::new_unwrap(0.0, 5.0), left, right);

        assert!(a.intersection_with(&b).is_none());
    }

    #[test]
    fn linking_neighbors_is_mutual() {
        let mut arena = EdgeArena::new();
        let start = Point::new_unwrap(1.0, 1.0);
        let a = arena.insert(Edge::new(start, Point::new_unwrap(0.0, 0.0), Point::new_unwrap(2.0, 3.0)));
        let b = arena.insert(Edge::new(start, Point::new_unwrap(2.0, 3.0), Point::new_unwrap(0.0, 0.0)));

        arena.link_neighbors(a, b);

        assert_eq!(arena[a].neighbor(), Some(b));
        assert_eq!(arena[b].neighbor(), Some(a));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn adjusting_snaps_endpoints_inside_the_height_to_the_line() {
        let mut edge = Edge::new(Point::new_unwrap(0.0, 0.0), Point::new_unwrap(0.0, 1.0), Point::new_unwrap(1.0, 0.0));
        edge.start = Point::new_unwrap(5.0, 3.0);
        edge.end = Some(Point::new_unwrap(50.0, 500.0));

        edge.adjust_to_bounds(100.0, 100.0);

        // `y` in range: moved onto `y = x`.
        assert!(close(edge.start.y, 5.0));
        // `x` in range and `y` out of range: left alone.
        assert!(close(edge.end.expect("end set").y, 500.0));
    }

    #[test]
    fn adjusting_snaps_endpoints_outside_the_width_to_the_line() {
        let mut edge = Edge::new(Point::new_unwrap(0.0, 0.0), Point::new_unwrap(0.0, 1.0), Point::new_unwrap(1.0, 0.0));
        edge.end = Some(Point::new_unwrap(-20.0, 300.0));

        edge.adjust_to_bounds(100.0, 100.0);

        assert!(close(edge.end.expect("end set").y, -20.0));
    }

    #[test]
    fn adjusting_leaves_vertical_edges_alone() {
        let mut edge = Edge::new(Point::new_unwrap(50.0, -200.0), Point::new_unwrap(20.0, 20.0), Point::new_unwrap(80.0, 20.0));
        edge.end = Some(Point::new_unwrap(50.0, 42.5));

        edge.adjust_to_bounds(100.0, 100.0);

        assert!(close(edge.start.y, -200.0));
        assert!(close(edge.end.expect("end set").y, 42.5));
    }
}
