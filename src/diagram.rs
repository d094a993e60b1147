use std::collections::HashSet;
use std::fmt;

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::edge::{Edge, EdgeArena, EdgeId};
use crate::error::DiagramError;
use crate::event_queue::{Event, EventKind, EventQueue};
use crate::geometry::{in_range_exclusive, FocusDirectrixParabola, LineSegment, Point, Triangle, TriangleOrientation};
use crate::logger::{DiscardLogger, SweepLogMessage, SweepLogger};
use crate::voronoi_tree::{ArcId, Beachline};

/// A site drawn uniformly from the open rectangle `0 < x < width`, `0 < y < height`.
pub fn random_site<R: Rng>(rng: &mut R, width: u32, height: u32) -> Point {
    let x: f64 = rng.sample(Open01);
    let y: f64 = rng.sample(Open01);

    Point { x: x * f64::from(width), y: y * f64::from(height) }
}

/// A Voronoi diagram over a rectangle, generated with Fortune's Algorithm.
///
/// The sweepline moves towards increasing `y`. Fortune's Algorithm cannot
/// update a finished diagram, so every change to the sites regenerates all the
/// edges from scratch.
pub struct Diagram<R = StdRng, L = DiscardLogger> {
    width: u32,
    height: u32,
    sites: Vec<Point>,

    /// Every edge created during the last pass.
    arena: EdgeArena,
    /// The finished edges, in the order they were closed.
    edges: Vec<EdgeId>,

    beachline: Beachline,
    events: EventQueue,
    sweepline: f64,

    rng: R,
    logger: L
}

impl Diagram<StdRng, DiscardLogger> {
    /// Creates a new diagram and generates its edges.
    ///
    /// Every site must lie strictly inside the rectangle; this is not checked.
    pub fn new(width: u32, height: u32, sites: Vec<Point>) -> Diagram<StdRng, DiscardLogger> {
        Diagram::with_rng(width, height, sites, StdRng::from_entropy())
    }
}

impl<R: Rng> Diagram<R, DiscardLogger> {
    /// Like `new`, drawing random sites and removals from `rng`.
    pub fn with_rng(width: u32, height: u32, sites: Vec<Point>, rng: R) -> Diagram<R, DiscardLogger> {
        Diagram::with_rng_and_logger(width, height, sites, rng, DiscardLogger)
    }
}

impl<R: Rng, L: SweepLogger> Diagram<R, L> {
    pub fn with_rng_and_logger(width: u32, height: u32, sites: Vec<Point>, rng: R, logger: L) -> Diagram<R, L> {
        let mut diagram = Diagram {
            width,
            height,
            sites,
            arena: EdgeArena::new(),
            edges: vec![],
            beachline: Beachline::new(),
            events: EventQueue::new(),
            sweepline: 0f64,
            rng,
            logger
        };

        diagram.recompute();
        diagram
    }
}

impl<R, L> Diagram<R, L> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    /// The finished edges. Each edge separates two sites and has its end set.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().map(move |&id| &self.arena[id])
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The twin of an edge: the other half of the same bisector, born at the
    /// same point.
    pub fn neighbor_of(&self, edge: &Edge) -> Option<&Edge> {
        edge.neighbor().map(|id| &self.arena[id])
    }

    /// The finished edges with twins joined into a single segment.
    ///
    /// Twins start at the same point and grow apart along one line, so the pair
    /// becomes the segment from one twin's end to the other's.
    pub fn segments(&self) -> Vec<LineSegment> {
        let mut joined = HashSet::new();
        let mut segments = vec![];

        for &id in &self.edges {
            if joined.contains(&id) {
                continue;
            }

            let edge = &self.arena[id];
            let end = match edge.end {
                Some(end) => end,
                None => continue
            };

            let twin_end = edge.neighbor().and_then(|twin| self.arena[twin].end.map(|twin_end| (twin, twin_end)));
            match twin_end {
                Some((twin, twin_end)) => {
                    joined.insert(twin);
                    segments.push(LineSegment { from: twin_end, to: end });
                },
                None => segments.push(LineSegment { from: edge.start, to: end })
            }
        }

        segments
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }
}

impl<R: Rng, L: SweepLogger> Diagram<R, L> {
    /// Adds the given site and regenerates the diagram.
    ///
    /// A site equal to an existing one (see `Point`'s equality) is ignored and
    /// `Ok(false)` is returned.
    pub fn add_site(&mut self, x: f64, y: f64) -> Result<bool, DiagramError> {
        let width = f64::from(self.width);
        let height = f64::from(self.height);

        if !in_range_exclusive(0f64, x, width) || !in_range_exclusive(0f64, y, height) {
            return Err(DiagramError::OutOfBounds { x, y, width: self.width, height: self.height });
        }

        let site = Point { x, y };
        if self.sites.contains(&site) {
            return Ok(false);
        }

        self.sites.push(site);
        self.recompute();
        Ok(true)
    }

    /// Adds a new random site and regenerates the diagram.
    pub fn add_random_site(&mut self) -> Result<bool, DiagramError> {
        let site = random_site(&mut self.rng, self.width, self.height);
        self.add_site(site.x, site.y)
    }

    /// Deletes a random site and regenerates the diagram. Returns the site.
    pub fn del_site(&mut self) -> Result<Point, DiagramError> {
        if self.sites.is_empty() {
            return Err(DiagramError::EmptyCollection);
        }

        let index = self.rng.gen_range(0..self.sites.len());
        let removed = self.sites.remove(index);

        self.recompute();
        Ok(removed)
    }

    /// Regenerates the diagram's edges from the current sites.
    pub fn recompute(&mut self) {
        self.logger.log(SweepLogMessage::Reset(&self.sites));

        self.events = EventQueue::from_sites(&self.sites);
        self.arena.clear();
        self.edges.clear();
        self.beachline.clear();
        self.sweepline = 0f64;

        self.generate_edges();
    }

    fn generate_edges(&mut self) {
        while let Some(event) = self.events.pop() {
            self.sweepline = event.site.y;

            match event.kind {
                EventKind::Site { index } => {
                    self.logger.log(SweepLogMessage::SiteEvent(&event.site));
                    self.handle_site(event.site, index);
                },
                EventKind::Circle { arc } if event.is_valid => self.handle_circle(event.site, arc),
                EventKind::Circle { .. } => self.logger.log(SweepLogMessage::StaleCircleSkipped(&event.site))
            }
        }

        // Past anything inside the diagram.
        self.sweepline = f64::from(self.width) + f64::from(self.height);
        self.finish_edges();
        self.adjust_edges();

        self.logger.log(SweepLogMessage::Finished { edges: self.edges.len() });
    }

    /// Close every edge still growing on the beachline where its breakpoint is
    /// at the current sweepline.
    fn finish_edges(&mut self) {
        for arc in self.beachline.pre_order() {
            let edge = match self.beachline[arc].edge() {
                Some(edge) => edge,
                None => continue
            };

            let x = self.beachline.breakpoint_x(arc, self.sweepline);
            let y = match self.arena[edge].line().y_at(x) {
                Some(y) => y,
                None => {
                    let left = self.beachline.nearest_left_leaf(arc).expect("A breakpoint has an arc on its left.");
                    self.parabola_y(self.beachline.focus(left), x)
                }
            };

            self.arena[edge].end = Some(Point { x, y });
            self.edges.push(edge);
        }
    }

    fn adjust_edges(&mut self) {
        let width = f64::from(self.width);
        let height = f64::from(self.height);

        for &id in &self.edges {
            self.arena[id].adjust_to_bounds(width, height);
        }
    }

    /// Splits the arc above the new site in two, with the new site's arc in
    /// between, then looks for circle events on the two pieces.
    ///
    /// ```text
    ///            (left edge)
    ///           /           \
    ///       (p0)         (right edge)
    ///                    /          \
    ///                 (p1)          (p2)
    /// ```
    fn handle_site(&mut self, site: Point, index: usize) {
        let above = match self.beachline.arc_above(site.x, self.sweepline) {
            Some(above) => above,
            None => {
                let first = self.beachline.insert_leaf(site, index);
                self.beachline.set_root(first);
                return;
            }
        };

        self.invalidate_disappearance(above);

        let old_focus = self.beachline.focus(above);
        let old_site = self.beachline[above].site().expect("The arc above a site is on the beach.");

        if old_focus.y == site.y {
            self.place_beside(above, old_focus, old_site, site, index);
            return;
        }

        let start = Point { x: site.x, y: self.parabola_y(old_focus, site.x) };
        let left = self.arena.insert(Edge::new(start, old_focus, site));
        let right = self.arena.insert(Edge::new(start, site, old_focus));
        self.arena.link_neighbors(left, right);

        self.beachline.convert_to_breakpoint(above, left);

        let p0 = self.beachline.insert_leaf(old_focus, old_site);
        let inner = self.beachline.insert_breakpoint(right);
        let p1 = self.beachline.insert_leaf(site, index);
        let p2 = self.beachline.insert_leaf(old_focus, old_site);

        self.beachline.attach_left(above, p0);
        self.beachline.attach_right(above, inner);
        self.beachline.attach_left(inner, p1);
        self.beachline.attach_right(inner, p2);

        self.check_for_circle(p0);
        self.check_for_circle(p2);
    }

    /// The arc above is still a vertical ray on the sweepline, so the new arc
    /// goes next to it. Their boundary is vertical and reaches up past the top
    /// of the diagram.
    ///
    /// Sites on one line arrive left to right, so the arc above is the
    /// rightmost of the row and the new arc always goes on its right.
    fn place_beside(&mut self, above: ArcId, old_focus: Point, old_site: usize, site: Point, index: usize) {
        debug_assert!(old_focus.x <= site.x);

        let start = Point {
            x: (old_focus.x + site.x) / 2f64,
            y: -(f64::from(self.width) + f64::from(self.height))
        };

        let left = self.beachline.insert_leaf(old_focus, old_site);
        let right = self.beachline.insert_leaf(site, index);

        let edge = self.arena.insert(Edge::new(start, old_focus, site));
        self.beachline.convert_to_breakpoint(above, edge);
        self.beachline.attach_left(above, left);
        self.beachline.attach_right(above, right);

        self.check_for_circle(left);
        self.check_for_circle(right);
    }

    /// Removes the arc squeezed out at this event, closing the two edges that
    /// bordered it at the new vertex and starting the edge between its former
    /// neighbours.
    fn handle_circle(&mut self, bottom: Point, arc: ArcId) {
        let left_parent = self.beachline.nearest_left_ancestor(arc).expect("A disappearing arc has a breakpoint on its left.");
        let right_parent = self.beachline.nearest_right_ancestor(arc).expect("A disappearing arc has a breakpoint on its right.");
        let left_arc = self.beachline.nearest_left_leaf(left_parent).expect("A breakpoint has an arc on its left.");
        let right_arc = self.beachline.nearest_right_leaf(right_parent).expect("A breakpoint has an arc on its right.");

        self.invalidate_disappearance(left_arc);
        self.invalidate_disappearance(right_arc);

        let vertex = Point { x: bottom.x, y: self.parabola_y(self.beachline.focus(arc), bottom.x) };
        self.logger.log(SweepLogMessage::CircleEvent { vertex: &vertex });

        for &breakpoint in &[left_parent, right_parent] {
            let edge = self.beachline.edge(breakpoint);
            self.arena[edge].end = Some(vertex);
            self.edges.push(edge);
        }

        let higher = self
            .higher_breakpoint(arc, left_parent, right_parent)
            .expect("One of the bordering breakpoints is the arc's parent.");
        let edge = self.arena.insert(Edge::new(vertex, self.beachline.focus(left_arc), self.beachline.focus(right_arc)));
        self.beachline.set_edge(higher, edge);

        self.beachline.splice_out(arc);

        self.check_for_circle(left_arc);
        self.check_for_circle(right_arc);
    }

    /// Of the two breakpoints bordering `arc`, the one met second on the way
    /// up to the root.
    fn higher_breakpoint(&self, arc: ArcId, left_parent: ArcId, right_parent: ArcId) -> Option<ArcId> {
        let mut current = arc;

        while let Some(parent) = self.beachline[current].parent() {
            if parent == left_parent {
                return Some(right_parent);
            }

            if parent == right_parent {
                return Some(left_parent);
            }

            current = parent;
        }

        None
    }

    /// Queues a circle event for `arc` if its neighbours will squeeze it out
    /// below the sweepline.
    fn check_for_circle(&mut self, arc: ArcId) {
        let (left_parent, right_parent) = match (self.beachline.nearest_left_ancestor(arc), self.beachline.nearest_right_ancestor(arc)) {
            (Some(left), Some(right)) => (left, right),
            _ => return
        };

        let (left_arc, right_arc) = match (self.beachline.nearest_left_leaf(left_parent), self.beachline.nearest_right_leaf(right_parent)) {
            (Some(left), Some(right)) => (left, right),
            _ => return
        };

        // Three distinct sites are needed.
        if self.beachline[left_arc].site() == self.beachline[right_arc].site() {
            return;
        }

        let focus = self.beachline.focus(arc);
        let triangle = Triangle(self.beachline.focus(left_arc), focus, self.beachline.focus(right_arc));
        if triangle.orientation() != TriangleOrientation::Counterclockwise {
            return;
        }

        let left_edge = &self.arena[self.beachline.edge(left_parent)];
        let right_edge = &self.arena[self.beachline.edge(right_parent)];
        let center = match left_edge.intersection_with(right_edge) {
            Some(center) => center,
            None => return
        };

        let radius = focus.distance_to(&center);
        if center.y + radius < self.sweepline {
            return;
        }

        let bottom = Point { x: center.x, y: center.y + radius };
        let event = self.events.insert(Event::circle(bottom, arc));
        self.beachline[arc].disappearance = Some(event);

        self.logger.log(SweepLogMessage::CircleScheduled(&bottom));
    }

    fn invalidate_disappearance(&mut self, arc: ArcId) {
        if let Some(event) = self.beachline[arc].disappearance.take() {
            self.events.invalidate(event);
        }
    }

    /// The `y` of the point above `x` on the parabola with the given focus and
    /// the sweepline as directrix.
    fn parabola_y(&self, focus: Point, x: f64) -> f64 {
        FocusDirectrixParabola::new(focus, self.sweepline).y_at(x)
    }
}

impl<R, L> fmt::Display for Diagram<R, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Diagram {}x{} with {} sites {{\n    {}\n}}",
            self.width,
            self.height,
            self.sites.len(),
            itertools::join(self.edges.iter().map(|&id| &self.arena[id]), ",\n    ")
        )
    }
}
