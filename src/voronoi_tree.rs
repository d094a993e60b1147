use std::ops::{Index, IndexMut};

use crate::edge::EdgeId;
use crate::event_queue::EventId;
use crate::geometry::{self, Point};

/// Handle to a node of the beachline tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArcKind {
    /// An arc on the beachline: a parabola with the specified focus and the
    /// sweepline as directrix. `site` is the focus' index in the site list.
    OnBeach { focus: Point, site: usize },

    /// A breakpoint between the arcs on either side, tracing out `edge` as the
    /// sweepline moves.
    Breakpoint { edge: EdgeId }
}

/// A node of the beachline tree.
///
/// Leaves are arcs on the beachline, read left to right in order of `x`.
/// Inner nodes are the breakpoints between neighbouring leaves. No `x` is stored
/// anywhere; breakpoints are located from their neighbouring foci and the
/// current sweepline every time they are asked.
#[derive(Clone, Debug)]
pub struct Arc {
    pub kind: ArcKind,

    /// The circle event where this arc disappears, if any.
    pub disappearance: Option<EventId>,

    parent: Option<ArcId>,
    left_child: Option<ArcId>,
    right_child: Option<ArcId>
}

impl Arc {
    fn new(kind: ArcKind) -> Arc {
        Arc { kind, disappearance: None, parent: None, left_child: None, right_child: None }
    }

    pub fn is_on_beach(&self) -> bool {
        match self.kind {
            ArcKind::OnBeach { .. } => true,
            ArcKind::Breakpoint { .. } => false
        }
    }

    pub fn focus(&self) -> Option<Point> {
        match self.kind {
            ArcKind::OnBeach { focus, .. } => Some(focus),
            ArcKind::Breakpoint { .. } => None
        }
    }

    pub fn site(&self) -> Option<usize> {
        match self.kind {
            ArcKind::OnBeach { site, .. } => Some(site),
            ArcKind::Breakpoint { .. } => None
        }
    }

    pub fn edge(&self) -> Option<EdgeId> {
        match self.kind {
            ArcKind::OnBeach { .. } => None,
            ArcKind::Breakpoint { edge } => Some(edge)
        }
    }

    pub fn parent(&self) -> Option<ArcId> {
        self.parent
    }

    #[cfg(test)]
    pub fn left_child(&self) -> Option<ArcId> {
        self.left_child
    }

    #[cfg(test)]
    pub fn right_child(&self) -> Option<ArcId> {
        self.right_child
    }
}

/// The beachline, stored as a binary tree in an arena.
///
/// Nodes spliced out of the tree stay in the arena until the next `clear`.
#[derive(Clone, Debug, Default)]
pub struct Beachline {
    arcs: Vec<Arc>,
    root: Option<ArcId>
}

impl Beachline {
    pub fn new() -> Beachline {
        Beachline::default()
    }

    pub fn clear(&mut self) {
        self.arcs.clear();
        self.root = None;
    }

    #[cfg(test)]
    pub fn root(&self) -> Option<ArcId> {
        self.root
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn set_root(&mut self, root: ArcId) {
        self[root].parent = None;
        self.root = Some(root);
    }

    /// Create a detached arc for the site `site` located at `focus`.
    pub fn insert_leaf(&mut self, focus: Point, site: usize) -> ArcId {
        self.insert(Arc::new(ArcKind::OnBeach { focus, site }))
    }

    /// Create a detached breakpoint growing `edge`.
    pub fn insert_breakpoint(&mut self, edge: EdgeId) -> ArcId {
        self.insert(Arc::new(ArcKind::Breakpoint { edge }))
    }

    fn insert(&mut self, arc: Arc) -> ArcId {
        self.arcs.push(arc);
        ArcId(self.arcs.len() - 1)
    }

    /// Sets the left child and updates the new child's parent.
    pub fn attach_left(&mut self, parent: ArcId, child: ArcId) {
        self[parent].left_child = Some(child);
        self[child].parent = Some(parent);
    }

    /// Sets the right child and updates the new child's parent.
    pub fn attach_right(&mut self, parent: ArcId, child: ArcId) {
        self[parent].right_child = Some(child);
        self[child].parent = Some(parent);
    }

    /// Turn an arc on the beach into a breakpoint growing `edge`.
    pub fn convert_to_breakpoint(&mut self, arc: ArcId, edge: EdgeId) {
        self[arc].kind = ArcKind::Breakpoint { edge };
    }

    /// Give a breakpoint a fresh edge to grow.
    pub fn set_edge(&mut self, breakpoint: ArcId, edge: EdgeId) {
        debug_assert!(!self[breakpoint].is_on_beach());
        self[breakpoint].kind = ArcKind::Breakpoint { edge };
    }

    /// The closest ancestor reached from its right subtree, i.e. the breakpoint
    /// bordering `arc`'s subtree on the left.
    pub fn nearest_left_ancestor(&self, arc: ArcId) -> Option<ArcId> {
        let mut last = arc;
        let mut parent = self[arc].parent;

        while let Some(current) = parent {
            if self[current].left_child != Some(last) {
                break;
            }

            last = current;
            parent = self[current].parent;
        }

        parent
    }

    /// The closest ancestor reached from its left subtree, i.e. the breakpoint
    /// bordering `arc`'s subtree on the right.
    pub fn nearest_right_ancestor(&self, arc: ArcId) -> Option<ArcId> {
        let mut last = arc;
        let mut parent = self[arc].parent;

        while let Some(current) = parent {
            if self[current].right_child != Some(last) {
                break;
            }

            last = current;
            parent = self[current].parent;
        }

        parent
    }

    /// The arc on the beach directly left of a breakpoint.
    pub fn nearest_left_leaf(&self, breakpoint: ArcId) -> Option<ArcId> {
        let mut child = self[breakpoint].left_child;

        while let Some(current) = child {
            if self[current].is_on_beach() {
                break;
            }

            child = self[current].right_child;
        }

        child
    }

    /// The arc on the beach directly right of a breakpoint.
    pub fn nearest_right_leaf(&self, breakpoint: ArcId) -> Option<ArcId> {
        let mut child = self[breakpoint].right_child;

        while let Some(current) = child {
            if self[current].is_on_beach() {
                break;
            }

            child = self[current].left_child;
        }

        child
    }

    /// The focus of an arc on the beach.
    ///
    /// # Panics
    ///
    /// If `arc` is a breakpoint.
    pub fn focus(&self, arc: ArcId) -> Point {
        self[arc].focus().expect("Only arcs on the beach have a focus.")
    }

    /// The edge of a breakpoint.
    ///
    /// # Panics
    ///
    /// If `arc` is on the beach.
    pub fn edge(&self, breakpoint: ArcId) -> EdgeId {
        self[breakpoint].edge().expect("Only breakpoints have an edge.")
    }

    /// Calculate the `x` coordinate of the breakpoint at the given sweepline.
    ///
    /// Recomputed from the two neighbouring foci on every call.
    pub fn breakpoint_x(&self, breakpoint: ArcId, sweepline: f64) -> f64 {
        let left = self.nearest_left_leaf(breakpoint).expect("A breakpoint has an arc on its left.");
        let right = self.nearest_right_leaf(breakpoint).expect("A breakpoint has an arc on its right.");

        geometry::breakpoint_x(self.focus(left), self.focus(right), sweepline)
    }

    /// The arc on the beach directly above `x` at the given sweepline.
    pub fn arc_above(&self, x: f64, sweepline: f64) -> Option<ArcId> {
        let mut current = self.root?;

        while !self[current].is_on_beach() {
            let next = if self.breakpoint_x(current, sweepline) > x {
                self[current].left_child
            } else {
                self[current].right_child
            };

            current = next.expect("Breakpoints always have two children.");
        }

        Some(current)
    }

    /// Remove an arc on the beach along with its parent breakpoint, moving the
    /// arc's sibling into the parent's place.
    pub fn splice_out(&mut self, arc: ArcId) {
        let parent = self[arc].parent.expect("A spliced arc has a parent breakpoint.");
        let sibling = if self[parent].left_child == Some(arc) {
            self[parent].right_child
        } else {
            self[parent].left_child
        };
        let sibling = sibling.expect("Breakpoints always have two children.");

        match self[parent].parent {
            Some(grandparent) if self[grandparent].left_child == Some(parent) => self.attach_left(grandparent, sibling),
            Some(grandparent) => self.attach_right(grandparent, sibling),
            None => self.set_root(sibling)
        }
    }

    /// Every node under the root, parents before children, left before right.
    pub fn pre_order(&self) -> Vec<ArcId> {
        let mut order = vec![];
        let mut stack: Vec<ArcId> = self.root.into_iter().collect();

        while let Some(arc) = stack.pop() {
            order.push(arc);
            stack.extend(self[arc].right_child);
            stack.extend(self[arc].left_child);
        }

        order
    }

    /// The arcs on the beach, left to right.
    #[cfg(test)]
    pub fn leaves(&self) -> Vec<ArcId> {
        let mut leaves = vec![];
        let mut stack = vec![];
        let mut current = self.root;

        while current.is_some() || !stack.is_empty() {
            while let Some(arc) = current {
                stack.push(arc);
                current = self[arc].left_child;
            }

            if let Some(arc) = stack.pop() {
                if self[arc].is_on_beach() {
                    leaves.push(arc);
                }
                current = self[arc].right_child;
            }
        }

        leaves
    }
}

impl Index<ArcId> for Beachline {
    type Output = Arc;

    fn index(&self, id: ArcId) -> &Arc {
        &self.arcs[id.0]
    }
}

impl IndexMut<ArcId> for Beachline {
    fn index_mut(&mut self, id: ArcId) -> &mut Arc {
        &mut self.arcs[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Edge, EdgeArena};

    struct Split {
        beachline: Beachline,
        root: ArcId,
        inner: ArcId,
        p0: ArcId,
        p1: ArcId,
        p2: ArcId
    }

    /// One arc split by a new site, shaped like the sweep does it:
    ///
    /// ```text
    ///        (root)
    ///       /      \
    ///    (p0)    (inner)
    ///            /     \
    ///         (p1)     (p2)
    /// ```
    fn split() -> Split {
        let old = Point::new_unwrap(50.0, 10.0);
        let new = Point::new_unwrap(40.0, 30.0);
        let mut edges = EdgeArena::new();
        let left = edges.insert(Edge::new(Point::new_unwrap(40.0, 0.0), old, new));
        let right = edges.insert(Edge::new(Point::new_unwrap(40.0, 0.0), new, old));

        let mut beachline = Beachline::new();
        let root = beachline.insert_leaf(old, 0);
        beachline.set_root(root);
        beachline.convert_to_breakpoint(root, left);

        let p0 = beachline.insert_leaf(old, 0);
        let inner = beachline.insert_breakpoint(right);
        let p1 = beachline.insert_leaf(new, 1);
        let p2 = beachline.insert_leaf(old, 0);

        beachline.attach_left(root, p0);
        beachline.attach_right(root, inner);
        beachline.attach_left(inner, p1);
        beachline.attach_right(inner, p2);

        Split { beachline, root, inner, p0, p1, p2 }
    }

    #[test]
    fn attaching_sets_parent() {
        let Split { beachline, root, inner, p0, p1, .. } = split();

        assert_eq!(beachline[p0].parent(), Some(root));
        assert_eq!(beachline[root].left_child(), Some(p0));
        assert_eq!(beachline[p1].parent(), Some(inner));
        assert_eq!(beachline[root].parent(), None);
        assert!(!beachline[root].is_on_beach());
        assert!(beachline[root].focus().is_none());
    }

    #[test]
    fn ancestors() {
        let Split { beachline, root, inner, p0, p1, p2 } = split();

        assert_eq!(beachline.nearest_left_ancestor(p0), None);
        assert_eq!(beachline.nearest_right_ancestor(p0), Some(root));
        assert_eq!(beachline.nearest_left_ancestor(p1), Some(root));
        assert_eq!(beachline.nearest_right_ancestor(p1), Some(inner));
        assert_eq!(beachline.nearest_left_ancestor(p2), Some(inner));
        assert_eq!(beachline.nearest_right_ancestor(p2), None);
    }

    #[test]
    fn adjacent_leaves() {
        let Split { beachline, root, inner, p0, p1, p2 } = split();

        assert_eq!(beachline.nearest_left_leaf(root), Some(p0));
        assert_eq!(beachline.nearest_right_leaf(root), Some(p1));
        assert_eq!(beachline.nearest_left_leaf(inner), Some(p1));
        assert_eq!(beachline.nearest_right_leaf(inner), Some(p2));
    }

    #[test]
    fn leaves_in_order() {
        let Split { beachline, p0, p1, p2, .. } = split();

        assert_eq!(beachline.leaves(), vec![p0, p1, p2]);
    }

    #[test]
    fn breakpoints_surround_the_new_arc() {
        let Split { beachline, root, inner, p0, p1, p2 } = split();
        let sweepline = 40.0;

        let left_x = beachline.breakpoint_x(root, sweepline);
        let right_x = beachline.breakpoint_x(inner, sweepline);

        assert!(left_x < 40.0 && 40.0 < right_x);
        assert_eq!(beachline.arc_above(40.0, sweepline), Some(p1));
        assert_eq!(beachline.arc_above(left_x - 1.0, sweepline), Some(p0));
        assert_eq!(beachline.arc_above(right_x + 1.0, sweepline), Some(p2));
    }

    #[test]
    fn splicing_promotes_the_sibling() {
        let Split { mut beachline, root, inner, p0, p1, p2 } = split();

        beachline.splice_out(p1);

        assert_eq!(beachline[root].right_child(), Some(p2));
        assert_eq!(beachline[p2].parent(), Some(root));
        assert_eq!(beachline.leaves(), vec![p0, p2]);
        assert!(!beachline.pre_order().contains(&inner));
    }

    #[test]
    fn splicing_under_the_root_replaces_it() {
        let Split { mut beachline, root, inner, p0, .. } = split();

        beachline.splice_out(p0);

        assert_eq!(beachline.root(), Some(inner));
        assert_eq!(beachline[inner].parent(), None);
        assert!(!beachline.pre_order().contains(&root));
    }

    #[test]
    fn pre_order_visits_parents_first() {
        let Split { beachline, root, inner, p0, p1, p2 } = split();

        assert_eq!(beachline.pre_order(), vec![root, p0, inner, p1, p2]);
    }

    #[test]
    fn empty_beachline() {
        let beachline = Beachline::new();

        assert!(beachline.is_empty());
        assert_eq!(beachline.arc_above(1.0, 1.0), None);
        assert!(beachline.leaves().is_empty());
        assert!(beachline.pre_order().is_empty());
    }
}
