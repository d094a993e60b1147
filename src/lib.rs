// function Fortune (sites)
//    queue := a site event for every site, lowest y first
//    beachline := empty
//    while queue is not empty do
//       event := pop the lowest event of queue
//       if event is a site event
//          split the arc above the site, start two edges at the split
//          look for circle events on the arcs next to the new arc
//       else if event is still valid
//          remove the arc squeezed out at event, closing its two edges at a vertex
//          start an edge between the arcs on either side
//          look for circle events on those two arcs
//    move the sweepline far below the sites
//    close every edge still on the beachline
//    return edges

//! Voronoi diagrams of sites inside a rectangle, generated with Fortune's
//! Algorithm.
//!
//! https://en.wikipedia.org/wiki/Fortune%27s_algorithm
//!
//! ```no_run
//! use voronoi_fortune::DiagramConfig;
//!
//! let mut diagram = DiagramConfig::new().with_regions(100).with_seed(3).build().unwrap();
//! diagram.add_random_site().unwrap();
//!
//! for segment in diagram.segments() {
//!     println!("{}", segment);
//! }
//! ```

mod config;
mod diagram;
mod edge;
mod error;
mod event_queue;
mod geometry;
mod logger;
mod voronoi_tree;

pub use ordered_float::FloatIsNan;

pub use crate::config::DiagramConfig;
pub use crate::diagram::{random_site, Diagram};
pub use crate::edge::{Edge, EdgeId};
pub use crate::error::DiagramError;
pub use crate::geometry::{Line, LineSegment, Point, EPSILON};
pub use crate::logger::{DiscardLogger, PrintlnLogger, SweepLogMessage, SweepLogger};
