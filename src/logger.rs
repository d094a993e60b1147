use std::fmt;

use crate::geometry::Point;

#[derive(Debug)]
pub enum SweepLogMessage<'a> {
    /// A full pass over the current sites is starting.
    Reset(&'a [Point]),
    SiteEvent(&'a Point),
    /// A circle event was queued at the given lowest point of its circle.
    CircleScheduled(&'a Point),
    /// An arc disappeared, closing a vertex.
    CircleEvent { vertex: &'a Point },
    /// A superseded circle event was popped and ignored.
    StaleCircleSkipped(&'a Point),
    Finished { edges: usize }
}

impl<'a> fmt::Display for SweepLogMessage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SweepLogMessage::Reset(sites) => {
                write!(f, "Resetting with {} sites.\n    {}", sites.len(), itertools::join(sites, "\n    "))
            },
            SweepLogMessage::SiteEvent(site) => write!(f, "Site event at {}.", site),
            SweepLogMessage::CircleScheduled(bottom) => write!(f, "Circle event scheduled at {}.", bottom),
            SweepLogMessage::CircleEvent { vertex } => write!(f, "Circle event closed vertex {}.", vertex),
            SweepLogMessage::StaleCircleSkipped(bottom) => write!(f, "Skipped stale circle event at {}.", bottom),
            SweepLogMessage::Finished { edges } => write!(f, "Finished with {} edges.", edges)
        }
    }
}

/// Logger trait for the sweep.
pub trait SweepLogger {
    /// The function that gets a SweepLogMessage and does the actual logging.
    fn log(&mut self, message: SweepLogMessage);
}

#[derive(Debug, Default)]
pub struct DiscardLogger;

impl SweepLogger for DiscardLogger {
    fn log(&mut self, _message: SweepLogMessage) {}
}

#[derive(Debug, Default)]
pub struct PrintlnLogger;

impl SweepLogger for PrintlnLogger {
    fn log(&mut self, message: SweepLogMessage) {
        println!("{}", message);
    }
}
