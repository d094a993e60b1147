use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;

use crate::geometry::Point;
use crate::voronoi_tree::ArcId;

/// Stable handle to an event in the queue.
///
/// The generation changes every time the slot is reused, so a handle kept
/// around after its event was popped never touches a newer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventId {
    slot: usize,
    generation: u32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    /// The sweepline is passing the site at this index of the site list.
    Site { index: usize },

    /// The arc collapses into a single point when the sweepline gets here.
    Circle { arc: ArcId }
}

/// An event to be processed in Fortune's Algorithm.
#[derive(Clone, Copy, Debug)]
pub struct Event {
    /// The point the event is sorted by. For circle events this is the lowest
    /// point of the circle, straight below the predicted vertex.
    pub site: Point,
    pub kind: EventKind,
    /// Cleared when the event is superseded. Invalid events stay queued and are
    /// skipped once popped.
    pub is_valid: bool
}

impl Event {
    pub fn site(site: Point, index: usize) -> Event {
        Event { site, kind: EventKind::Site { index }, is_valid: true }
    }

    pub fn circle(bottom: Point, arc: ArcId) -> Event {
        Event { site: bottom, kind: EventKind::Circle { arc }, is_valid: true }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    event: Option<Event>
}

/// Heap entry. Lowest `y` first. Among equal `y`, site events on exactly the
/// same line go left to right, everything else first-in first-out.
#[derive(Debug)]
struct Queued {
    key: Point,
    /// Set for site events only.
    site_x: Option<f64>,
    sequence: u64,
    id: EventId
}

impl Queued {
    fn level_order(&self, other: &Queued) -> Ordering {
        match (self.site_x, other.site_x) {
            (Some(x), Some(other_x)) if self.key.y == other.key.y => x.partial_cmp(&other_x).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal
        }
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed, as BinaryHeap is a max-heap.
        other
            .key
            .compare(&self.key)
            .then_with(|| other.level_order(self))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of events with lazy cancellation.
///
/// Events live in an arena of slots. Cancelling flips the event's validity in
/// place rather than pulling it out of the heap.
#[derive(Debug, Default)]
pub struct EventQueue {
    slots: Vec<Slot>,
    free: Vec<usize>,
    heap: BinaryHeap<Queued>,
    sequence: u64
}

impl EventQueue {
    pub fn new() -> EventQueue {
        EventQueue::default()
    }

    /// A queue holding one site event per site.
    pub fn from_sites(sites: &[Point]) -> EventQueue {
        let mut queue = EventQueue::new();

        for (index, &site) in sites.iter().enumerate() {
            queue.insert(Event::site(site, index));
        }

        queue
    }

    pub fn insert(&mut self, event: Event) -> EventId {
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot].event = Some(event);
                EventId { slot, generation: self.slots[slot].generation }
            },
            None => {
                self.slots.push(Slot { generation: 0, event: Some(event) });
                EventId { slot: self.slots.len() - 1, generation: 0 }
            }
        };

        let site_x = match event.kind {
            EventKind::Site { .. } => Some(event.site.x),
            EventKind::Circle { .. } => None
        };

        self.heap.push(Queued { key: event.site, site_x, sequence: self.sequence, id });
        self.sequence += 1;

        id
    }

    /// Remove the lowest event, valid or not.
    pub fn pop(&mut self) -> Option<Event> {
        let Queued { id, .. } = self.heap.pop()?;
        let slot = &mut self.slots[id.slot];
        let event = slot.event.take();

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot);

        event
    }

    #[cfg(test)]
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.slots
            .get(id.slot)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.event.as_ref())
    }

    /// Mark the event as superseded. Returns whether a queued event was hit.
    pub fn invalidate(&mut self, id: EventId) -> bool {
        match self.slots.get_mut(id.slot) {
            Some(slot) if slot.generation == id.generation => match slot.event {
                Some(ref mut event) => {
                    event.is_valid = false;
                    true
                },
                None => false
            },
            _ => false
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
