//! Bounded per-body history of recent pixel positions.

use std::collections::{HashMap, VecDeque};

use glam::DVec2;

/// Default number of points kept per body.
pub const DEFAULT_TRAIL_CAPACITY: usize = 50;

/// Peak opacity of the newest faded segment.
const FADE_MAX_OPACITY: f64 = 0.8;

/// Faded segments at or below this opacity are dropped.
const FADE_MIN_OPACITY: f64 = 0.01;

/// Opacity of an unfaded trail polyline.
pub const SOLID_TRAIL_OPACITY: f64 = 0.6;

/// One segment of a faded trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSegment {
    /// Older endpoint.
    pub from: DVec2,
    /// Newer endpoint.
    pub to: DVec2,
    /// Opacity in `(0.01, 0.8)`, growing toward the newest segment.
    pub opacity: f64,
}

/// FIFO point buffers keyed by body id.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    capacity: usize,
    trails: HashMap<String, VecDeque<DVec2>>,
}

impl TrailBuffer {
    /// Create an empty buffer. `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            trails: HashMap::new(),
        }
    }

    /// Points kept per body.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a point, evicting the oldest one when full.
    pub fn push(&mut self, body_id: &str, point: DVec2) {
        let capacity = self.capacity;
        let trail = self
            .trails
            .entry(body_id.to_string())
            .or_insert_with(|| VecDeque::with_capacity(capacity));
        if trail.len() == capacity {
            trail.pop_front();
        }
        trail.push_back(point);
    }

    /// Empty one body's trail, or all trails when `body_id` is `None`.
    pub fn clear(&mut self, body_id: Option<&str>) {
        match body_id {
            Some(id) => {
                if let Some(trail) = self.trails.get_mut(id) {
                    trail.clear();
                }
            }
            None => self.trails.values_mut().for_each(VecDeque::clear),
        }
    }

    /// Points for `body_id`, oldest first. Unknown ids yield an empty iterator.
    pub fn points(&self, body_id: &str) -> impl Iterator<Item = DVec2> + '_ {
        self.trails.get(body_id).into_iter().flatten().copied()
    }

    /// Number of points stored for `body_id`.
    pub fn len(&self, body_id: &str) -> usize {
        self.trails.get(body_id).map_or(0, VecDeque::len)
    }

    /// True when no body has any point.
    pub fn is_empty(&self) -> bool {
        self.trails.values().all(VecDeque::is_empty)
    }

    /// Segments with opacity rising from oldest to newest. Trails shorter
    /// than two points produce nothing.
    pub fn faded_segments(&self, body_id: &str) -> Vec<TrailSegment> {
        let Some(trail) = self.trails.get(body_id) else {
            return Vec::new();
        };
        let n = trail.len() as f64;
        trail
            .iter()
            .zip(trail.iter().skip(1))
            .enumerate()
            .filter_map(|(i, (&from, &to))| {
                let opacity = (i as f64 / n) * FADE_MAX_OPACITY;
                (opacity > FADE_MIN_OPACITY).then_some(TrailSegment { from, to, opacity })
            })
            .collect()
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: usize) -> DVec2 {
        DVec2::new(i as f64, -(i as f64))
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut trails = TrailBuffer::default();
        let cap = trails.capacity();
        for i in 0..cap + 5 {
            trails.push("earth", p(i));
        }
        let points: Vec<_> = trails.points("earth").collect();
        assert_eq!(points.len(), cap);
        assert_eq!(points[0], p(5));
        assert_eq!(*points.last().unwrap(), p(cap + 4));
        assert!(points.windows(2).all(|w| w[1].x == w[0].x + 1.0));
    }

    #[test]
    fn test_trails_are_independent() {
        let mut trails = TrailBuffer::new(3);
        trails.push("a", p(1));
        trails.push("b", p(2));
        trails.push("b", p(3));
        assert_eq!(trails.len("a"), 1);
        assert_eq!(trails.len("b"), 2);
        assert_eq!(trails.len("missing"), 0);
        assert_eq!(trails.points("missing").count(), 0);
    }

    #[test]
    fn test_clear_one_and_all() {
        let mut trails = TrailBuffer::new(4);
        trails.push("a", p(1));
        trails.push("b", p(2));
        trails.clear(Some("a"));
        assert_eq!(trails.len("a"), 0);
        assert_eq!(trails.len("b"), 1);
        trails.clear(Some("unknown"));
        trails.clear(None);
        assert!(trails.is_empty());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut trails = TrailBuffer::new(0);
        trails.push("a", p(1));
        trails.push("a", p(2));
        assert_eq!(trails.points("a").collect::<Vec<_>>(), vec![p(2)]);
    }

    #[test]
    fn test_faded_segments() {
        let mut trails = TrailBuffer::new(10);
        trails.push("a", p(0));
        assert!(trails.faded_segments("a").is_empty());

        for i in 1..10 {
            trails.push("a", p(i));
        }
        let segments = trails.faded_segments("a");
        // Segment 0 has opacity 0 and is dropped.
        assert_eq!(segments.len(), 8);
        assert_eq!(segments[0].from, p(1));
        assert!((segments[0].opacity - 0.08).abs() < 1e-12);
        let last = segments.last().unwrap();
        assert_eq!(last.to, p(9));
        assert!((last.opacity - 0.64).abs() < 1e-12);
        assert!(segments.windows(2).all(|w| w[0].opacity < w[1].opacity));
    }
}
