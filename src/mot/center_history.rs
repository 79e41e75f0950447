use std::collections::VecDeque;

use crate::utils::Point;

/// Number of most recent centers a track keeps
pub const HISTORY_DEPTH: usize = 5;

/// Bounded history of object centers, oldest first.
/// Pushing into a full history drops the oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterHistory {
    deque: VecDeque<Point>,
    capacity: usize,
}

impl CenterHistory {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        let capacity = cap.max(2);
        CenterHistory {
            deque: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn push(&mut self, pt: Point) -> Option<Point> {
        let popped = if self.is_full() {
            self.deque.pop_front()
        } else {
            None
        };
        self.deque.push_back(pt);
        popped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.deque.len() == self.capacity
    }

    #[inline]
    pub fn last(&self) -> Option<&Point> {
        self.deque.back()
    }

    /// Latest motion: second-to-last center -> last center
    #[inline]
    pub fn last_two(&self) -> Option<(Point, Point)> {
        let len = self.deque.len();
        if len < 2 {
            return None;
        }
        Some((self.deque[len - 2], self.deque[len - 1]))
    }

    /// Oldest to newest
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ Point> {
        self.deque.iter()
    }

    /// Last `n` entries, oldest to newest
    #[inline]
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &'_ Point> {
        self.deque.iter().skip(self.deque.len().saturating_sub(n))
    }
}

impl Default for CenterHistory {
    fn default() -> Self {
        CenterHistory::with_capacity(HISTORY_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_push() {
        let mut history = CenterHistory::default();
        for i in 0..7 {
            history.push(Point::new(i as f32, 0.0));
        }
        assert_eq!(history.len(), HISTORY_DEPTH);
        assert!(history.is_full());
        let xs: Vec<f32> = history.iter().map(|pt| pt.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(history.push(Point::new(7.0, 0.0)), Some(Point::new(2.0, 0.0)));
    }

    #[test]
    fn test_last_two_and_tail() {
        let mut history = CenterHistory::default();
        assert!(history.last_two().is_none());
        history.push(Point::new(10.0, 50.0));
        assert!(history.last_two().is_none());
        history.push(Point::new(10.0, 60.0));
        assert_eq!(
            history.last_two(),
            Some((Point::new(10.0, 50.0), Point::new(10.0, 60.0)))
        );
        let tail: Vec<Point> = history.tail(5).copied().collect();
        assert_eq!(tail.len(), 2);
        let tail: Vec<Point> = history.tail(1).copied().collect();
        assert_eq!(tail, vec![Point::new(10.0, 60.0)]);
    }
}
