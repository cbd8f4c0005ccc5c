//! Bounded window of recently matched lines

use std::collections::VecDeque;

/// The most recent matching lines, oldest first.
///
/// Holds at most `capacity` lines; pushing onto a full buffer evicts the
/// oldest entry. A zero-capacity buffer never stores anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl ContextBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, evicting the oldest one if the buffer is full
    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Snapshot the buffered lines in original order
    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_below_capacity() {
        let mut buf = ContextBuffer::new(3);
        buf.push("a");
        buf.push("b");

        assert_eq!(buf.to_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut buf = ContextBuffer::new(2);
        for line in ["a", "b", "c", "d"] {
            buf.push(line);
        }

        assert_eq!(buf.to_vec(), vec!["c", "d"]);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut buf = ContextBuffer::new(0);
        buf.push("a");
        buf.push("b");

        assert!(buf.to_vec().is_empty());
    }
}
