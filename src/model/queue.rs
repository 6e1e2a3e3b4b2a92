//! Play queue: an ordered track list with a head pointer

use super::library::Track;

#[derive(Clone, Debug, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    head: Option<usize>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue and point the head at `head`.
    ///
    /// Leaves the queue untouched and returns `None` when `head` does not
    /// name an entry of `tracks`.
    pub fn replace(&mut self, tracks: Vec<Track>, head: usize) -> Option<&Track> {
        if head >= tracks.len() {
            tracing::warn!(head, len = tracks.len(), "Queue head out of range, keeping current queue");
            return None;
        }
        self.tracks = tracks;
        self.head = Some(head);
        self.current()
    }

    pub fn current(&self) -> Option<&Track> {
        self.head.and_then(|i| self.tracks.get(i))
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.head == Some(0)
    }

    pub fn is_last(&self) -> bool {
        matches!(self.head, Some(i) if i + 1 == self.tracks.len())
    }

    /// Move the head to the next entry and return it. No-op at the last entry.
    pub fn advance(&mut self) -> Option<&Track> {
        let next = self.head.map(|i| i + 1).filter(|&i| i < self.tracks.len())?;
        self.head = Some(next);
        self.current()
    }

    /// Move the head to the previous entry and return it. No-op at the first entry.
    pub fn retreat(&mut self) -> Option<&Track> {
        let prev = self.head.and_then(|i| i.checked_sub(1))?;
        self.head = Some(prev);
        self.current()
    }

    pub fn peek_next(&self) -> Option<&Track> {
        self.head.and_then(|i| self.tracks.get(i + 1))
    }
}
