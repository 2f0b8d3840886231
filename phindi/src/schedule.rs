//! Pending timed transitions owned by a single entity.
//!
//! A [`Schedule`] replaces free-floating timers: every deferred transition of
//! a call session or a conversation lives in its owner's schedule, is fired by
//! the owner's `advance(now)` and is dropped together with the owner.

use std::time::Instant;

#[derive(Debug)]
struct Entry<E> {
    due: Instant,
    seq: u64,
    event: E,
}

#[derive(Debug)]
pub struct Schedule<E> {
    entries: Vec<Entry<E>>,
    next_seq: u64,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Schedule<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue `event` to fire at `due`. Events with equal due instants fire in
    /// the order they were scheduled.
    pub fn schedule(&mut self, due: Instant, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due, seq, event });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending due instant.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Remove and return the earliest event due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, E)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)?;
        let entry = self.entries.swap_remove(index);
        Some((entry.due, entry.event))
    }

    /// Cancel every pending event matching `predicate`, returning how many
    /// were dropped.
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&E) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(&entry.event));
        before - self.entries.len()
    }

    /// Cancel everything.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().map(|entry| &entry.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pop_due_in_time_order() {
        let t0 = Instant::now();
        let mut schedule = Schedule::new();
        schedule.schedule(t0 + Duration::from_secs(3), "c");
        schedule.schedule(t0 + Duration::from_secs(1), "a");
        schedule.schedule(t0 + Duration::from_secs(2), "b");

        let now = t0 + Duration::from_secs(5);
        let order: Vec<_> = std::iter::from_fn(|| schedule.pop_due(now))
            .map(|(_, event)| event)
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let t0 = Instant::now();
        let due = t0 + Duration::from_secs(1);
        let mut schedule = Schedule::new();
        schedule.schedule(due, 1);
        schedule.schedule(due, 2);
        schedule.schedule(due, 3);

        assert_eq!(schedule.pop_due(due).map(|(_, e)| e), Some(1));
        assert_eq!(schedule.pop_due(due).map(|(_, e)| e), Some(2));
        assert_eq!(schedule.pop_due(due).map(|(_, e)| e), Some(3));
    }

    #[test]
    fn test_nothing_fires_early() {
        let t0 = Instant::now();
        let mut schedule = Schedule::new();
        schedule.schedule(t0 + Duration::from_millis(500), ());
        assert!(schedule.pop_due(t0).is_none());
        assert_eq!(schedule.next_due(), Some(t0 + Duration::from_millis(500)));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_cancel_where_and_clear() {
        let t0 = Instant::now();
        let mut schedule = Schedule::new();
        for i in 0..6 {
            schedule.schedule(t0 + Duration::from_secs(i), i);
        }
        assert_eq!(schedule.cancel_where(|e| e % 2 == 0), 3);
        assert_eq!(schedule.iter().copied().collect::<Vec<_>>().len(), 3);
        assert_eq!(schedule.clear(), 3);
        assert!(schedule.next_due().is_none());
    }
}
