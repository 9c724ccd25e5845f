use crate::game_state::chess_rules::POSITION_HISTORY_WINDOW;

/// Fixed-size ring of recent position fingerprints.
///
/// Only the newest `POSITION_HISTORY_WINDOW` entries survive; pushing onto a
/// full ring evicts the oldest one. The ring is `Copy`, so trial boards carry
/// their own history without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionHistory {
    entries: [u64; POSITION_HISTORY_WINDOW],
    start: usize,
    len: usize,
}

impl Default for PositionHistory {
    fn default() -> Self {
        Self {
            entries: [0; POSITION_HISTORY_WINDOW],
            start: 0,
            len: 0,
        }
    }
}

impl PositionHistory {
    pub fn push(&mut self, fingerprint: u64) {
        if self.len < POSITION_HISTORY_WINDOW {
            let slot = (self.start + self.len) % POSITION_HISTORY_WINDOW;
            self.entries[slot] = fingerprint;
            self.len += 1;
        } else {
            self.entries[self.start] = fingerprint;
            self.start = (self.start + 1) % POSITION_HISTORY_WINDOW;
        }
    }

    /// Oldest-to-newest iteration over the retained fingerprints.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len).map(move |i| self.entries[(self.start + i) % POSITION_HISTORY_WINDOW])
    }

    pub fn count(&self, fingerprint: u64) -> usize {
        self.iter().filter(|&fp| fp == fingerprint).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::PositionHistory;
    use crate::game_state::chess_rules::POSITION_HISTORY_WINDOW;

    #[test]
    fn ring_evicts_oldest_entries_past_the_window() {
        let mut history = PositionHistory::default();
        for fp in 0..(POSITION_HISTORY_WINDOW as u64 + 3) {
            history.push(fp);
        }

        assert_eq!(history.len(), POSITION_HISTORY_WINDOW);
        assert_eq!(history.iter().next(), Some(3));
        assert_eq!(history.iter().last(), Some(POSITION_HISTORY_WINDOW as u64 + 2));
        assert_eq!(history.count(0), 0);
    }

    #[test]
    fn count_tracks_repeated_fingerprints() {
        let mut history = PositionHistory::default();
        assert!(history.is_empty());
        for fp in [7, 1, 7, 2, 7] {
            history.push(fp);
        }
        assert_eq!(history.count(7), 3);
        assert_eq!(history.count(2), 1);
    }
}
