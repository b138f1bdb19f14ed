//! Local leaderboard
//!
//! Tracks the top 10 runs in a JSON file. Session entities are never
//! persisted; only the final scoreboard line survives a run.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of leaderboard entries to keep
pub const MAX_ENTRIES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Level reached when the run ended
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: u64,
}

/// Leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Would this score make the board?
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < MAX_ENTRIES
            || self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// 1-indexed rank a score would land at, if it qualifies
    pub fn rank_for(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        Some(pos + 1)
    }

    /// Record a finished run; returns the rank achieved, if any
    pub fn submit(&mut self, score: u32, level: u32, timestamp_ms: u64) -> Option<usize> {
        let rank = self.rank_for(score)?;
        self.entries.insert(
            rank - 1,
            ScoreEntry {
                score,
                level,
                timestamp_ms,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Load the leaderboard from a JSON file, empty on any failure
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Leaderboard>(&json) {
                Ok(board) => {
                    log::info!("Loaded {} high scores", board.entries.len());
                    board
                }
                Err(e) => {
                    log::warn!("Ignoring malformed leaderboard file: {e}");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the leaderboard as JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_keeps_descending_order() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit(300, 1, 0), Some(1));
        assert_eq!(board.submit(900, 2, 1), Some(1));
        assert_eq!(board.submit(500, 1, 2), Some(2));
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 500, 300]);
    }

    #[test]
    fn test_board_truncates_to_max() {
        let mut board = Leaderboard::new();
        for i in 1..=15u32 {
            board.submit(i * 100, 1, u64::from(i));
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(1500));
        // 600 is now the floor; an equal score doesn't qualify
        assert!(!board.qualifies(600));
        assert!(board.qualifies(601));
    }

    #[test]
    fn test_zero_score_never_qualifies() {
        let mut board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert_eq!(board.submit(0, 1, 0), None);
    }
}
