use std::collections::HashMap;

use shared::Identity;
use slotmap::SlotMap;

use super::snake::{Snake, SnakeKey};

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub identity: Identity,
    pub name: String,
    pub color: usize,
    pub score: u64,
    pub alive: bool,
}

#[derive(Debug, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    live_count: usize,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks every snake by score. Ties keep the previous ranking and newcomers
    /// go after in arena order.
    pub fn recompute(&mut self, snakes: &SlotMap<SnakeKey, Snake>) {
        let previous: HashMap<&Identity, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (&entry.identity, i))
            .collect();

        let mut ranked: Vec<&Snake> = snakes.values().collect();
        ranked.sort_by_key(|snake| previous.get(&snake.identity).copied().unwrap_or(usize::MAX));
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        let entries = ranked
            .into_iter()
            .enumerate()
            .map(|(i, snake)| LeaderboardEntry {
                rank: i + 1,
                identity: snake.identity.clone(),
                name: snake.name.clone(),
                color: snake.color,
                score: snake.score,
                alive: snake.alive,
            })
            .collect();

        self.live_count = snakes.values().filter(|snake| snake.alive).count();
        self.entries = entries;
    }

    pub fn top(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.live_count = 0;
    }
}
