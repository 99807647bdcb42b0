use std::time::{Duration, Instant};

use crate::game::GameSession;

/// Play statistics for the lifetime of the process
///
/// Kept in memory only; nothing here survives a restart of the program.
/// Fed by [`GameMetrics::observe`], which reads the current session and
/// books a finished round exactly once.
pub struct GameMetrics {
    round_started: Instant,
    round_time: Duration,
    round_booked: bool,
    pub best_score: usize,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            round_time: Duration::ZERO,
            round_booked: false,
            best_score: 0,
            games_played: 0,
        }
    }

    /// Follow the session: run the clock while it is active, book it once it ends
    pub fn observe(&mut self, session: &GameSession) {
        if session.is_active() {
            self.round_time = self.round_started.elapsed();
            return;
        }

        if !self.round_booked {
            self.round_booked = true;
            self.book_round(session.score());
        }
    }

    fn book_round(&mut self, final_score: usize) {
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// A new session replaced the previous one
    pub fn on_new_session(&mut self) {
        self.round_started = Instant::now();
        self.round_time = Duration::ZERO;
        self.round_booked = false;
    }

    pub fn round_time(&self) -> Duration {
        self.round_time
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.round_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
