//! Authoritative scoreboard state and command processing

use log::info;
use shared::{Command, Snapshot, DEFAULT_AWAY_TEAM_NAME, DEFAULT_HOME_TEAM_NAME};

/// The single authoritative scoreboard record.
///
/// One instance exists per process, owned exclusively by the event loop; all
/// mutation goes through [`apply`](ScoreboardState::apply) or
/// [`tick_second`](ScoreboardState::tick_second), so no field is ever observed
/// mid-mutation.
#[derive(Debug, Clone)]
pub struct ScoreboardState {
    home_score: u32,
    away_score: u32,
    remaining_seconds: u32,
    running: bool,
    home_team_name: String,
    away_team_name: String,
    /// Duration `reset_timer` restores, configured at startup.
    match_duration_secs: u32,
}

impl ScoreboardState {
    pub fn new(match_duration_secs: u32) -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            remaining_seconds: match_duration_secs,
            running: false,
            home_team_name: DEFAULT_HOME_TEAM_NAME.to_string(),
            away_team_name: DEFAULT_AWAY_TEAM_NAME.to_string(),
            match_duration_secs,
        }
    }

    /// Applies one command, one complete turn. Out-of-range mutations are
    /// silent no-ops rather than errors; every accepted command still yields
    /// a fresh snapshot for broadcast.
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::IncreaseHomeScore => self.increase_home_score(),
            Command::IncreaseAwayScore => self.increase_away_score(),
            Command::DecreaseHomeScore => self.decrease_home_score(),
            Command::DecreaseAwayScore => self.decrease_away_score(),
            Command::ResetScores => self.reset_scores(),
            Command::StartTimer => self.start_timer(),
            Command::StopTimer => self.stop_timer(),
            Command::ResetTimer => self.reset_timer(),
            Command::AddSecond => self.add_second(),
            Command::SubtractSecond => self.subtract_second(),
            Command::AddMinute => self.add_minute(),
            Command::SubtractMinute => self.subtract_minute(),
            Command::UpdateTeamNames { home, away } => self.update_team_names(home, away),
        }
    }

    fn increase_home_score(&mut self) {
        self.home_score += 1;
    }

    fn increase_away_score(&mut self) {
        self.away_score += 1;
    }

    fn decrease_home_score(&mut self) {
        if self.home_score > 0 {
            self.home_score -= 1;
        }
    }

    fn decrease_away_score(&mut self) {
        if self.away_score > 0 {
            self.away_score -= 1;
        }
    }

    fn reset_scores(&mut self) {
        self.home_score = 0;
        self.away_score = 0;
    }

    /// Starting an already-running timer only re-affirms `running`. Starting
    /// with no time left is a no-op; `reset_timer` must be issued first.
    fn start_timer(&mut self) {
        if self.remaining_seconds > 0 {
            self.running = true;
        }
    }

    fn stop_timer(&mut self) {
        self.running = false;
    }

    fn reset_timer(&mut self) {
        self.running = false;
        self.remaining_seconds = self.match_duration_secs;
        info!("Timer reset to {} seconds", self.match_duration_secs);
    }

    fn add_second(&mut self) {
        self.remaining_seconds += 1;
    }

    fn subtract_second(&mut self) {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
    }

    fn add_minute(&mut self) {
        self.remaining_seconds += 60;
    }

    /// Refuses (rather than clamps) when fewer than 60 seconds remain.
    fn subtract_minute(&mut self) {
        if self.remaining_seconds >= 60 {
            self.remaining_seconds -= 60;
        }
    }

    fn update_team_names(&mut self, home: &str, away: &str) {
        info!("Team names updated to {} / {}", home, away);
        self.home_team_name = home.to_string();
        self.away_team_name = away.to_string();
    }

    /// One clock fire: burns one second off the remaining time. The clock
    /// guards liveness before calling this, so the subtraction saturating at
    /// zero is never observed in practice.
    pub fn tick_second(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Full post-mutation snapshot for broadcast.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            home_score: self.home_score,
            away_score: self.away_score,
            time: self.remaining_seconds,
            is_active: self.running,
            home_team_name: self.home_team_name.clone(),
            away_team_name: self.away_team_name.clone(),
        }
    }
}
