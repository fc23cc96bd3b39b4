use serde::{Deserialize, Serialize};

pub const DEFAULT_MATCH_DURATION_SECS: u32 = 7 * 60;
pub const DEFAULT_HOME_TEAM_NAME: &str = "HomeTeam";
pub const DEFAULT_AWAY_TEAM_NAME: &str = "AwayTeam";

/// Operator commands accepted by the server.
///
/// On the wire each command is a JSON object tagged by `command`, with an
/// optional `payload` for the commands that carry data:
/// `{"command":"increase_home_score"}` or
/// `{"command":"update_team_names","payload":{"home":"A","away":"B"}}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "command", content = "payload", rename_all = "snake_case")]
pub enum Command {
    IncreaseHomeScore,
    IncreaseAwayScore,
    DecreaseHomeScore,
    DecreaseAwayScore,
    ResetScores,
    StartTimer,
    StopTimer,
    ResetTimer,
    AddSecond,
    SubtractSecond,
    AddMinute,
    SubtractMinute,
    UpdateTeamNames { home: String, away: String },
}

/// Messages pushed from the server to every observer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full post-mutation snapshot; sent on connect and after every change.
    StateSync(Snapshot),
}

/// Complete scoreboard state as observers see it. Always carries every field,
/// including `isActive`; observers never have to merge partial updates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub home_score: u32,
    pub away_score: u32,
    /// Remaining match time in seconds.
    pub time: u32,
    pub is_active: bool,
    pub home_team_name: String,
    pub away_team_name: String,
}
