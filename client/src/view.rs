//! Text rendering of scoreboard snapshots

use shared::Snapshot;

/// Formats seconds as zero-padded MM:SS.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// One status line per snapshot, e.g.
/// `HomeTeam 2 - 1 AwayTeam  06:57 [running]`.
pub fn render_line(snapshot: &Snapshot) -> String {
    format!(
        "{} {} - {} {}  {} [{}]",
        snapshot.home_team_name,
        snapshot.home_score,
        snapshot.away_score,
        snapshot.away_team_name,
        format_clock(snapshot.time),
        if snapshot.is_active { "running" } else { "stopped" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting_pads_to_two_digits() {
        assert_eq!(format_clock(420), "07:00");
        assert_eq!(format_clock(417), "06:57");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
    }

    #[test]
    fn clock_formatting_handles_long_durations() {
        assert_eq!(format_clock(3661), "61:01");
    }

    #[test]
    fn render_line_includes_every_field() {
        let snapshot = Snapshot {
            home_score: 2,
            away_score: 1,
            time: 417,
            is_active: true,
            home_team_name: "Tigers".to_string(),
            away_team_name: "Sharks".to_string(),
        };

        assert_eq!(render_line(&snapshot), "Tigers 2 - 1 Sharks  06:57 [running]");
    }

    #[test]
    fn render_line_marks_stopped_clock() {
        let snapshot = Snapshot {
            home_score: 0,
            away_score: 0,
            time: 420,
            is_active: false,
            home_team_name: "HomeTeam".to_string(),
            away_team_name: "AwayTeam".to_string(),
        };

        assert!(render_line(&snapshot).ends_with("[stopped]"));
    }
}
