//! Operator console input parsing

use shared::Command;

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    /// Send a state-mutation command to the server.
    Issue(Command),
    /// Store the current score in the match history, then reset the board.
    FinishMatch,
    /// List stored results, newest first.
    ShowHistory,
    /// Delete one stored result.
    DeleteMatch(i64),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  home+ home-           adjust the home score
  away+ away-           adjust the away score
  reset-scores          set both scores to zero
  start stop            control the match clock
  reset-timer           stop the clock and restore the full duration
  sec+ sec- min+ min-   adjust the remaining time
  teams <home> <away>   rename both teams
  finish                store the result and reset for the next match
  history               list stored results (newest first)
  delete <id>           delete a stored result
  help                  show this text
  quit                  exit";

/// Parses one console line. Returns `None` for anything unrecognized,
/// including missing or malformed arguments.
pub fn parse_line(line: &str) -> Option<ConsoleAction> {
    let mut parts = line.split_whitespace();
    let keyword = parts.next()?;

    let action = match keyword {
        "home+" => ConsoleAction::Issue(Command::IncreaseHomeScore),
        "home-" => ConsoleAction::Issue(Command::DecreaseHomeScore),
        "away+" => ConsoleAction::Issue(Command::IncreaseAwayScore),
        "away-" => ConsoleAction::Issue(Command::DecreaseAwayScore),
        "reset-scores" => ConsoleAction::Issue(Command::ResetScores),
        "start" => ConsoleAction::Issue(Command::StartTimer),
        "stop" => ConsoleAction::Issue(Command::StopTimer),
        "reset-timer" => ConsoleAction::Issue(Command::ResetTimer),
        "sec+" => ConsoleAction::Issue(Command::AddSecond),
        "sec-" => ConsoleAction::Issue(Command::SubtractSecond),
        "min+" => ConsoleAction::Issue(Command::AddMinute),
        "min-" => ConsoleAction::Issue(Command::SubtractMinute),
        "teams" => {
            let home = parts.next()?;
            let away = parts.next()?;
            ConsoleAction::Issue(Command::UpdateTeamNames {
                home: home.to_string(),
                away: away.to_string(),
            })
        }
        "finish" => ConsoleAction::FinishMatch,
        "history" => ConsoleAction::ShowHistory,
        "delete" => {
            let id = parts.next()?.parse().ok()?;
            ConsoleAction::DeleteMatch(id)
        }
        "help" => ConsoleAction::Help,
        "quit" | "exit" => ConsoleAction::Quit,
        _ => return None,
    };

    Some(action)
}
