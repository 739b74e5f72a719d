//! Line commands understood by the interactive host.

use thiserror::Error;

/// One host event, read from a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the input text (`type <text>`).
    Type(String),
    Focus,
    Blur,
    /// Commit free text without a pick (`commit <text>`).
    Commit(String),
    /// Pick the n-th suggestion, 1-based (`pick <n>`).
    Pick(usize),
    /// Mouse-down on the toggle.
    Press,
    /// Click on the toggle.
    Click,
    /// Press followed by click.
    Toggle,
    /// Wait for the option fetch to finish.
    Wait,
    /// Print the field markup.
    Show,
    /// Print input text, value and load state.
    State,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("`pick` needs a suggestion number starting at 1, got {0:?}")]
    BadIndex(String),
}

pub const HELP: &str = "\
commands:
  type <text>    set the input text (searches when it changed)
  focus | blur   focus or blur the input (blur commits edited text)
  commit <text>  reconcile free text against option values
  pick <n>       pick the n-th suggestion
  press | click  mouse-down / click on the toggle
  toggle         press then click
  wait           wait for the options to load
  show | state   print markup / field state
  quit";

impl Command {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        let command = match word {
            "type" => Command::Type(rest.to_string()),
            "focus" => Command::Focus,
            "blur" => Command::Blur,
            "commit" => Command::Commit(rest.to_string()),
            "pick" => {
                let n: usize = rest
                    .trim()
                    .parse()
                    .map_err(|_| ParseError::BadIndex(rest.to_string()))?;
                if n == 0 {
                    return Err(ParseError::BadIndex(rest.to_string()));
                }
                Command::Pick(n - 1)
            }
            "press" => Command::Press,
            "click" => Command::Click,
            "toggle" => Command::Toggle,
            "wait" => Command::Wait,
            "show" => Command::Show,
            "state" => Command::State,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("type 2.0 (open)\n"),
            Ok(Some(Command::Type("2.0 (open)".into())))
        );
        assert_eq!(Command::parse("type"), Ok(Some(Command::Type(String::new()))));
    }

    #[test]
    fn test_pick_is_one_based() {
        assert_eq!(Command::parse("pick 1"), Ok(Some(Command::Pick(0))));
        assert_eq!(
            Command::parse("pick 0"),
            Err(ParseError::BadIndex("0".into()))
        );
        assert_eq!(
            Command::parse("pick x"),
            Err(ParseError::BadIndex("x".into()))
        );
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(
            Command::parse("dance"),
            Err(ParseError::Unknown("dance".into()))
        );
    }

    #[test]
    fn test_simple_words() {
        assert_eq!(Command::parse("toggle"), Ok(Some(Command::Toggle)));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("  blur  "), Ok(Some(Command::Blur)));
    }
}
