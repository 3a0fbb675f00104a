use std::str::FromStr;

/// A line typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayCommand {
    Place { piece: usize, row: usize, col: usize },
    Hint,
    Reset,
    Stats,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum ParseCommandError {
    #[display("empty command")]
    Empty,
    #[display("unknown command '{name}'")]
    Unknown { name: String },
    #[display("usage: place <piece> <row> <col>")]
    PlaceUsage,
}

impl FromStr for PlayCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;
        let command = match name.to_ascii_lowercase().as_str() {
            "place" | "p" => {
                let mut number = || -> Result<usize, ParseCommandError> {
                    words
                        .next()
                        .and_then(|w| w.parse().ok())
                        .ok_or(ParseCommandError::PlaceUsage)
                };
                let piece = number()?;
                let row = number()?;
                let col = number()?;
                if words.next().is_some() {
                    return Err(ParseCommandError::PlaceUsage);
                }
                return Ok(Self::Place { piece, row, col });
            }
            "hint" | "h" => Self::Hint,
            "reset" => Self::Reset,
            "stats" | "s" => Self::Stats,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => {
                return Err(ParseCommandError::Unknown {
                    name: name.to_owned(),
                });
            }
        };
        Ok(command)
    }
}
