use thiserror::Error;

/// One line of input in an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Mood(String),
    /// Zero-based track index (users type one-based numbers).
    Play(usize),
    Toggle,
    Resume,
    Next,
    Previous,
    Pause,
    Embed,
    Open(Option<usize>),
    Tracks,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no command given")]
    Empty,
    #[error("unknown command '{0}', try `help`")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a track number (tracks start at 1)")]
    InvalidNumber(String),
}

fn track_number(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidNumber(raw.to_string())),
    }
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<&str> = parts.collect();

        match head.to_lowercase().as_str() {
            "mood" | "m" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument("mood name"))
                } else {
                    Ok(SessionCommand::Mood(rest.join(" ")))
                }
            }
            "play" | "p" => match rest.first() {
                Some(raw) => Ok(SessionCommand::Play(track_number(raw)?)),
                None => Err(CommandError::MissingArgument("track number")),
            },
            "toggle" | "t" => Ok(SessionCommand::Toggle),
            "resume" => Ok(SessionCommand::Resume),
            "next" | "n" => Ok(SessionCommand::Next),
            "prev" | "previous" => Ok(SessionCommand::Previous),
            "pause" => Ok(SessionCommand::Pause),
            "embed" => Ok(SessionCommand::Embed),
            "open" => match rest.first() {
                Some(raw) => Ok(SessionCommand::Open(Some(track_number(raw)?))),
                None => Ok(SessionCommand::Open(None)),
            },
            "tracks" | "ls" => Ok(SessionCommand::Tracks),
            "dismiss" | "x" => Ok(SessionCommand::Dismiss),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
