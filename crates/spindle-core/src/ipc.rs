//! Line-based control protocol spoken over the spindle unix socket.

use std::fmt;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/spindle.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Hide,
    Next,
    Previous,
    /// Jump to an item; out-of-range indices wrap.
    Goto(i64),
    Reload,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'goto' needs an index")]
    MissingIndex,
    #[error("Invalid index '{0}'")]
    InvalidIndex(String),
    #[error("Unexpected argument '{0}'")]
    TrailingArgument(String),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("Failed to connect to spindle at {path}: {source}. Is spindle running?")]
    Connect {
        path: &'static str,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let command = match name.as_str() {
            "show" => Self::Show,
            "hide" => Self::Hide,
            "next" => Self::Next,
            "prev" | "previous" => Self::Previous,
            "reload" => Self::Reload,
            "goto" => {
                let arg = words.next().ok_or(CommandError::MissingIndex)?;
                let index = arg
                    .parse()
                    .map_err(|_| CommandError::InvalidIndex(arg.to_string()))?;
                Self::Goto(index)
            }
            _ => return Err(CommandError::Unknown(name)),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => f.write_str("show"),
            Self::Hide => f.write_str("hide"),
            Self::Next => f.write_str("next"),
            Self::Previous => f.write_str("prev"),
            Self::Goto(index) => write!(f, "goto {index}"),
            Self::Reload => f.write_str("reload"),
        }
    }
}

pub fn send(command: Command) -> Result<(), SendError> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|source| SendError::Connect {
        path: SOCKET_PATH,
        source,
    })?;

    writeln!(stream, "{command}")?;
    Ok(())
}
