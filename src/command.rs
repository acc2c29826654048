//! Interactive client commands.
//!
//! This module defines the [`Command`] enum, the commands a user can type at
//! the `dictum` prompt, and their parsing from a raw input line. Arguments are
//! split with the same atom rules the server uses, so quoted phrases work:
//!
//! # Example
//! ```rust
//! use dictum::Command;
//!
//! let cmd = Command::try_from(r#"define "ice cream" wn"#).unwrap();
//! assert_eq!(
//!     cmd,
//!     Command::Define {
//!         word: "ice cream".to_string(),
//!         database: Some("wn".to_string()),
//!     }
//! );
//! ```
use thiserror::Error;

use crate::atoms::split_atoms;

/// List of possible error that parsing a command can throw.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    #[error("invalid '{command}' command, {reason}")]
    InvalidCommandArguments { command: String, reason: String },

    #[error("no command provided")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `databases`: list the server's databases.
    Databases,
    /// `strategies`: list the server's matching strategies.
    Strategies,
    /// `define <word> [database]`
    Define {
        word: String,
        database: Option<String>,
    },
    /// `match <word> [strategy] [database]`
    Match {
        word: String,
        strategy: Option<String>,
        database: Option<String>,
    },
    /// `.exit`: close the session and quit.
    Exit,
}

impl TryFrom<&str> for Command {
    type Error = CommandError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parts = split_atoms(value).into_iter();
        let Some(name) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let args = parts.collect::<Vec<String>>();

        let arity = |max: usize, usage: &str| {
            if args.is_empty() || args.len() > max {
                Err(CommandError::InvalidCommandArguments {
                    command: name.clone(),
                    reason: format!("usage: {usage}"),
                })
            } else {
                Ok(())
            }
        };

        match name.to_lowercase().as_str() {
            ".exit" | "quit" => Ok(Command::Exit),
            "databases" | "db" => Ok(Command::Databases),
            "strategies" | "strat" => Ok(Command::Strategies),
            "define" => {
                arity(2, "define <word> [database]")?;
                Ok(Command::Define {
                    word: args[0].clone(),
                    database: args.get(1).cloned(),
                })
            }
            "match" => {
                arity(3, "match <word> [strategy] [database]")?;
                Ok(Command::Match {
                    word: args[0].clone(),
                    strategy: args.get(1).cloned(),
                    database: args.get(2).cloned(),
                })
            }
            _ => Err(CommandError::UnrecognizedCommand(value.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_from_string() {
        let inputs = vec![
            (".exit", Command::Exit),
            ("databases", Command::Databases),
            ("STRAT", Command::Strategies),
            (
                "define cat",
                Command::Define {
                    word: "cat".to_string(),
                    database: None,
                },
            ),
            (
                "match cat prefix *",
                Command::Match {
                    word: "cat".to_string(),
                    strategy: Some("prefix".to_string()),
                    database: Some("*".to_string()),
                },
            ),
        ];

        for (cmd, expected) in inputs {
            let command = Command::try_from(cmd).unwrap();
            assert_eq!(command, expected);
        }
    }

    #[test]
    fn empty_command() {
        assert_eq!(Command::try_from("   "), Err(CommandError::Empty));
    }

    #[test]
    #[should_panic(expected = "usage: define <word> [database]")]
    fn define_without_word() {
        Command::try_from("define").unwrap();
    }

    #[test]
    #[should_panic(expected = "InvalidCommandArguments")]
    fn match_with_too_many_arguments() {
        Command::try_from("match a b c d").unwrap();
    }

    #[test]
    fn unrecognized_command() {
        assert_eq!(
            Command::try_from("lookup cat"),
            Err(CommandError::UnrecognizedCommand("lookup cat".to_string()))
        );
    }
}
