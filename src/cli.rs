//! CLI utilities for dictum.
//!
//! The utilities present in this module drive an interactive session: reading
//! a [`Command`] from the user and printing the server's answer.
use std::io::{self, BufRead, Read, Write};

use thiserror::Error;

use crate::{
    Command, CommandError, DictError, DictionaryConnection,
    model::{Database, MatchingStrategy},
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Dict(#[from] DictError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Database and strategy used when a command leaves them out.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub database: Database,
    pub strategy: MatchingStrategy,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            database: Database::all(),
            strategy: MatchingStrategy::new("prefix", "Match prefixes"),
        }
    }
}

/// Prompt user for a command.
///
/// End of input is treated as [`Command::Exit`].
pub fn prompt<R, W>(mut reader: R, mut writer: W) -> Result<Command, CliError>
where
    R: BufRead,
    W: Write,
{
    let mut s = String::default();
    write!(&mut writer, "> ")?;
    writer.flush()?;

    if reader.read_line(&mut s)? == 0 {
        return Ok(Command::Exit);
    }

    Ok(Command::try_from(s.trim_end())?)
}

/// Run `command` against the session and print the result to `writer`.
///
/// A lookup without results prints a notice rather than failing.
pub fn execute<T, W>(
    conn: &DictionaryConnection<T>,
    command: Command,
    defaults: &Defaults,
    mut writer: W,
) -> Result<(), CliError>
where
    T: Read + Write,
    W: Write,
{
    let database = |name: Option<String>| match name {
        Some(name) => Database::new(name, ""),
        None => defaults.database.clone(),
    };

    let outcome = match command {
        Command::Exit => Ok(()),
        Command::Databases => conn.database_list().map(|databases| {
            databases
                .iter()
                .try_for_each(|db| writeln!(writer, "{db}"))
        })?,
        Command::Strategies => conn.strategy_list().map(|strategies| {
            strategies
                .iter()
                .try_for_each(|strategy| writeln!(writer, "{strategy}"))
        })?,
        Command::Define { word, database: db } => {
            match conn.definitions(&word, &database(db)) {
                Ok(definitions) => definitions.iter().try_for_each(|definition| {
                    writeln!(writer, "@ {}", definition.database())?;
                    writeln!(writer, "{definition}")
                }),
                Err(DictError::NoMatch) => writeln!(writer, "****No definition found****"),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Match {
            word,
            strategy,
            database: db,
        } => {
            let strategy = match strategy {
                Some(name) => MatchingStrategy::new(name, ""),
                None => defaults.strategy.clone(),
            };
            match conn.match_list(&word, &strategy, &database(db)) {
                Ok(words) => words.iter().try_for_each(|w| writeln!(writer, "{w}")),
                Err(DictError::NoMatch) => writeln!(writer, "****No matches found****"),
                Err(e) => return Err(e.into()),
            }
        }
    };

    Ok(outcome?)
}

#[cfg(test)]
mod tests {
    use crate::protocol::MockStream;

    use super::*;

    fn connection(reply: &str) -> DictionaryConnection<MockStream> {
        let reply = format!("220 ready\r\n{reply}");
        DictionaryConnection::open(MockStream::new(&reply)).unwrap()
    }

    #[test]
    fn prompt_prints_correctly() {
        let input = b".exit\n";
        let mut output = Vec::new();

        prompt(&input[..], &mut output).unwrap();

        let output = String::from_utf8(output).expect("not valid UTF-8");
        assert_eq!("> ", output);
    }

    #[test]
    fn prompt_end_of_input_exits() {
        let mut output = Vec::new();

        let res = prompt(&b""[..], &mut output).unwrap();
        assert_eq!(Command::Exit, res);
    }

    #[test]
    #[should_panic(expected = "UnrecognizedCommand")]
    fn prompt_unrecognized_command() {
        let input = b".something_wrong\n";
        let mut output = Vec::new();

        prompt(&input[..], &mut output).unwrap();
    }

    #[test]
    fn execute_match_uses_defaults() {
        let conn = connection("152 2 matches found\r\nwn \"cat\"\r\nwn \"cats\"\r\n.\r\n250 ok\r\n");
        let mut output = Vec::new();

        let command = Command::try_from("match cat").unwrap();
        execute(&conn, command, &Defaults::default(), &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "cat\ncats\n");
    }

    #[test]
    fn execute_define_without_result() {
        let conn = connection("110 1 databases present\r\nwn \"WordNet\"\r\n.\r\n250 ok\r\n552 no match\r\n");
        let mut output = Vec::new();

        let command = Command::try_from("define qwxz wn").unwrap();
        execute(&conn, command, &Defaults::default(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "****No definition found****\n"
        );
    }

    #[test]
    fn execute_lists_databases() {
        let conn = connection("110 1 databases present\r\nwn \"WordNet\"\r\n.\r\n250 ok\r\n");
        let mut output = Vec::new();

        execute(&conn, Command::Databases, &Defaults::default(), &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "wn - WordNet\n");
    }
}
