pub mod atoms;
pub mod cli;
pub mod command;
pub mod connection;
pub mod error;
pub mod model;
pub mod protocol;

pub use cli::{CliError, Defaults, execute, prompt};
pub use command::{Command, CommandError};
pub use connection::{DEFAULT_PORT, DictionaryConnection};
pub use error::DictError;
pub use model::{Database, Definition, MatchingStrategy};
