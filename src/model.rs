//! Records populated from server replies.
//!
//! These are plain values: a [`Database`] and a [`MatchingStrategy`] are read
//! from `SHOW DB` / `SHOW STRAT` listings, a [`Definition`] from a `DEFINE`
//! reply. None of them hold any connection state.
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// A lexical database offered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Database {
    name: String,
    description: String,
}

impl Database {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Special database `*`; the server searches every database.
    pub fn all() -> Self {
        Self::new("*", "All databases")
    }

    /// Special database `!`; the server stops at the first database with a result.
    pub fn first_match() -> Self {
        Self::new("!", "First database with a match")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

/// A word matching algorithm advertised by the server (`prefix`, `exact`, ...).
///
/// Two strategies are equal when their names are equal, so a set of
/// strategies keeps a single entry per name.
#[derive(Debug, Clone, Eq)]
pub struct MatchingStrategy {
    name: String,
    description: String,
}

impl MatchingStrategy {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for MatchingStrategy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for MatchingStrategy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for MatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

/// One definition of a word as returned by a single database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    word: String,
    database: Database,
    body: Vec<String>,
}

impl Definition {
    pub fn new(word: impl Into<String>, database: Database) -> Self {
        Self {
            word: word.into(),
            database,
            body: Vec::new(),
        }
    }

    pub(crate) fn append_line(&mut self, line: String) {
        self.body.push(line);
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Body lines in the order the server sent them.
    pub fn body(&self) -> &[String] {
        &self.body
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body.join("\n"))
    }
}
