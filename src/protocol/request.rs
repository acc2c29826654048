use std::fmt;

/// A single command line sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ShowDatabases,
    ShowStrategies,
    Define {
        database: String,
        word: String,
    },
    Match {
        database: String,
        strategy: String,
        word: String,
    },
    Quit,
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::ShowDatabases => write!(f, "SHOW DB"),
            Request::ShowStrategies => write!(f, "SHOW STRAT"),
            Request::Define { database, word } => {
                write!(f, "DEFINE {database} {}", quote(word))
            }
            Request::Match {
                database,
                strategy,
                word,
            } => write!(f, "MATCH {database} {strategy} {}", quote(word)),
            Request::Quit => write!(f, "QUIT"),
        }
    }
}

fn quote(word: &str) -> String {
    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('"');
    for c in word.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
