//! DICT session engine.
//!
//! A [`DictionaryConnection`] owns one stream to a DICT server and runs every
//! exchange on it to completion: the command is written, the status line is
//! read, and every line the reply declares is consumed before the call
//! returns. A failed lookup (`552`) is reported as [`DictError::NoMatch`] and
//! leaves the stream at a command boundary.
//!
//! # Example
//! ```rust,no_run
//! use dictum::{Database, DictionaryConnection};
//!
//! let conn = DictionaryConnection::connect("dict.org").unwrap();
//! for definition in conn.definitions("cat", &Database::all()).unwrap() {
//!     println!("{}:\n{definition}", definition.database().name());
//! }
//! conn.close();
//! ```
//!
//! # Concurrency
//!
//! Operations take `&self` and are serialized by an internal lock, so a
//! connection may be shared (e.g. behind an `Arc`) but never runs two
//! exchanges at once.
use std::{
    collections::{HashMap, HashSet},
    io::{Read, Write},
    net::TcpStream,
    sync::{Mutex, TryLockError},
};

use log::{debug, info, warn};

use crate::{
    DictError,
    atoms::split_atoms,
    error::Result,
    model::{Database, Definition, MatchingStrategy},
    protocol::{
        ProtocolTransport, Request,
        status::{
            COMMAND_OK, DATABASES_PRESENT, DEFINITION_FOLLOWS, DEFINITIONS_RETRIEVED,
            MATCHES_FOUND, NO_MATCH, SERVER_READY, STRATEGIES_AVAILABLE,
        },
    },
};

/// Well-known DICT port.
pub const DEFAULT_PORT: u16 = 2628;

pub struct DictionaryConnection<T: Read + Write = TcpStream> {
    session: Mutex<Option<Session<T>>>,
}

struct Session<T: Read + Write> {
    transport: ProtocolTransport<T>,
    databases: Directory,
}

/// Database name to record, iterated in order of first appearance.
#[derive(Debug, Default)]
struct Directory {
    entries: Vec<Database>,
    index: HashMap<String, usize>,
}

impl Directory {
    fn insert(&mut self, database: Database) {
        match self.index.get(database.name()) {
            Some(&i) => self.entries[i] = database,
            None => {
                self.index
                    .insert(database.name().to_string(), self.entries.len());
                self.entries.push(database);
            }
        }
    }

    fn get(&self, name: &str) -> Option<&Database> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DictionaryConnection<TcpStream> {
    /// Connect to `host` on the default DICT port.
    pub fn connect(host: &str) -> Result<Self> {
        Self::connect_with_port(host, DEFAULT_PORT)
    }

    pub fn connect_with_port(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port)).map_err(|e| DictError::Connection {
            reason: format!("failed to connect to {host}:{port}"),
            source: Some(e),
        })?;
        info!("connected to {host}:{port}");

        Self::open(stream)
    }
}

impl<T: Read + Write> DictionaryConnection<T> {
    /// Start a session over an already established stream.
    ///
    /// Reads the server greeting, which must carry status 220. Any other
    /// outcome is a [`DictError::Connection`].
    pub fn open(stream: T) -> Result<Self> {
        let mut transport = ProtocolTransport::new(stream);

        let status = transport.read_status().map_err(|e| match e {
            DictError::Connection { .. } => e,
            other => DictError::connection(format!("invalid greeting: {other}")),
        })?;
        if status.code() != SERVER_READY {
            return Err(DictError::connection(format!(
                "server not ready: {status}"
            )));
        }
        debug!("greeting: {status}");

        Ok(Self {
            session: Mutex::new(Some(Session {
                transport,
                databases: Directory::default(),
            })),
        })
    }

    /// Send `QUIT` and release the stream.
    ///
    /// Errors are logged and dropped. Closing an already closed session does
    /// nothing.
    pub fn close(&self) {
        let session = match self.session.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        if let Some(session) = session {
            Self::quit(session);
        }
    }

    /// Like [`close`](Self::close), but gives up instead of waiting when
    /// another call holds the session. Returns false in that case.
    ///
    /// Meant for signal handlers, which must not block on an exchange that
    /// is waiting for the server.
    pub fn try_close(&self) -> bool {
        let session = match self.session.try_lock() {
            Ok(mut guard) => guard.take(),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().take(),
            Err(TryLockError::WouldBlock) => return false,
        };

        if let Some(session) = session {
            Self::quit(session);
        }
        true
    }

    fn quit(mut session: Session<T>) {
        if let Err(e) = session.transport.write_request(&Request::Quit) {
            warn!("failed to send QUIT: {e}");
        }
        info!("session closed");
    }

    /// Databases offered by the server.
    ///
    /// The listing is fetched once per connection; later calls return the
    /// cached directory without touching the network.
    pub fn database_list(&self) -> Result<Vec<Database>> {
        self.with_session(|session| {
            session.load_databases()?;
            Ok(session.databases.entries.clone())
        })
    }

    /// Matching strategies offered by the server, one per name.
    pub fn strategy_list(&self) -> Result<Vec<MatchingStrategy>> {
        self.with_session(Session::strategies)
    }

    /// All definitions of `word` found in `database`.
    ///
    /// `database` may be one of the special databases ([`Database::all`],
    /// [`Database::first_match`]); the name is passed to the server as is.
    pub fn definitions(&self, word: &str, database: &Database) -> Result<Vec<Definition>> {
        self.with_session(|session| session.definitions(word, database))
    }

    /// Words in `database` that match `word` under `strategy`, without duplicates.
    pub fn match_list(
        &self,
        word: &str,
        strategy: &MatchingStrategy,
        database: &Database,
    ) -> Result<Vec<String>> {
        self.with_session(|session| session.matches(word, strategy, database))
    }

    fn with_session<R>(&self, f: impl FnOnce(&mut Session<T>) -> Result<R>) -> Result<R> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| DictError::connection("session lock poisoned"))?;
        let session = guard.as_mut().ok_or(DictError::Closed)?;
        f(session)
    }
}

impl<T: Read + Write> Drop for DictionaryConnection<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: Read + Write> Session<T> {
    fn load_databases(&mut self) -> Result<()> {
        if !self.databases.is_empty() {
            return Ok(());
        }

        self.transport.write_request(&Request::ShowDatabases)?;
        self.transport.read_status()?.expect(DATABASES_PRESENT)?;
        let lines = self.transport.read_block()?;
        self.transport.read_terminator()?;

        let mut directory = Directory::default();
        for line in lines {
            let (name, description) = name_and_description(&line)?;
            directory.insert(Database::new(name, description));
        }
        debug!("loaded {} databases", directory.entries.len());

        self.databases = directory;
        Ok(())
    }

    fn strategies(&mut self) -> Result<Vec<MatchingStrategy>> {
        self.transport.write_request(&Request::ShowStrategies)?;
        self.transport.read_status()?.expect(STRATEGIES_AVAILABLE)?;
        let lines = self.transport.read_block()?;
        self.transport.read_terminator()?;

        let mut seen = HashSet::new();
        let mut strategies = Vec::new();
        for line in lines {
            let (name, description) = name_and_description(&line)?;
            if seen.insert(name.clone()) {
                strategies.push(MatchingStrategy::new(name, description));
            }
        }

        Ok(strategies)
    }

    fn definitions(&mut self, word: &str, database: &Database) -> Result<Vec<Definition>> {
        self.load_databases()?;

        self.transport.write_request(&Request::Define {
            database: database.name().to_string(),
            word: word.to_string(),
        })?;

        let status = self.transport.read_status()?;
        match status.code() {
            DEFINITIONS_RETRIEVED => {}
            NO_MATCH => return Err(DictError::NoMatch),
            _ => {
                return Err(DictError::InvalidResponse {
                    expected: DEFINITIONS_RETRIEVED,
                    status,
                });
            }
        }
        let announced = leading_count(status.detail());

        // Blocks are consumed even after a bad header. The first failure is
        // returned once the reply has ended.
        let mut definitions = Vec::new();
        let mut failure = None;
        let end = loop {
            let status = self.transport.read_status()?;
            if status.code() != DEFINITION_FOLLOWS {
                break status;
            }
            let body = self.transport.read_block()?;

            let atoms = split_atoms(status.detail());
            let (Some(headword), Some(name)) = (atoms.first(), atoms.get(1)) else {
                failure.get_or_insert(DictError::Malformed(format!(
                    "invalid definition header '{status}'"
                )));
                continue;
            };
            let Some(source) = self.databases.get(name) else {
                failure.get_or_insert(DictError::UnknownDatabase(name.clone()));
                continue;
            };

            let mut definition = Definition::new(headword.as_str(), source.clone());
            for line in body {
                definition.append_line(line);
            }
            definitions.push(definition);
        };
        end.expect(COMMAND_OK)?;

        if let Some(err) = failure {
            return Err(err);
        }
        if announced.is_some_and(|n| n != definitions.len()) {
            warn!(
                "server announced {announced:?} definitions of '{word}' but sent {}",
                definitions.len()
            );
        }

        Ok(definitions)
    }

    fn matches(
        &mut self,
        word: &str,
        strategy: &MatchingStrategy,
        database: &Database,
    ) -> Result<Vec<String>> {
        self.transport.write_request(&Request::Match {
            database: database.name().to_string(),
            strategy: strategy.name().to_string(),
            word: word.to_string(),
        })?;

        let status = self.transport.read_status()?;
        if status.code() == NO_MATCH {
            return Err(DictError::NoMatch);
        }
        status.expect(MATCHES_FOUND)?;
        let lines = self.transport.read_block()?;
        self.transport.read_terminator()?;

        let mut seen = HashSet::new();
        let mut words = Vec::new();
        for line in lines {
            let mut atoms = split_atoms(&line);
            if atoms.len() < 2 {
                return Err(DictError::Malformed(format!("invalid match line '{line}'")));
            }
            let matched = atoms.swap_remove(1);
            if seen.insert(matched.clone()) {
                words.push(matched);
            }
        }

        Ok(words)
    }
}

fn name_and_description(line: &str) -> Result<(String, String)> {
    let mut atoms = split_atoms(line).into_iter();
    let name = atoms
        .next()
        .ok_or_else(|| DictError::Malformed(format!("invalid listing line '{line}'")))?;
    Ok((name, atoms.next().unwrap_or_default()))
}

fn leading_count(detail: &str) -> Option<usize> {
    detail.split_whitespace().next()?.parse().ok()
}
