use std::{
    error::Error,
    io,
    sync::Arc,
};

use clap::Parser;
use dictum::{
    CliError, Command, Database, Defaults, DictionaryConnection, MatchingStrategy, execute,
    prompt,
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// DICT server to connect to
    #[arg(default_value = "dict.org", env = "DICTUM_HOST")]
    host: String,
    /// Server port
    #[arg(short, long, default_value_t = dictum::DEFAULT_PORT, env = "DICTUM_PORT")]
    port: u16,
    /// Database used when a command does not name one
    #[arg(short, long, default_value = "*")]
    database: String,
    /// Strategy used when a match command does not name one
    #[arg(short, long, default_value = "prefix")]
    strategy: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize env_logger; For logging to STDOUT/STDERR
    env_logger::init();

    let cli = Cli::parse();
    let conn = Arc::new(DictionaryConnection::connect_with_port(&cli.host, cli.port)?);
    let defaults = Defaults {
        database: Database::new(cli.database, ""),
        strategy: MatchingStrategy::new(cli.strategy, ""),
    };

    let handle = Arc::clone(&conn);
    ctrlc::set_handler(move || {
        if !handle.try_close() {
            eprintln!("exchange in progress, exiting without QUIT");
        }
        std::process::exit(130);
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();

    loop {
        let cmd = match prompt(stdin.lock(), StdOut::new(stdout.lock())) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };

        if let Command::Exit = cmd {
            break;
        }

        match execute(&*conn, cmd, &defaults, StdOut::new(stdout.lock())) {
            Ok(()) => {}
            Err(CliError::Dict(e)) if e.is_connection() => {
                eprintln!("connection lost: {e}");
                break;
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    conn.close();
    Ok(())
}

/// StdOut wrapper that automatically flushes content after every write.
struct StdOut<W: io::Write> {
    inner: W,
}

impl<W: io::Write> StdOut<W> {
    fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: io::Write> io::Write for StdOut<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let res = self.inner.write(buf);
        if res.is_ok() {
            self.inner.flush()?
        }
        res
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
