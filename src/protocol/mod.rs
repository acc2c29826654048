//! DICT wire protocol.
//!
//! This module defines how the client talks to a DICT server (RFC 2229): the
//! command lines it sends, the status lines it reads back and the framing of
//! the data blocks that follow some of them.
//!
//! # Overview
//!
//! Every exchange is line based. The client writes one command terminated by
//! CRLF. The server answers with a status line (`<code> <text>`), optionally
//! followed by one or more data blocks. A data block is a sequence of lines
//! ending with a line holding a single `.`; data lines that begin with a dot
//! are sent with the dot doubled.
//!
//! | Command    | Success | Framing                                        |
//! |------------|---------|------------------------------------------------|
//! | SHOW DB    | 110     | one block, then a completion line              |
//! | SHOW STRAT | 111     | one block, then a completion line              |
//! | DEFINE     | 150     | `151` + block per definition, then `250`       |
//! | MATCH      | 152     | one block, then a completion line              |
//!
//! A `552` status means the lookup found nothing; no block follows it.
//!
//! # Key Components
//!
//! - [`Status`]: parsed status line.
//! - [`Request`]: a command, rendered to its wire form by `Display`.
//! - [`ProtocolTransport`]: line reads and writes over any `Read + Write` stream.
//!
//! # See Also
//!
//! - [`connection`](crate::connection): session engine built on this layer.
mod request;
pub mod status;
mod transport;

pub use request::Request;
pub use status::Status;
pub use transport::ProtocolTransport;

#[cfg(test)]
pub(crate) use transport::tests::MockStream;
