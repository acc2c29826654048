use std::io::{BufRead, BufReader, Read, Write};

use log::{debug, trace};

use crate::{DictError, error::Result};

use super::{Request, Status};

/// Line oriented transport over a bidirectional stream.
///
/// Reads go through a buffer; writes go straight to the underlying stream and
/// are flushed after every command.
pub struct ProtocolTransport<T: Read + Write> {
    stream: BufReader<T>,
}

impl<T: Read + Write> ProtocolTransport<T> {
    pub fn new(stream: T) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    pub fn write_request(&mut self, request: &Request) -> Result<()> {
        debug!("> {request}");
        let writer = self.stream.get_mut();
        write!(writer, "{request}\r\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Next line without its line ending. End of stream is a connection error.
    ///
    /// Bytes that are not valid UTF-8 are replaced, never rejected, so a line
    /// is always consumed in full.
    pub fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        if self.stream.read_until(b'\n', &mut buf)? == 0 {
            return Err(DictError::connection("connection closed by server"));
        }

        while buf.ends_with(b"\n") || buf.ends_with(b"\r") {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        trace!("< {line}");
        Ok(line)
    }

    pub fn read_status(&mut self) -> Result<Status> {
        let line = self.read_line()?;
        let status = Status::parse(&line)?;
        debug!("status: {status}");
        Ok(status)
    }

    /// Read a data block up to (and consuming) the lone `.` sentinel.
    ///
    /// Lines starting with a doubled dot are un-stuffed.
    pub fn read_block(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line == "." {
                return Ok(lines);
            }
            match line.strip_prefix("..") {
                Some(rest) => lines.push(format!(".{rest}")),
                None => lines.push(line),
            }
        }
    }

    /// Consume the single line that closes a reply after its data block.
    pub fn read_terminator(&mut self) -> Result<()> {
        let line = self.read_line()?;
        trace!("terminator: {line}");
        Ok(())
    }

    pub fn get_ref(&self) -> &T {
        self.stream.get_ref()
    }
}
