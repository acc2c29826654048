use std::fmt;

use crate::{DictError, error::Result};

pub const DATABASES_PRESENT: u16 = 110;
pub const STRATEGIES_AVAILABLE: u16 = 111;
pub const DEFINITIONS_RETRIEVED: u16 = 150;
pub const DEFINITION_FOLLOWS: u16 = 151;
pub const MATCHES_FOUND: u16 = 152;
pub const SERVER_READY: u16 = 220;
pub const COMMAND_OK: u16 = 250;
pub const NO_MATCH: u16 = 552;

/// First line of every server reply: a three digit code and free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    code: u16,
    detail: String,
}

impl Status {
    pub fn parse(line: &str) -> Result<Self> {
        let malformed = || DictError::Malformed(format!("invalid status line '{line}'"));

        let digits = line.get(..3).ok_or_else(malformed)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let rest = &line[3..];
        if !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
            return Err(malformed());
        }

        let code = digits.parse::<u16>().map_err(|_| malformed())?;
        if !(100..=599).contains(&code) {
            return Err(malformed());
        }

        Ok(Self {
            code,
            detail: rest.trim().to_string(),
        })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Fail with [`DictError::InvalidResponse`] unless the code is `expected`.
    pub fn expect(self, expected: u16) -> Result<Self> {
        if self.code == expected {
            Ok(self)
        } else {
            Err(DictError::InvalidResponse {
                expected,
                status: self,
            })
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_banner() {
        let status = Status::parse("220 dict.org dictd 1.12.1 <auth.mime> <100@dict.org>").unwrap();

        assert_eq!(status.code(), SERVER_READY);
        assert_eq!(
            status.detail(),
            "dict.org dictd 1.12.1 <auth.mime> <100@dict.org>"
        );
    }

    #[test]
    fn parse_bare_code() {
        let status = Status::parse("250").unwrap();

        assert_eq!(status.code(), COMMAND_OK);
        assert_eq!(status.detail(), "");
        assert_eq!(status.to_string(), "250");
    }

    #[test]
    #[should_panic(expected = "Malformed")]
    fn reject_non_numeric() {
        Status::parse("abc ready").unwrap();
    }

    #[test]
    #[should_panic(expected = "Malformed")]
    fn reject_four_digits() {
        Status::parse("2200 ready").unwrap();
    }

    #[test]
    #[should_panic(expected = "Malformed")]
    fn reject_out_of_range() {
        Status::parse("999 what").unwrap();
    }

    #[test]
    #[should_panic(expected = "Malformed")]
    fn reject_short_line() {
        Status::parse("22").unwrap();
    }

    #[test]
    fn expect_mismatch() {
        let err = Status::parse("552 no match").unwrap().expect(150).unwrap_err();

        assert!(matches!(
            err,
            DictError::InvalidResponse { expected: 150, ref status } if status.code() == NO_MATCH
        ));
    }
}
