//! The stdin line format is simple:
//!
//! ```text
//! [timestamp | partition | sequence] payload
//! ```
//!
//! The square brackets are literal `[]`. Every part is optional, but they must appear in that order,
//! and a sequence requires a partition. The following are all valid:
//!
//! ```text
//! [2022-01-01T00:00:00] { "payload": "anything" }
//! [2022-01-01T00:00:00 | 3] A string payload
//! [2022-01-01T00:00:00 | 3 | 123] ["array", "of", "values"]
//! [3] A string payload
//! [3 | 123] { "payload": "anything" }
//! ```
//!
//! A line that does not start with a well-formed header is a payload in its entirety.

use hub_reader_types::{PartitionId, SeqNo, Timestamp};
use nom::{
    bytes::complete::{is_not, take_while_m_n},
    character::complete::char,
    sequence::delimited,
    IResult,
};
use thiserror::Error;
use time::{macros::format_description, PrimitiveDateTime};

/// Maximum string length of a partition id.
const MAX_PARTITION_ID_LEN: usize = 64;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineMeta {
    pub timestamp: Option<Timestamp>,
    pub partition: Option<PartitionId>,
    pub sequence: Option<SeqNo>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseErr {
    #[error("Empty LineMeta")]
    Empty,
    #[error("Error parsing brackets: {0}")]
    Nom(String),
    #[error("Unknown part: {0}")]
    Unknown(String),
}

/// Split a raw line into its header and payload. Lines without a valid header yield an empty header.
///
/// Only the header has to be UTF-8; the payload bytes are passed through untouched.
pub fn parse_line(input: &[u8]) -> (LineMeta, &[u8]) {
    if let Some(end) = input.iter().position(|b| *b == b']') {
        if let Ok(header) = std::str::from_utf8(&input[..=end]) {
            if let Ok((meta, _)) = parse_meta(header) {
                return (meta, trim_ascii(&input[end + 1..]));
            }
        }
    }
    (LineMeta::default(), input)
}

pub fn parse_meta(input: &str) -> Result<(LineMeta, &str), ParseErr> {
    let (remaining, raw) = brackets(input).map_err(|e| ParseErr::Nom(e.to_string()))?;
    let mut meta = LineMeta::default();
    for part in raw.split('|').map(|s| s.trim()) {
        let mut parsed = false;
        if meta.timestamp.is_none() && meta.partition.is_none() {
            let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
            if let Ok(timestamp) = PrimitiveDateTime::parse(part, &format) {
                meta.timestamp = Some(timestamp.assume_utc());
                parsed = true;
            }
        }
        if !parsed && meta.partition.is_none() {
            if let Ok(("", partition)) = partition_id(part) {
                meta.partition = Some(PartitionId::new(partition));
                parsed = true;
            }
        } else if !parsed && meta.sequence.is_none() {
            if let Ok(sequence) = part.parse() {
                meta.sequence = Some(sequence);
                parsed = true;
            }
        }
        if !parsed {
            return Err(ParseErr::Unknown(part.to_owned()));
        }
    }
    if meta == LineMeta::default() {
        return Err(ParseErr::Empty);
    }
    Ok((meta, remaining.trim()))
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn is_valid_partition_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn partition_id(input: &str) -> IResult<&str, &str> {
    take_while_m_n(1, MAX_PARTITION_ID_LEN, is_valid_partition_char)(input)
}

fn brackets(input: &str) -> IResult<&str, &str> {
    delimited(char('['), is_not("]"), char(']'))(input)
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_parse_meta_1() {
        assert_eq!(
            parse_meta(r#"[2022-01-02T03:04:05] { "payload": "anything" }"#).unwrap(),
            (
                LineMeta {
                    timestamp: Some(datetime!(2022-01-02 03:04:05 UTC)),
                    ..Default::default()
                },
                r#"{ "payload": "anything" }"#
            )
        )
    }

    #[test]
    fn test_parse_meta_2() {
        assert_eq!(
            parse_meta("[2022-01-02T03:04:05 | 3 | 123] hello").unwrap(),
            (
                LineMeta {
                    timestamp: Some(datetime!(2022-01-02 03:04:05 UTC)),
                    partition: Some(PartitionId::new("3")),
                    sequence: Some(123),
                },
                "hello"
            )
        )
    }

    #[test]
    fn test_parse_meta_3() {
        assert_eq!(
            parse_meta("[p-1 | 7]   spaced out  ").unwrap(),
            (
                LineMeta {
                    timestamp: None,
                    partition: Some(PartitionId::new("p-1")),
                    sequence: Some(7),
                },
                "spaced out"
            )
        )
    }

    #[test]
    fn test_parse_meta_error() {
        assert!(matches!(parse_meta("[ ]"), Err(ParseErr::Unknown(_))));
        assert!(matches!(parse_meta("[0 | x]"), Err(ParseErr::Unknown(_))));
        assert!(matches!(parse_meta("no header"), Err(ParseErr::Nom(_))));
    }

    #[test]
    fn test_parse_line_fallback() {
        let (meta, payload) = parse_line(br#"["array", "of", "values"]"#);
        assert_eq!(meta, LineMeta::default());
        assert_eq!(payload, br#"["array", "of", "values"]"#);

        let (meta, payload) = parse_line(b"plain text");
        assert_eq!(meta, LineMeta::default());
        assert_eq!(payload, b"plain text");
    }

    #[test]
    fn test_parse_line_binary_payload() {
        let (meta, payload) = parse_line(b"[2 | 9]  \xffbad\x00 ");
        assert_eq!(meta.partition, Some(PartitionId::new("2")));
        assert_eq!(meta.sequence, Some(9));
        assert_eq!(payload, b"\xffbad\x00");

        let (meta, payload) = parse_line(b"\xff[0] not a header");
        assert_eq!(meta, LineMeta::default());
        assert_eq!(payload, b"\xff[0] not a header");

        let (meta, payload) = parse_line(b"[\xff] x");
        assert_eq!(meta, LineMeta::default());
        assert_eq!(payload, b"[\xff] x");
    }
}
