//! Event record tokenizer
//!
//! An event looks like
//! `filter|<version>|<timestamp>|<subsystem>|<phase>|<session-id>|<param>...`.

use super::error::ProtocolError;
use filter_expired_common::ProtocolVersion;

/// Field separator on the wire
pub const DELIMITER: &str = "|";

/// Stream tag every event must carry
pub const FILTER_STREAM: &str = "filter";

/// Fewest fields an event may have
pub const MIN_ATOMS: usize = 6;

/// One decoded event line, borrowing from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEvent<'a> {
    pub version: ProtocolVersion,
    pub timestamp: &'a str,
    pub subsystem: &'a str,
    pub phase: &'a str,
    pub session_id: &'a str,
    pub params: Vec<&'a str>,
}

impl<'a> FilterEvent<'a> {
    /// Split a record and check its framing
    pub fn parse(line: &'a str) -> Result<Self, ProtocolError> {
        let atoms: Vec<&str> = line.split(DELIMITER).collect();
        if atoms.len() < MIN_ATOMS {
            return Err(ProtocolError::MissingAtoms(line.to_string()));
        }

        if atoms[0] != FILTER_STREAM {
            return Err(ProtocolError::InvalidStream(atoms[0].to_string()));
        }

        Ok(Self {
            version: ProtocolVersion::new(atoms[1]),
            timestamp: atoms[2],
            subsystem: atoms[3],
            phase: atoms[4],
            session_id: atoms[5],
            params: atoms[6..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_mail_from() {
        let event = FilterEvent::parse(
            "filter|0.5|1576146008.006099|smtp-in|mail-from|7641df9771b4ed00|1ef1c203cc576e5d|alice@example.com",
        )
        .unwrap();

        assert_eq!(event.version, ProtocolVersion::new("0.5"));
        assert_eq!(event.timestamp, "1576146008.006099");
        assert_eq!(event.subsystem, "smtp-in");
        assert_eq!(event.phase, "mail-from");
        assert_eq!(event.session_id, "7641df9771b4ed00");
        assert_eq!(event.params, vec!["1ef1c203cc576e5d", "alice@example.com"]);
    }

    #[test]
    fn test_six_atoms_is_enough() {
        let event = FilterEvent::parse("filter|0.4|0|smtp-in|data|abc").unwrap();
        assert_eq!(event.session_id, "abc");
        assert!(event.params.is_empty());
    }

    #[test]
    fn test_missing_atoms() {
        let err = FilterEvent::parse("filter|0.5|0|smtp-in|mail-from").unwrap_err();
        assert!(matches!(err, ProtocolError::MissingAtoms(line) if line == "filter|0.5|0|smtp-in|mail-from"));

        assert!(matches!(
            FilterEvent::parse(""),
            Err(ProtocolError::MissingAtoms(_))
        ));
    }

    #[test]
    fn test_invalid_stream() {
        let err = FilterEvent::parse("report|0.5|0|smtp-in|link-connect|abc").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidStream(tag) if tag == "report"));
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let event = FilterEvent::parse("filter|0.5||smtp-in|rcpt-to|s|t|").unwrap();
        assert_eq!(event.timestamp, "");
        assert_eq!(event.params, vec!["t", ""]);
    }
}
