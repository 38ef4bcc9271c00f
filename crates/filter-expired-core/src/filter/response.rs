//! Response encoding
//!
//! Builds the lines sent back to smtpd. Peers older than protocol 0.5 expect
//! the token ahead of the session id; newer ones the other way round.

use super::parser::DELIMITER;
use filter_expired_common::{ProtocolVersion, SessionContext, Verdict};

/// Message type of a decision line
pub const FILTER_RESULT: &str = "filter-result";

/// Encode one response line without its terminator
pub fn encode(
    msg_type: &str,
    context: &SessionContext,
    verdict: &Verdict,
    version: &ProtocolVersion,
) -> String {
    let (first, second) = if version.session_first() {
        (&context.session_id, &context.token)
    } else {
        (&context.token, &context.session_id)
    };

    let mut fields = vec![msg_type, first.as_str(), second.as_str(), verdict.status()];
    fields.extend(verdict.extra_fields());
    fields.join(DELIMITER)
}

/// Encode a `filter-result` line
pub fn filter_result(
    context: &SessionContext,
    verdict: &Verdict,
    version: &ProtocolVersion,
) -> String {
    encode(FILTER_RESULT, context, verdict, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_expired_common::Phase;
    use pretty_assertions::assert_eq;

    fn context() -> SessionContext {
        SessionContext::new("session1", "token1")
    }

    #[test]
    fn test_old_peer_gets_token_first() {
        let line = filter_result(&context(), &Verdict::Proceed, &ProtocolVersion::new("0.4"));
        assert_eq!(line, "filter-result|token1|session1|proceed");
    }

    #[test]
    fn test_new_peer_gets_session_first() {
        for version in ["0.5", "0.6", "0.7", "1.0"] {
            let line =
                filter_result(&context(), &Verdict::Proceed, &ProtocolVersion::new(version));
            assert_eq!(line, "filter-result|session1|token1|proceed");
        }
    }

    #[test]
    fn test_two_digit_minor_sorts_as_old() {
        let line = filter_result(&context(), &Verdict::Proceed, &ProtocolVersion::new("0.10"));
        assert_eq!(line, "filter-result|token1|session1|proceed");
    }

    #[test]
    fn test_reject_appends_reason() {
        let verdict = Verdict::Reject(Phase::MailFrom.reject_reason().to_string());

        assert_eq!(
            filter_result(&context(), &verdict, &ProtocolVersion::new("0.5")),
            "filter-result|session1|token1|reject|550 5.7.1 The email account that you tried to use is disabled"
        );
        assert_eq!(
            filter_result(&context(), &verdict, &ProtocolVersion::new("0.4")),
            "filter-result|token1|session1|reject|550 5.7.1 The email account that you tried to use is disabled"
        );
    }
}
