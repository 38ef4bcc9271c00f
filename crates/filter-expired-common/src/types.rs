//! Protocol vocabulary for filter-expired

use std::fmt;

/// Version at which the peer expects the session id ahead of the token
pub const SESSION_FIRST_SINCE: &str = "0.5";

/// SMTP phase at which the peer asks this filter for a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `MAIL FROM`: the sender address is checked
    MailFrom,
    /// `RCPT TO`: each recipient address is checked
    RcptTo,
}

impl Phase {
    /// Every phase this filter registers for
    pub const ALL: [Phase; 2] = [Phase::MailFrom, Phase::RcptTo];

    /// Wire name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::MailFrom => "mail-from",
            Phase::RcptTo => "rcpt-to",
        }
    }

    /// Look up a phase by its wire name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.as_str() == name)
    }

    /// SMTP reply sent when the checked account has expired
    pub fn reject_reason(&self) -> &'static str {
        match self {
            Phase::MailFrom => "550 5.7.1 The email account that you tried to use is disabled",
            Phase::RcptTo => "550 5.2.1 The email account that you tried to reach is disabled",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision returned for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Reject(String),
}

impl Verdict {
    /// Wire status keyword
    pub fn status(&self) -> &'static str {
        match self {
            Verdict::Proceed => "proceed",
            Verdict::Reject(_) => "reject",
        }
    }

    /// Fields appended after the status
    pub fn extra_fields(&self) -> Vec<&str> {
        match self {
            Verdict::Proceed => Vec::new(),
            Verdict::Reject(reason) => vec![reason.as_str()],
        }
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Verdict::Reject(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}

/// Identifies the pending event a response answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: String,
    pub token: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            token: token.into(),
        }
    }
}

/// Protocol version announced by the peer on each event.
///
/// Compared lexically, as the peer's own filters compare it: `"0.10"`
/// sorts before `"0.5"` and is treated as an old peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolVersion(String);

impl ProtocolVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Whether responses carry the session id before the token
    pub fn session_first(&self) -> bool {
        self.0.as_str() >= SESSION_FIRST_SINCE
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
