//! Invite name comparison.
//!
//! Import deduplicates invites by a key derived from the name. Which names
//! count as "the same" is configurable; the store only ever compares keys.

use std::fmt;
use std::str::FromStr;

/// How two invite names are compared during import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InviteNameMatching {
    /// Byte-for-byte after trimming the ends.
    #[default]
    Exact,
    /// Ignores letter case.
    CaseInsensitive,
    /// Ignores letter case and collapses runs of inner whitespace.
    Normalized,
}

impl InviteNameMatching {
    /// Deduplication key for `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use party_rsvp_core::InviteNameMatching;
    ///
    /// assert_eq!(InviteNameMatching::Exact.key(" Jordan Lee "), "Jordan Lee");
    /// assert_eq!(InviteNameMatching::CaseInsensitive.key("Jordan  Lee"), "jordan  lee");
    /// assert_eq!(InviteNameMatching::Normalized.key("Jordan  Lee"), "jordan lee");
    /// ```
    #[must_use]
    pub fn key(self, name: &str) -> String {
        let trimmed = name.trim();
        match self {
            Self::Exact => trimmed.to_string(),
            Self::CaseInsensitive => trimmed.to_lowercase(),
            Self::Normalized => trimmed
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        }
    }

    /// Configuration spelling of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
            Self::Normalized => "normalized",
        }
    }
}

impl fmt::Display for InviteNameMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown matching mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invite name matching mode '{0}' (expected exact, case-insensitive or normalized)")]
pub struct UnknownMatchingMode(pub String);

impl FromStr for InviteNameMatching {
    type Err = UnknownMatchingMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "case-insensitive" | "case_insensitive" => Ok(Self::CaseInsensitive),
            "normalized" | "normalised" => Ok(Self::Normalized),
            other => Err(UnknownMatchingMode(other.to_string())),
        }
    }
}
