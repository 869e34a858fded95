use std::fmt;

use super::SiteDataPolicy;

/// Leading character of a rule token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// `-`
    Block,
    /// `!`
    Preserve,
    /// `+`
    Accept,
}

impl Sign {
    /// Recognize a sign character, `None` for anything else.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Sign::Block),
            '!' => Some(Sign::Preserve),
            '+' => Some(Sign::Accept),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(&self) -> char {
        match self {
            Sign::Block => '-',
            Sign::Preserve => '!',
            Sign::Accept => '+',
        }
    }

    /// The verdict a matching rule with this sign produces.
    #[inline]
    pub fn policy(&self) -> SiteDataPolicy {
        match self {
            Sign::Block => SiteDataPolicy::Block,
            Sign::Preserve => SiteDataPolicy::Preserve,
            Sign::Accept => SiteDataPolicy::Accept,
        }
    }
}

/// A single sign + domain pattern pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub sign: Sign,
    /// Domain or domain fragment, matched as a substring of the hostname
    pub pattern: String,
}

impl Rule {
    pub fn new(sign: Sign, pattern: impl Into<String>) -> Self {
        Rule {
            sign,
            pattern: pattern.into(),
        }
    }

    /// Returns true if the hostname contains this rule's pattern.
    ///
    /// Containment is unanchored and case-sensitive: `-evil.com` matches
    /// `notevil.com.example.net`.
    #[inline]
    pub fn matches(&self, hostname: &str) -> bool {
        hostname.contains(self.pattern.as_str())
    }

    #[inline]
    pub fn policy(&self) -> SiteDataPolicy {
        self.sign.policy()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.as_char(), self.pattern)
    }
}
