use std::fmt;

use crate::domain::{Rule, Sign};

/// Why a token was left out of a ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// First character is not one of `-`, `!`, `+`
    UnknownSign(char),
    /// Sign with nothing after it
    EmptyPattern,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownSign(c) => write!(f, "unknown sign {c:?}"),
            SkipReason::EmptyPattern => write!(f, "empty pattern"),
        }
    }
}

/// A token dropped while parsing a rule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedToken {
    /// Index of the token in the comma split
    pub position: usize,
    pub token: String,
    pub reason: SkipReason,
}

/// Output of tokenizing a rule string.
#[derive(Debug, Default)]
pub(crate) struct Parsed {
    pub rules: Vec<Rule>,
    pub skipped: Vec<SkippedToken>,
}

/// Parse a single token into a rule.
pub(crate) fn parse_token(token: &str) -> Result<Rule, SkipReason> {
    let mut chars = token.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Err(SkipReason::EmptyPattern),
    };

    let sign = Sign::from_char(first).ok_or(SkipReason::UnknownSign(first))?;
    let pattern = chars.as_str();
    if pattern.is_empty() {
        return Err(SkipReason::EmptyPattern);
    }

    Ok(Rule::new(sign, pattern))
}

/// Split a rule string on commas, keeping well-formed tokens in order.
///
/// Empty tokens (doubled or trailing commas) are ignored without a
/// diagnostic. Tokens are not trimmed.
pub(crate) fn parse_rules(input: &str) -> Parsed {
    let mut parsed = Parsed::default();

    for (position, token) in input.split(',').enumerate() {
        if token.is_empty() {
            continue;
        }

        match parse_token(token) {
            Ok(rule) => parsed.rules.push(rule),
            Err(reason) => parsed.skipped.push(SkippedToken {
                position,
                token: token.to_string(),
                reason,
            }),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token("-google.com"), Ok(Rule::new(Sign::Block, "google.com")));
        assert_eq!(parse_token("!a"), Ok(Rule::new(Sign::Preserve, "a")));
        assert_eq!(parse_token("xyz"), Err(SkipReason::UnknownSign('x')));
        assert_eq!(parse_token("+"), Err(SkipReason::EmptyPattern));
    }

    #[test]
    fn test_parse_rules_keeps_order() {
        let parsed = parse_rules("+b.org,-a.com,!c.net");

        let patterns: Vec<&str> = parsed.rules.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["b.org", "a.com", "c.net"]);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_parse_rules_records_skipped_positions() {
        let parsed = parse_rules("xyz,-ok.com,,-, -space.com");

        assert_eq!(parsed.rules, vec![Rule::new(Sign::Block, "ok.com")]);
        assert_eq!(
            parsed.skipped,
            vec![
                SkippedToken {
                    position: 0,
                    token: "xyz".to_string(),
                    reason: SkipReason::UnknownSign('x'),
                },
                SkippedToken {
                    position: 3,
                    token: "-".to_string(),
                    reason: SkipReason::EmptyPattern,
                },
                SkippedToken {
                    position: 4,
                    token: " -space.com".to_string(),
                    reason: SkipReason::UnknownSign(' '),
                },
            ]
        );
    }

    #[test]
    fn test_parse_rules_multibyte_sign_position() {
        let parsed = parse_rules("é-a.com,+ü.example");

        assert_eq!(parsed.rules, vec![Rule::new(Sign::Accept, "ü.example")]);
        assert_eq!(parsed.skipped[0].reason, SkipReason::UnknownSign('é'));
    }

    #[test]
    fn test_parse_rules_empty_input() {
        let parsed = parse_rules("");

        assert!(parsed.rules.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::UnknownSign('x').to_string(), "unknown sign 'x'");
        assert_eq!(SkipReason::EmptyPattern.to_string(), "empty pattern");
    }
}
