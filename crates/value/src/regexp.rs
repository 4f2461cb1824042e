use crate::error::Error;
use regex::{Regex, RegexBuilder};

const KNOWN_FLAGS: &str = "gimsuy";

/// A compiled pattern together with the source and flags it was built from.
///
/// Flags are stored in canonical (sorted) order. `i`, `m` and `s` configure
/// the matcher; `g`, `u` and `y` are kept as metadata only.
///
/// # Examples
///
/// ```
/// use replica_value::RegExp;
///
/// let re = RegExp::new("^ab+c$", "mi").unwrap();
/// assert_eq!(re.flags(), "im");
/// assert!(re.is_match("ABBC"));
/// assert!(RegExp::new("a", "x").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RegExp {
    source: String,
    flags: String,
    regex: Regex,
}

impl RegExp {
    pub fn new(source: &str, flags: &str) -> Result<Self, Error> {
        let invalid = |reason: String| Error::InvalidRegExp {
            pattern: source.to_string(),
            flags: flags.to_string(),
            reason,
        };

        let mut sorted: Vec<char> = flags.chars().collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(invalid(format!("duplicate flag '{}'", pair[0])));
            }
        }

        let mut builder = RegexBuilder::new(source);
        for flag in &sorted {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                c if KNOWN_FLAGS.contains(*c) => {}
                c => return Err(invalid(format!("unknown flag '{}'", c))),
            }
        }
        let regex = builder.build().map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            flags: sorted.into_iter().collect(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn global(&self) -> bool {
        self.flags.contains('g')
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_canonical() {
        let re = RegExp::new("x", "ygi").unwrap();
        assert_eq!(re.flags(), "giy");
        assert!(re.global());
    }

    #[test]
    fn test_dot_all_and_multiline() {
        let re = RegExp::new("a.b", "s").unwrap();
        assert!(re.is_match("a\nb"));
        let re = RegExp::new("^b$", "m").unwrap();
        assert!(re.is_match("a\nb\nc"));
        let re = RegExp::new("^b$", "").unwrap();
        assert!(!re.is_match("a\nb\nc"));
    }

    #[test]
    fn test_invalid_flags() {
        assert!(matches!(
            RegExp::new("a", "gg"),
            Err(Error::InvalidRegExp { .. })
        ));
        assert!(matches!(
            RegExp::new("a", "q"),
            Err(Error::InvalidRegExp { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RegExp::new("(", "").unwrap_err();
        match err {
            Error::InvalidRegExp { pattern, flags, .. } => {
                assert_eq!(pattern, "(");
                assert_eq!(flags, "");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
