//! `exists` rule: an occurrence-count constraint.

use name_lint_core::{Rule, RuleBox, RuleError};
use std::sync::atomic::{AtomicU32, Ordering};

/// Upper bound for both limits.
pub const MAX_OCCURRENCES: u16 = 32_767;

/// Requires between `min` and `max` matching entries in the owning
/// directory.
///
/// During the walk every counted entry calls [`Rule::validate`] with
/// `strict = false`, which only increments the counter. The final verdict
/// is a single strict call once the walk is over.
#[derive(Debug)]
pub struct ExistsRule {
    min: u16,
    max: u16,
    count: AtomicU32,
}

impl Default for ExistsRule {
    fn default() -> Self {
        Self {
            min: 1,
            max: MAX_OCCURRENCES,
            count: AtomicU32::new(0),
        }
    }
}

impl ExistsRule {
    /// Creates a rule requiring at least one entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule with explicit bounds.
    #[must_use]
    pub fn between(min: u16, max: u16) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    /// Number of entries counted so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    fn bounds(&self) -> String {
        if self.min == self.max {
            self.min.to_string()
        } else {
            format!("{}-{}", self.min, self.max)
        }
    }

    fn parse_limit(&self, raw: &str, parameter: &str) -> Result<u16, RuleError> {
        let invalid = |message: String| RuleError::InvalidParameter {
            rule: self.name(),
            parameter: parameter.to_string(),
            message,
        };

        let value = raw
            .trim()
            .parse::<u16>()
            .map_err(|e| invalid(format!("`{raw}` is not a count: {e}")))?;
        if value > MAX_OCCURRENCES {
            return Err(invalid(format!("`{raw}` exceeds {MAX_OCCURRENCES}")));
        }
        Ok(value)
    }
}

impl Rule for ExistsRule {
    fn name(&self) -> &'static str {
        "exists"
    }

    fn description(&self) -> &'static str {
        "Requires `N` or `N-M` matching entries in the declaring directory"
    }

    fn set_parameters(&mut self, params: Option<&str>) -> Result<(), RuleError> {
        let Some(raw) = params else {
            self.min = 1;
            self.max = MAX_OCCURRENCES;
            return Ok(());
        };
        if raw.trim().is_empty() {
            return Err(RuleError::MissingParameter { rule: self.name() });
        }

        let (min, max) = match raw.split_once('-') {
            None => {
                let value = self.parse_limit(raw, raw)?;
                (value, value)
            }
            Some((min, max)) => (self.parse_limit(min, raw)?, self.parse_limit(max, raw)?),
        };
        if min > max {
            return Err(RuleError::InvalidParameter {
                rule: self.name(),
                parameter: raw.to_string(),
                message: format!("minimum {min} is greater than maximum {max}"),
            });
        }

        self.min = min;
        self.max = max;
        Ok(())
    }

    fn parameters(&self) -> Vec<String> {
        if self.min == 1 && self.max == MAX_OCCURRENCES {
            Vec::new()
        } else {
            vec![self.bounds()]
        }
    }

    fn is_exclusive(&self) -> bool {
        true
    }

    fn validate(&self, _value: &str, _path: &str, strict: bool) -> Result<bool, RuleError> {
        if !strict {
            self.count.fetch_add(1, Ordering::Relaxed);
            return Ok(true);
        }

        let count = self.count();
        Ok(u32::from(self.min) <= count && count <= u32::from(self.max))
    }

    fn error_message(&self) -> String {
        format!("{}:{} (found {})", self.name(), self.bounds(), self.count())
    }

    fn copy(&self) -> RuleBox {
        Box::new(Self::between(self.min, self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(params: Option<&str>) -> Result<ExistsRule, RuleError> {
        let mut rule = ExistsRule::new();
        rule.set_parameters(params)?;
        Ok(rule)
    }

    #[test]
    fn parameters_round_trip() {
        assert_eq!(parsed(Some("3")).unwrap().parameters(), vec!["3"]);
        assert_eq!(parsed(Some("0")).unwrap().parameters(), vec!["0"]);
        assert_eq!(parsed(Some("1-4")).unwrap().parameters(), vec!["1-4"]);
        assert!(parsed(None).unwrap().parameters().is_empty());
    }

    #[test]
    fn malformed_parameters_are_rejected() {
        assert_eq!(
            parsed(Some("")).unwrap_err(),
            RuleError::MissingParameter { rule: "exists" }
        );
        for raw in ["-1", "1-", "abc", "2342323423234", "1-2342323423234", "40000", "4-2", "1-2-3"] {
            assert!(
                matches!(parsed(Some(raw)), Err(RuleError::InvalidParameter { .. })),
                "exists:{raw} should be rejected"
            );
        }
    }

    #[test]
    fn lenient_calls_only_count() {
        let rule = parsed(Some("1")).unwrap();
        for _ in 0..3 {
            assert!(rule.validate("x", "src", false).unwrap());
        }
        assert_eq!(rule.count(), 3);
        assert!(!rule.validate("", "src", true).unwrap());
    }

    #[test]
    fn strict_call_checks_bounds() {
        let cases = [(1, 1, 1, true), (1, 3, 0, false), (3, 6, 8, false), (3, 6, 6, true)];
        for (min, max, count, expected) in cases {
            let rule = ExistsRule::between(min, max);
            for _ in 0..count {
                rule.validate("", "", false).unwrap();
            }
            assert_eq!(rule.validate("", "", true).unwrap(), expected);
            assert_eq!(rule.count(), count);
        }
    }

    #[test]
    fn error_message_reports_count() {
        let rule = parsed(Some("1-2")).unwrap();
        assert_eq!(rule.error_message(), "exists:1-2 (found 0)");

        let rule = parsed(Some("1")).unwrap();
        rule.validate("a", "", false).unwrap();
        rule.validate("b", "", false).unwrap();
        assert_eq!(rule.error_message(), "exists:1 (found 2)");
    }

    #[test]
    fn copy_resets_count() {
        let rule = parsed(Some("2-5")).unwrap();
        rule.validate("a", "", false).unwrap();

        let copy = rule.copy();
        assert!(copy.is_exclusive());
        assert_eq!(copy.error_message(), "exists:2-5 (found 0)");
    }
}
