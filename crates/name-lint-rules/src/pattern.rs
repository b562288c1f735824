//! `regex` and `not_regex` rules.
//!
//! Patterns match the whole value. A pattern may reference segments of the
//! owning directory with `${N}`, counted from the end: in `src/components`,
//! `${0}` is `components` and `${1}` is `src`.

use name_lint_core::{Rule, RuleBox, RuleError};
use regex::Regex;
use tracing::trace;

const NEGATE: char = '!';

/// A full-match pattern, compiled once unless it references path segments.
#[derive(Debug, Clone, Default)]
struct Pattern {
    source: String,
    compiled: Option<Regex>,
}

impl Pattern {
    fn parse(rule: &'static str, source: &str) -> Result<Self, RuleError> {
        let compiled = if has_placeholders(source) {
            None
        } else {
            let regex = anchored(source).map_err(|e| RuleError::InvalidParameter {
                rule,
                parameter: source.to_string(),
                message: e.to_string(),
            })?;
            Some(regex)
        };

        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    fn is_match(&self, rule: &'static str, value: &str, path: &str) -> Result<bool, RuleError> {
        if let Some(regex) = &self.compiled {
            return Ok(regex.is_match(value));
        }

        let validation = |message: String| RuleError::Validation {
            rule,
            value: value.to_string(),
            message,
        };
        let source = substitute(&self.source, path)
            .map_err(|placeholder| {
                validation(format!("`{placeholder}` has no matching segment in `{path}`"))
            })?;
        trace!("{rule}: `{}` resolved to `{source}` in {path}", self.source);
        let regex = anchored(&source).map_err(|e| validation(e.to_string()))?;

        Ok(regex.is_match(value))
    }
}

fn anchored(source: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{source})$"))
}

/// Splits `${digits}` occurrences out of `source`, yielding the literal text
/// before each placeholder and the placeholder's index.
fn placeholders(source: &str) -> impl Iterator<Item = (&str, Option<(&str, &str)>)> {
    let mut rest = Some(source);
    std::iter::from_fn(move || {
        let current = rest?;
        let mut offset = 0;
        while let Some(found) = current[offset..].find("${") {
            let start = offset + found;
            let after = &current[start + 2..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 && after[digits..].starts_with('}') {
                rest = Some(&after[digits + 1..]);
                let token = &current[start..start + digits + 3];
                return Some((&current[..start], Some((token, &after[..digits]))));
            }
            offset = start + 2;
        }
        rest = None;
        Some((current, None))
    })
}

fn has_placeholders(source: &str) -> bool {
    placeholders(source).any(|(_, placeholder)| placeholder.is_some())
}

/// Replaces every placeholder with the regex-escaped path segment it names.
/// Returns the first placeholder without a segment as the error.
fn substitute(source: &str, path: &str) -> Result<String, String> {
    let segments: Vec<&str> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    };

    let mut out = String::with_capacity(source.len());
    for (literal, placeholder) in placeholders(source) {
        out.push_str(literal);
        let Some((token, digits)) = placeholder else {
            continue;
        };
        let segment = digits
            .parse::<usize>()
            .ok()
            .and_then(|n| segments.len().checked_sub(n)?.checked_sub(1))
            .map(|i| segments[i])
            .ok_or_else(|| token.to_string())?;
        out.push_str(&regex::escape(segment));
    }
    Ok(out)
}

fn required<'a>(rule: &'static str, params: Option<&'a str>) -> Result<&'a str, RuleError> {
    match params {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(RuleError::MissingParameter { rule }),
    }
}

/// Passes when the whole value matches the pattern.
///
/// A leading `!` inverts the result.
#[derive(Debug, Clone, Default)]
pub struct RegexRule {
    pattern: Pattern,
    negate: bool,
}

impl RegexRule {
    /// Creates an unconfigured rule. A pattern must be set before use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn display(&self) -> String {
        if self.negate {
            format!("{NEGATE}{}", self.pattern.source)
        } else {
            self.pattern.source.clone()
        }
    }
}

impl Rule for RegexRule {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn description(&self) -> &'static str {
        "Whole name matches a pattern; `!` negates, `${N}` inserts a path segment"
    }

    fn set_parameters(&mut self, params: Option<&str>) -> Result<(), RuleError> {
        let raw = required(self.name(), params)?;
        let (negate, source) = match raw.strip_prefix(NEGATE) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        if source.is_empty() {
            return Err(RuleError::MissingParameter { rule: self.name() });
        }

        self.pattern = Pattern::parse(self.name(), source)?;
        self.negate = negate;
        Ok(())
    }

    fn parameters(&self) -> Vec<String> {
        vec![self.display()]
    }

    fn validate(&self, value: &str, path: &str, _strict: bool) -> Result<bool, RuleError> {
        let matched = self.pattern.is_match(self.name(), value, path)?;
        Ok(matched != self.negate)
    }

    fn error_message(&self) -> String {
        format!("{}:{}", self.name(), self.display())
    }

    fn copy(&self) -> RuleBox {
        Box::new(self.clone())
    }
}

/// Passes when the whole value does not match the pattern.
#[derive(Debug, Clone, Default)]
pub struct NotRegexRule {
    pattern: Pattern,
}

impl NotRegexRule {
    /// Creates an unconfigured rule. A pattern must be set before use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rule for NotRegexRule {
    fn name(&self) -> &'static str {
        "not_regex"
    }

    fn description(&self) -> &'static str {
        "Whole name does not match a pattern"
    }

    fn set_parameters(&mut self, params: Option<&str>) -> Result<(), RuleError> {
        let source = required(self.name(), params)?;
        self.pattern = Pattern::parse(self.name(), source)?;
        Ok(())
    }

    fn parameters(&self) -> Vec<String> {
        vec![self.pattern.source.clone()]
    }

    fn validate(&self, value: &str, path: &str, _strict: bool) -> Result<bool, RuleError> {
        Ok(!self.pattern.is_match(self.name(), value, path)?)
    }

    fn error_message(&self) -> String {
        format!("{}:{}", self.name(), self.pattern.source)
    }

    fn copy(&self) -> RuleBox {
        Box::new(self.clone())
    }
}
