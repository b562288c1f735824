//! Case-style rules: pure per-character scans over the value.
//!
//! Digits are `0`-`9`. Other numeric characters such as `½` or `²` are
//! neither digits nor letters and fail every style except `lowercase`.

use name_lint_core::{Rule, RuleBox, RuleError};

/// A naming case style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStyle {
    /// `camelCase`
    Camel,
    /// `PascalCase`
    Pascal,
    /// `PascalCase` tolerating acronym runs of up to five capitals (`NASAImages`).
    PascalAcronym,
    /// `snake_case`
    Snake,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnake,
    /// `kebab-case`
    Kebab,
    /// `flatcase`: lowercase letters and digits, never empty.
    Flat,
    /// `lowercase`: no uppercase letters, anything else allowed.
    Lower,
    /// `point.case`
    Point,
    /// `UPPERCASE123`: uppercase letters and digits.
    UppercaseDigit,
}

impl CaseStyle {
    /// Every style.
    pub const ALL: [Self; 10] = [
        Self::Camel,
        Self::Pascal,
        Self::PascalAcronym,
        Self::Snake,
        Self::ScreamingSnake,
        Self::Kebab,
        Self::Flat,
        Self::Lower,
        Self::Point,
        Self::UppercaseDigit,
    ];

    /// Canonical rule name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Camel => "camelcase",
            Self::Pascal => "pascalcase",
            Self::PascalAcronym => "pascalcaseacronym",
            Self::Snake => "snakecase",
            Self::ScreamingSnake => "screamingsnakecase",
            Self::Kebab => "kebabcase",
            Self::Flat => "flatcase",
            Self::Lower => "lowercase",
            Self::Point => "pointcase",
            Self::UppercaseDigit => "uppercasedigit",
        }
    }

    /// Conventional spellings.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Camel => &["camelCase"],
            Self::Pascal => &["PascalCase"],
            Self::PascalAcronym => &["PascalCaseAcronym"],
            Self::Snake => &["snake_case"],
            Self::ScreamingSnake => &["SCREAMING_SNAKE_CASE"],
            Self::Kebab => &["kebab-case"],
            Self::Point => &["point.case"],
            Self::Flat | Self::Lower | Self::UppercaseDigit => &[],
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Camel => "Lowercase first letter, words start with an uppercase letter",
            Self::Pascal => "Every word starts with an uppercase letter",
            Self::PascalAcronym => "PascalCase allowing runs of up to five capitals",
            Self::Snake => "Lowercase letters and digits separated by `_`",
            Self::ScreamingSnake => "Uppercase letters and digits separated by `_`",
            Self::Kebab => "Lowercase letters and digits separated by `-`",
            Self::Flat => "Lowercase letters and digits, no separators",
            Self::Lower => "No uppercase letters",
            Self::Point => "Lowercase letters and digits separated by `.`",
            Self::UppercaseDigit => "Uppercase letters and digits only",
        }
    }

    /// Returns `true` if `value` is written in this style.
    #[must_use]
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Camel => humps(value, false),
            Self::Pascal => humps(value, true),
            Self::PascalAcronym => pascal_acronym(value),
            Self::Snake => separated(value, Some('_'), char::is_lowercase),
            Self::ScreamingSnake => separated(value, Some('_'), char::is_uppercase),
            Self::Kebab => separated(value, Some('-'), char::is_lowercase),
            Self::Point => separated(value, Some('.'), char::is_lowercase),
            Self::Flat => !value.is_empty() && separated(value, None, char::is_lowercase),
            Self::Lower => !value.chars().any(|c| c.is_alphabetic() && !c.is_lowercase()),
            Self::UppercaseDigit => value
                .chars()
                .all(|c| is_digit(c) || (c.is_alphabetic() && c.is_uppercase())),
        }
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Letters of one case, digits, and an optional separator.
fn separated(value: &str, separator: Option<char>, case: fn(char) -> bool) -> bool {
    value
        .chars()
        .all(|c| Some(c) == separator || is_digit(c) || (c.is_alphabetic() && case(c)))
}

/// camelCase / PascalCase.
///
/// An uppercase letter must follow a lowercase letter or a digit; a second
/// capital is tolerated right after a lowercase-uppercase pair (`ssrVFor`).
fn humps(value: &str, pascal: bool) -> bool {
    let chars: Vec<char> = value.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphabetic() && !is_digit(c) {
            return false;
        }
        if i == 0 {
            if pascal && c.is_lowercase() || !pascal && c.is_uppercase() {
                return false;
            }
            continue;
        }
        if !c.is_uppercase() {
            continue;
        }

        let prev = chars[i - 1];
        if is_digit(prev) {
            continue;
        }
        if i >= 2 && prev.is_uppercase() && chars[i - 2].is_lowercase() {
            continue;
        }
        if !prev.is_lowercase() {
            return false;
        }
    }

    true
}

fn pascal_acronym(value: &str) -> bool {
    let mut upper_streak = 0;

    for (i, c) in value.chars().enumerate() {
        if !c.is_alphabetic() && !is_digit(c) {
            return false;
        }
        if i == 0 && c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            upper_streak += 1;
            if upper_streak > 5 {
                return false;
            }
        } else {
            upper_streak = 0;
        }
    }

    true
}

/// A stateless rule checking one [`CaseStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseRule {
    style: CaseStyle,
}

impl CaseRule {
    /// Creates a rule for the given style.
    #[must_use]
    pub fn new(style: CaseStyle) -> Self {
        Self { style }
    }

    /// Returns the style checked by this rule.
    #[must_use]
    pub fn style(&self) -> CaseStyle {
        self.style
    }
}

impl Rule for CaseRule {
    fn name(&self) -> &'static str {
        self.style.name()
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.style.aliases()
    }

    fn description(&self) -> &'static str {
        self.style.description()
    }

    fn validate(&self, value: &str, _path: &str, _strict: bool) -> Result<bool, RuleError> {
        Ok(self.style.matches(value))
    }

    fn copy(&self) -> RuleBox {
        Box::new(*self)
    }
}
