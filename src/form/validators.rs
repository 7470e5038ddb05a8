use regex::Regex;
use std::sync::LazyLock;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// The only message a failing field ever shows.
pub const REQUIRED_FIELD: &str = "Required Field";

static TEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Strips whitespace plus U+FEFF, which `str::trim` keeps.
fn trim_blank(value: &str) -> &str {
    value.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{FEFF}')
}

/// Length in UTF-16 code units, so astral characters count twice.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if trim_blank(value).is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Length check on the trimmed value, counted in UTF-16 code units.
pub fn min_trimmed_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if utf16_len(trim_blank(value)) < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn matches(pattern: &'static LazyLock<Regex>, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if pattern.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Exactly ten ASCII digits, no separators or surrounding whitespace.
pub fn phone(message: impl Into<String>) -> Validator {
    matches(&TEN_DIGITS, message)
}

pub fn email(message: impl Into<String>) -> Validator {
    matches(&EMAIL, message)
}
