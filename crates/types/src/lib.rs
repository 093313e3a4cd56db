//! Validated primitives shared across MediScan crates.
//!
//! Request fields arrive from browsers and terminals as loosely typed text. The types here are
//! the point where that text becomes something the analysis code can rely on:
//! - [`NonEmptyText`] for the free-text symptom description
//! - [`PatientAge`] for the patient's age in whole years

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating a [`PatientAge`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgeError {
    /// The input was empty or contained only whitespace
    #[error("Age cannot be empty")]
    Empty,
    /// The input was not a whole number
    #[error("Age must be a whole number, got {0:?}")]
    NotANumber(String),
    /// The number was outside the supported range
    #[error("Age must be between {min} and {max}, got {value}", min = PatientAge::MIN, max = PatientAge::MAX)]
    OutOfRange { value: i64 },
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the text in characters.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A patient's age in whole years, guaranteed to lie in `1..=120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientAge(u8);

impl PatientAge {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 120;

    /// Creates a `PatientAge` from a number of years.
    pub fn new(years: i64) -> Result<Self, AgeError> {
        if years < i64::from(Self::MIN) || years > i64::from(Self::MAX) {
            return Err(AgeError::OutOfRange { value: years });
        }
        // Range checked above, so the value fits in a u8.
        Ok(Self(years as u8))
    }

    /// Parses an age from text such as `"42"` or `" 42 "`.
    ///
    /// Browser forms submit the age as a string, so this is the usual entry point for
    /// request handling.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, AgeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AgeError::Empty);
        }
        let years: i64 = trimmed
            .parse()
            .map_err(|_| AgeError::NotANumber(trimmed.to_owned()))?;
        Self::new(years)
    }

    /// Returns the age in years.
    pub fn years(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PatientAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PatientAge {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for PatientAge {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientAge {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let years = i64::deserialize(deserializer)?;
        PatientAge::new(years).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  fever and cough \n").expect("valid text");
        assert_eq!(text.as_str(), "fever and cough");
        assert_eq!(text.char_count(), 15);
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty() {
        let err = serde_json::from_str::<NonEmptyText>("\"  \"").expect_err("should reject");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn age_parses_trimmed_numbers() {
        assert_eq!(PatientAge::parse(" 42 ").map(PatientAge::years), Ok(42));
        assert_eq!("1".parse::<PatientAge>().map(PatientAge::years), Ok(1));
        assert_eq!(PatientAge::parse("120").map(PatientAge::years), Ok(120));
    }

    #[test]
    fn age_rejects_empty_and_non_numeric() {
        assert_eq!(PatientAge::parse(""), Err(AgeError::Empty));
        assert_eq!(
            PatientAge::parse("forty"),
            Err(AgeError::NotANumber("forty".into()))
        );
        assert_eq!(
            PatientAge::parse("42.5"),
            Err(AgeError::NotANumber("42.5".into()))
        );
    }

    #[test]
    fn age_rejects_out_of_range() {
        assert_eq!(PatientAge::new(0), Err(AgeError::OutOfRange { value: 0 }));
        assert_eq!(
            PatientAge::parse("121"),
            Err(AgeError::OutOfRange { value: 121 })
        );
        assert_eq!(PatientAge::new(-3), Err(AgeError::OutOfRange { value: -3 }));
    }

    #[test]
    fn age_serializes_as_number() {
        let age = PatientAge::new(30).expect("valid age");
        assert_eq!(serde_json::to_string(&age).expect("serialize"), "30");
        let back: PatientAge = serde_json::from_str("30").expect("deserialize");
        assert_eq!(back, age);
        assert!(serde_json::from_str::<PatientAge>("500").is_err());
    }
}
