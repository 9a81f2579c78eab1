//! Small text types shared across the mapping crates.
//!
//! Sign-in treats a credential as missing when nothing is left after trimming, and
//! [`NonEmptyText`] is how that rule is enforced once rather than at each call site.

/// Rejection reasons for [`NonEmptyText`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("Text cannot be empty")]
    Empty,
}

/// Trimmed text with at least one character left.
///
/// `"  Jvara "` becomes `"Jvara"`; `"   "` is refused with [`TextError::Empty`]. The same
/// rule applies when a value is read back through serde.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and keeps it if anything remains.
    ///
    /// # Errors
    ///
    /// [`TextError::Empty`] for empty or whitespace-only input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
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
        let raw = String::deserialize(deserializer)?;
        NonEmptyText::new(&raw).map_err(serde::de::Error::custom)
    }
}
