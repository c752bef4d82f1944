//! One-way derivation of pseudonymous identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::salt::DailySalt;

/// Validation errors for [`Pseudonym`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PseudonymValidationError {
    /// The string had an incorrect length.
    #[error("pseudonym must be {expected} characters, got {actual}")]
    InvalidLength {
        /// Expected number of characters.
        expected: usize,
        /// Actual number of characters.
        actual: usize,
    },
    /// The string contained a non-lowercase-hex character.
    #[error("pseudonym must be lowercase hexadecimal")]
    NotLowercaseHex,
}

/// Hex-encoded SHA-256 digest stored in place of a raw anonymous identifier.
///
/// Always 64 lowercase hex characters. For a fixed raw identifier the value
/// is stable within one calendar day and changes when the salt rotates, so
/// linkability is bounded to a day. The mapping back to the raw identifier
/// is never recorded anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pseudonym(String);

/// Digest length in hex characters.
const PSEUDONYM_LEN: usize = 64;

impl Pseudonym {
    /// Validate and construct a [`Pseudonym`] from its string form.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the input is not exactly 64 lowercase
    /// hexadecimal characters.
    pub fn new(value: impl Into<String>) -> Result<Self, PseudonymValidationError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length != PSEUDONYM_LEN {
            return Err(PseudonymValidationError::InvalidLength {
                expected: PSEUDONYM_LEN,
                actual: length,
            });
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            return Err(PseudonymValidationError::NotLowercaseHex);
        }
        Ok(Self(raw))
    }

    /// Borrow the pseudonym as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Pseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Pseudonym> for String {
    fn from(value: Pseudonym) -> Self {
        value.0
    }
}

impl TryFrom<String> for Pseudonym {
    type Error = PseudonymValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Derive the pseudonym stored in place of `anonymous_id`.
///
/// SHA-256 over the byte concatenation of the identifier and the salt, in
/// that order, with no separator. Pure and deterministic: identical inputs
/// always yield the identical digest, and the raw identifier cannot be
/// recovered from the output.
pub fn pseudonymize(anonymous_id: &str, salt: &DailySalt) -> Pseudonym {
    let mut hasher = Sha256::new();
    hasher.update(anonymous_id.as_bytes());
    hasher.update(salt.as_str().as_bytes());
    Pseudonym(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn salt(value: &str) -> DailySalt {
        DailySalt::new(value).expect("valid salt")
    }

    #[test]
    fn derivation_is_deterministic() {
        let s = salt("test-salt");
        assert_eq!(pseudonymize("anon_12345", &s), pseudonymize("anon_12345", &s));
    }

    #[test]
    fn distinct_salts_yield_distinct_pseudonyms() {
        let first = pseudonymize("anon_12345", &salt("salt-one"));
        let second = pseudonymize("anon_12345", &salt("salt-two"));
        assert_ne!(first, second);
    }

    #[test]
    fn distinct_identifiers_yield_distinct_pseudonyms() {
        let s = salt("test-salt");
        assert_ne!(pseudonymize("anon_1", &s), pseudonymize("anon_2", &s));
    }

    #[test]
    fn digest_matches_the_unseparated_concatenation() {
        // The identifier and salt are hashed back to back with no separator,
        // so streaming the two parts must equal hashing the joined buffer.
        let s = salt("test-salt");
        let expected = hex::encode(Sha256::digest("visitor-42test-salt".as_bytes()));
        assert_eq!(pseudonymize("visitor-42", &s).as_str(), expected);
    }

    #[test]
    fn output_is_64_lowercase_hex_chars() {
        let pseudonym = pseudonymize("visitor-42", &salt("test-salt"));
        assert_eq!(pseudonym.as_str().len(), 64);
        assert!(
            pseudonym
                .as_str()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    fn validation_rejects_wrong_lengths(#[case] value: &str) {
        let err = Pseudonym::new(value).expect_err("rejected");
        assert!(matches!(
            err,
            PseudonymValidationError::InvalidLength { expected: 64, .. }
        ));
    }

    #[test]
    fn validation_rejects_uppercase_hex() {
        let value = "A".repeat(64);
        let err = Pseudonym::new(value).expect_err("rejected");
        assert_eq!(err, PseudonymValidationError::NotLowercaseHex);
    }

    #[test]
    fn serde_round_trips_as_a_plain_string() {
        let pseudonym = pseudonymize("visitor-42", &salt("test-salt"));
        let json = serde_json::to_string(&pseudonym).expect("serialize");
        let parsed: Pseudonym = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(pseudonym, parsed);
    }
}
