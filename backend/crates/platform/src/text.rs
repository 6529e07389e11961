//! Text Normalization and Character Classes
//!
//! Unicode normalization, case folding and the ASCII character classes
//! used by string constraints.

use unicode_normalization::UnicodeNormalization;

/// Unicode normalization form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    #[default]
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

/// Letter case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
}

impl Case {
    /// Convert `input` to this case
    pub fn apply(&self, input: &str) -> String {
        match self {
            Case::Upper => input.to_uppercase(),
            Case::Lower => input.to_lowercase(),
        }
    }
}

/// Apply Unicode normalization
pub fn normalize(input: &str, form: NormalizationForm) -> String {
    match form {
        NormalizationForm::Nfc => input.nfc().collect(),
        NormalizationForm::Nfd => input.nfd().collect(),
        NormalizationForm::Nfkc => input.nfkc().collect(),
        NormalizationForm::Nfkd => input.nfkd().collect(),
    }
}

/// Count Unicode code points (not bytes)
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

/// Only `a-z`, `A-Z` and `0-9`
pub fn is_alphanum(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Only `a-z`, `A-Z`, `0-9` and `_`
pub fn is_token(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
