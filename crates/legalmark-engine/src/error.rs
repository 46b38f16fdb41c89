use thiserror::Error;

/// Internal-consistency failures of a numbering pass.
///
/// These indicate a contract violation between the header table and the
/// walk (for example a back-reference composed onto a level that was never
/// configured), never a malformed input document. Unrecognized style
/// strings and unknown triggers degrade silently instead; those are
/// documented defaults, not failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NumberingError {
    #[error("counter value {0:?} is not a valid arabic numeral")]
    InvalidArabic(String),
    #[error("counter value {0:?} is not a valid roman numeral")]
    InvalidRoman(String),
    #[error("letter counter is empty")]
    EmptyLetterCounter,
    #[error("level {0} back-references a parent level that is not configured")]
    MissingParent(usize),
}
