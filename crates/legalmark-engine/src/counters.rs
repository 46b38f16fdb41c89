//! Successor and predecessor arithmetic for heading counters.
//!
//! Letter counters follow legal-drafting convention rather than any general
//! positional scheme: the successor of `Z` is `AA`, of `z` is `aa`. Roman
//! counters step by round-tripping through their integer value.

use crate::error::NumberingError;

/// The numeral family a heading level counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFamily {
    Arabic,
    UpperLetter,
    LowerLetter,
    UpperRoman,
    LowerRoman,
}

impl CounterFamily {
    /// The next rendered value after `value` under this family.
    pub fn advance(self, value: &str) -> Result<String, NumberingError> {
        match self {
            CounterFamily::Arabic => next_numbering(value),
            CounterFamily::UpperLetter | CounterFamily::LowerLetter => next_lettering(value),
            CounterFamily::UpperRoman => next_roman_upper(value),
            CounterFamily::LowerRoman => next_roman_lower(value),
        }
    }

    /// The rendered value preceding `value` under this family.
    ///
    /// Letter counters floor at `a`/`A` and are returned unchanged there;
    /// roman counters below `I` render empty; arabic counters may reach `0`.
    pub fn retreat(self, value: &str) -> Result<String, NumberingError> {
        match self {
            CounterFamily::Arabic => prev_numbering(value),
            CounterFamily::UpperLetter | CounterFamily::LowerLetter => prev_lettering(value),
            CounterFamily::UpperRoman => prev_roman_upper(value),
            CounterFamily::LowerRoman => prev_roman_lower(value),
        }
    }
}

/// Steps a letter counter forward: `a` → `b`, `Z` → `AA`, `aa` → `ab`.
pub fn next_lettering(previous: &str) -> Result<String, NumberingError> {
    let mut letters: Vec<u8> = previous.bytes().collect();
    let last = *letters.last().ok_or(NumberingError::EmptyLetterCounter)?;
    let end = letters.len() - 1;
    if last == b'Z' || last == b'z' {
        // Wrap the final letter back to the start of the alphabet and
        // double it, in keeping with typical legal enumeration.
        letters[end] = last - 25;
        letters.push(letters[end]);
    } else {
        letters[end] = last + 1;
    }
    Ok(letters.into_iter().map(char::from).collect())
}

/// Steps a letter counter backward, unwinding doubled letters: `AA` → `Z`.
pub fn prev_lettering(previous: &str) -> Result<String, NumberingError> {
    let mut letters: Vec<u8> = previous.bytes().collect();
    let last = *letters.last().ok_or(NumberingError::EmptyLetterCounter)?;
    let end = letters.len() - 1;
    if letters.len() >= 2 && last == letters[end - 1] {
        if last == b'A' || last == b'a' {
            letters[end - 1] = last + 25;
            letters.pop();
        } else {
            letters[end] = last - 1;
        }
    } else if last != b'A' && last != b'a' {
        letters[end] = last - 1;
    }
    Ok(letters.into_iter().map(char::from).collect())
}

pub fn next_numbering(previous: &str) -> Result<String, NumberingError> {
    let n = parse_arabic(previous)?;
    Ok((n + 1).to_string())
}

pub fn prev_numbering(previous: &str) -> Result<String, NumberingError> {
    let n = parse_arabic(previous)?;
    Ok((n - 1).to_string())
}

fn parse_arabic(value: &str) -> Result<i64, NumberingError> {
    value
        .trim()
        .parse()
        .map_err(|_| NumberingError::InvalidArabic(value.to_string()))
}

pub fn next_roman_upper(previous: &str) -> Result<String, NumberingError> {
    Ok(from_arabic_to_roman_upper(
        from_roman_to_arabic_upper(previous)? + 1,
    ))
}

pub fn prev_roman_upper(previous: &str) -> Result<String, NumberingError> {
    Ok(from_arabic_to_roman_upper(
        from_roman_to_arabic_upper(previous)? - 1,
    ))
}

pub fn next_roman_lower(previous: &str) -> Result<String, NumberingError> {
    Ok(from_arabic_to_roman_lower(
        from_roman_to_arabic_lower(previous)? + 1,
    ))
}

pub fn prev_roman_lower(previous: &str) -> Result<String, NumberingError> {
    Ok(from_arabic_to_roman_lower(
        from_roman_to_arabic_lower(previous)? - 1,
    ))
}

const ROMAN_VALUES: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Renders `arabic` as an upper-case roman numeral. Values below 1 render
/// as the empty string.
pub fn from_arabic_to_roman_upper(arabic: i64) -> String {
    if arabic < 1 {
        return String::new();
    }
    let mut remaining = arabic;
    let mut out = String::new();
    for (value, numeral) in ROMAN_VALUES {
        while remaining >= value {
            out.push_str(numeral);
            remaining -= value;
        }
    }
    out
}

pub fn from_arabic_to_roman_lower(arabic: i64) -> String {
    from_arabic_to_roman_upper(arabic).to_ascii_lowercase()
}

pub fn from_roman_to_arabic_upper(romans: &str) -> Result<i64, NumberingError> {
    roman_to_arabic(romans, |c| match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    })
}

pub fn from_roman_to_arabic_lower(romans: &str) -> Result<i64, NumberingError> {
    roman_to_arabic(romans, |c| match c {
        'i' => Some(1),
        'v' => Some(5),
        'x' => Some(10),
        'l' => Some(50),
        'c' => Some(100),
        'd' => Some(500),
        'm' => Some(1000),
        _ => None,
    })
}

fn roman_to_arabic(romans: &str, digit: fn(char) -> Option<i64>) -> Result<i64, NumberingError> {
    let mut arabic = 0;
    let mut last_digit = 1000;
    for roman in romans.chars() {
        let digit = digit(roman).ok_or_else(|| NumberingError::InvalidRoman(romans.to_string()))?;
        // Subtractive forms: a smaller digit before a larger one was
        // added on the previous step and must be backed out twice.
        if last_digit < digit {
            arabic -= 2 * last_digit;
        }
        last_digit = digit;
        arabic += digit;
    }
    Ok(arabic)
}
