//! Style classification for heading level definitions.
//!
//! A level's parameter value (`"A."`, `"(iv)"`, `"Section 1."`) encodes the
//! counter family, the punctuation wrapping, the starting value, and any
//! literal prefix text in one string. Classification runs an ordered matcher
//! cascade: roman numerals are tested before letters so that styles such as
//! `"I."` or `"(iv)"` are not taken for letter counters.

use std::sync::OnceLock;

use regex::Regex;

use crate::counters::CounterFamily;

/// How the rendered counter is punctuated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStyle {
    /// `1.`, `A.`, `iv.`
    TrailingPeriod,
    /// `(1)`, `(A)`, `(iv)`
    Parenthesized,
}

/// The decoded parts of one level's style-definition string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpec {
    pub family: CounterFamily,
    pub wrap: WrapStyle,
    /// Literal text placed before the counter. May itself carry a
    /// back-reference directive (`pre`, `pre (`, `preval`).
    pub prefix: String,
    /// Starting (and reset) counter value, as rendered.
    pub initial: String,
    /// Literal text placed after the counter.
    pub suffix: String,
}

struct Matcher {
    family: CounterFamily,
    wrap: WrapStyle,
    pattern: Regex,
}

fn matchers() -> &'static [Matcher; 10] {
    static MATCHERS: OnceLock<[Matcher; 10]> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        let matcher = |family, wrap, pattern: &str| Matcher {
            family,
            wrap,
            pattern: Regex::new(pattern).expect("invalid style pattern"),
        };
        [
            matcher(
                CounterFamily::UpperRoman,
                WrapStyle::TrailingPeriod,
                r"([IVXLCDM]+)\.\z",
            ),
            matcher(
                CounterFamily::UpperRoman,
                WrapStyle::Parenthesized,
                r"\(([IVXLCDM]+)\)\z",
            ),
            matcher(
                CounterFamily::LowerRoman,
                WrapStyle::TrailingPeriod,
                r"([ivxlcdm]+)\.\z",
            ),
            matcher(
                CounterFamily::LowerRoman,
                WrapStyle::Parenthesized,
                r"\(([ivxlcdm]+)\)\z",
            ),
            matcher(
                CounterFamily::UpperLetter,
                WrapStyle::TrailingPeriod,
                r"([A-Z]+)\.\z",
            ),
            matcher(
                CounterFamily::UpperLetter,
                WrapStyle::Parenthesized,
                r"\(([A-Z]+)\)\z",
            ),
            matcher(
                CounterFamily::LowerLetter,
                WrapStyle::TrailingPeriod,
                r"([a-z]+)\.\z",
            ),
            matcher(
                CounterFamily::LowerLetter,
                WrapStyle::Parenthesized,
                r"\(([a-z]+)\)\z",
            ),
            matcher(
                CounterFamily::Arabic,
                WrapStyle::Parenthesized,
                r"\(([0-9]+)\)\z",
            ),
            matcher(
                CounterFamily::Arabic,
                WrapStyle::TrailingPeriod,
                r"([0-9]+)\.\z",
            ),
        ]
    })
}

/// Classifies one style-definition string.
///
/// The first matcher to hit decides the family and wrapping; the text before
/// the matched tail becomes the prefix (with an opening parenthesis appended
/// for wrapped styles, so prefix + value + suffix reproduces the brackets).
/// An unrecognized string falls back to arabic numbering from 1 with a
/// trailing period.
pub fn classify(style: &str) -> StyleSpec {
    for matcher in matchers() {
        if let Some(caps) = matcher.pattern.captures(style) {
            let tail_start = caps.get(0).map_or(style.len(), |m| m.start());
            let mut prefix = style[..tail_start].to_string();
            let suffix = match matcher.wrap {
                WrapStyle::TrailingPeriod => ". ",
                WrapStyle::Parenthesized => {
                    prefix.push('(');
                    ") "
                }
            };
            return StyleSpec {
                family: matcher.family,
                wrap: matcher.wrap,
                prefix,
                initial: caps[1].to_string(),
                suffix: suffix.to_string(),
            };
        }
    }
    StyleSpec {
        family: CounterFamily::Arabic,
        wrap: WrapStyle::TrailingPeriod,
        prefix: String::new(),
        initial: "1".to_string(),
        suffix: ". ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("I.", CounterFamily::UpperRoman, WrapStyle::TrailingPeriod, "", "I", ". ")]
    #[case("(IV)", CounterFamily::UpperRoman, WrapStyle::Parenthesized, "(", "IV", ") ")]
    #[case("i.", CounterFamily::LowerRoman, WrapStyle::TrailingPeriod, "", "i", ". ")]
    #[case("(i)", CounterFamily::LowerRoman, WrapStyle::Parenthesized, "(", "i", ") ")]
    #[case("A.", CounterFamily::UpperLetter, WrapStyle::TrailingPeriod, "", "A", ". ")]
    #[case("(A)", CounterFamily::UpperLetter, WrapStyle::Parenthesized, "(", "A", ") ")]
    #[case("a.", CounterFamily::LowerLetter, WrapStyle::TrailingPeriod, "", "a", ". ")]
    #[case("(a)", CounterFamily::LowerLetter, WrapStyle::Parenthesized, "(", "a", ") ")]
    #[case("(1)", CounterFamily::Arabic, WrapStyle::Parenthesized, "(", "1", ") ")]
    #[case("1.", CounterFamily::Arabic, WrapStyle::TrailingPeriod, "", "1", ". ")]
    fn ten_style_grid(
        #[case] style: &str,
        #[case] family: CounterFamily,
        #[case] wrap: WrapStyle,
        #[case] prefix: &str,
        #[case] initial: &str,
        #[case] suffix: &str,
    ) {
        let spec = classify(style);
        assert_eq!(spec.family, family);
        assert_eq!(spec.wrap, wrap);
        assert_eq!(spec.prefix, prefix);
        assert_eq!(spec.initial, initial);
        assert_eq!(spec.suffix, suffix);
    }

    /// Roman-lookalike letters must classify as roman, not letter counters.
    #[rstest]
    #[case("x.", CounterFamily::LowerRoman)]
    #[case("C.", CounterFamily::UpperRoman)]
    #[case("(m)", CounterFamily::LowerRoman)]
    #[case("b.", CounterFamily::LowerLetter)]
    #[case("(G)", CounterFamily::UpperLetter)]
    fn roman_takes_priority_over_letters(#[case] style: &str, #[case] family: CounterFamily) {
        assert_eq!(classify(style).family, family);
    }

    #[test]
    fn leading_text_becomes_prefix() {
        let spec = classify("Section 1.");
        assert_eq!(spec.family, CounterFamily::Arabic);
        assert_eq!(spec.prefix, "Section ");
        assert_eq!(spec.initial, "1");

        let spec = classify("pre (a)");
        assert_eq!(spec.family, CounterFamily::LowerLetter);
        assert_eq!(spec.prefix, "pre (");
        assert_eq!(spec.initial, "a");
        assert_eq!(spec.suffix, ") ");
    }

    #[test]
    fn starting_value_is_preserved() {
        assert_eq!(classify("3.").initial, "3");
        assert_eq!(classify("(vii)").initial, "vii");
        assert_eq!(classify("D.").initial, "D");
    }

    /// Unrecognized styles default to arabic numbering from 1.
    #[test]
    fn unrecognized_style_defaults_to_arabic() {
        for style in ["", "??", "1:", "heading"] {
            let spec = classify(style);
            assert_eq!(spec.family, CounterFamily::Arabic);
            assert_eq!(spec.wrap, WrapStyle::TrailingPeriod);
            assert_eq!(spec.prefix, "");
            assert_eq!(spec.initial, "1");
            assert_eq!(spec.suffix, ". ");
        }
    }
}
