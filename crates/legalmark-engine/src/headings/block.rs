//! Fenced outline block extraction and segmentation.
//!
//! A document carries at most one outline block, delimited by lines of
//! three or more backticks. The closing fence is optional; an unterminated
//! block runs to the end of the document.

use std::sync::OnceLock;

use regex::Regex;

/// The document split around its fenced outline block. Fence lines belong
/// to neither side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock<'a> {
    pub before: &'a str,
    pub body: &'a str,
    pub after: &'a str,
}

/// One outline line (plus folded continuation lines) from the block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The leading trigger token, when the segment started from a heading
    /// line. Continuation lines ahead of the first heading have none and
    /// pass through the walk unrendered.
    pub leader: Option<String>,
    pub text: String,
}

fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?sm)(^`{3,}[ \t]*\n?)(.*?\n?)(^`{3,}[ \t]*\n?|\z)")
            .expect("invalid block pattern")
    })
}

fn legacy_leader_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\Al+\.").expect("invalid leader pattern"))
}

fn numbered_leader_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\Al[0-9]+\.").expect("invalid leader pattern"))
}

/// Locates the fenced outline block. `None` means the engine has nothing
/// to do and the document passes through unchanged.
pub fn extract(contents: &str) -> Option<ExtractedBlock<'_>> {
    let caps = block_pattern().captures(contents)?;
    let whole = caps.get(0)?;
    let body = caps.get(2).map_or("", |m| m.as_str());
    Some(ExtractedBlock {
        before: &contents[..whole.start()],
        body,
        after: &contents[whole.end()..],
    })
}

/// Breaks the block body into segments, one per heading line.
///
/// Blank lines are dropped. A non-heading line folds into the preceding
/// segment separated by a blank line, keeping multi-line clause bodies
/// attached to their heading.
pub fn split(body: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for line in body.split('\n') {
        let leader = legacy_leader_pattern()
            .find(line)
            .or_else(|| numbered_leader_pattern().find(line));
        if let Some(m) = leader {
            segments.push(Segment {
                leader: Some(m.as_str().trim().to_string()),
                text: line.to_string(),
            });
        } else if line.trim().is_empty() {
            continue;
        } else if let Some(last) = segments.last_mut() {
            last.text.push_str("\n\n");
            last.text.push_str(line);
        } else {
            segments.push(Segment {
                leader: None,
                text: line.to_string(),
            });
        }
    }
    segments
}
