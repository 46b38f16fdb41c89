//! The numbering walk.
//!
//! Walks the block's segments in order, rendering each heading label,
//! advancing and resetting counters as the outline descends and ascends,
//! binding cross-references as it goes, and collating the rendered
//! segments back into one block with every `|name|` resolved.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::NumberingError;

use super::block::Segment;
use super::table::{HeaderTable, LevelStyle};

/// Back-reference directives recognized at the end of a prefix template,
/// longest first. `preval` and `pre (` do not end in bare `pre`, so the
/// match is unambiguous.
const BACKREF_KEYWORDS: [&str; 3] = ["pre (", "preval", "pre"];

fn backref_keyword(prefix: &str) -> Option<&'static str> {
    BACKREF_KEYWORDS.iter().copied().find(|kw| prefix.ends_with(kw))
}

fn crossref_pattern(style: LevelStyle) -> &'static Regex {
    static LEGACY: OnceLock<Regex> = OnceLock::new();
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    match style {
        LevelStyle::Legacy => LEGACY
            .get_or_init(|| Regex::new(r"\Al+\. \|(.+?)\|").expect("invalid crossref pattern")),
        LevelStyle::Numbered => NUMBERED.get_or_init(|| {
            Regex::new(r"\Al[0-9]+\. \|(.+?)\|").expect("invalid crossref pattern")
        }),
    }
}

/// One pass over the segments of a block.
pub struct NumberingWalk<'t> {
    table: &'t mut HeaderTable,
    crossrefs: HashMap<String, String>,
}

impl<'t> NumberingWalk<'t> {
    pub fn new(table: &'t mut HeaderTable) -> Self {
        Self {
            table,
            crossrefs: HashMap::new(),
        }
    }

    /// Renders every segment and returns the collated block text.
    pub fn run(mut self, segments: &[Segment]) -> Result<String, NumberingError> {
        let levels: Vec<Option<usize>> = segments
            .iter()
            .map(|segment| {
                segment
                    .leader
                    .as_deref()
                    .and_then(|leader| self.table.level_style().parse_level(leader))
            })
            .collect();

        let mut rendered = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let text = match (segment.leader.as_deref(), levels[i]) {
                (Some(leader), Some(level)) => self.render_segment(leader, &segment.text, level)?,
                _ => segment.text.clone(),
            };
            rendered.push(text);

            if let Some(level) = levels[i] {
                let next = levels.get(i + 1).copied().flatten().unwrap_or(level);
                self.advance_position(level, next)?;
            }
        }

        Ok(collate(&rendered, &self.crossrefs))
    }

    /// Builds the label for one heading segment and substitutes it for the
    /// leader, indenting every line of the segment to the level's depth.
    fn render_segment(
        &mut self,
        leader: &str,
        text: &str,
        level: usize,
    ) -> Result<String, NumberingError> {
        let Some(header) = self.table.get(level) else {
            // Trigger with no configured level: leave the segment alone.
            return Ok(text.to_string());
        };
        let indent = " ".repeat(header.indent);

        let label = if backref_keyword(header.prefix.trim()).is_some() {
            assemble_backref(self.table, level, false)?
        } else {
            format!("{}{}{}", header.prefix, header.current, header.suffix)
        };

        // The span to replace is normally the bare trigger, but a
        // cross-reference extends it so the |name| marker is consumed.
        let mut replaced_span = leader.to_string();
        if let Some(caps) = crossref_pattern(self.table.level_style()).captures(text) {
            let bound = label.trim();
            let bound = bound.strip_suffix('.').unwrap_or(bound);
            self.crossrefs.insert(caps[1].to_string(), bound.to_string());
            replaced_span = caps[0].to_string();
        }

        let mut segment = text.replacen(&replaced_span, &label, 1);
        segment = segment.replace("  ", " ");
        if segment.contains("\n\n") {
            segment = segment.replace("\n\n", &format!("\n\n{indent}"));
        }
        Ok(format!("{indent}{segment}"))
    }

    /// Applies the transition rule after rendering a segment at `rendered`,
    /// where `next` is the depth of the following segment.
    ///
    /// An ascent resets every level deeper than the one returned to, except
    /// that a no-reset level advances instead when it is the level just
    /// rendered (and is otherwise left alone). Staying level or descending
    /// advances only the rendered level.
    fn advance_position(&mut self, rendered: usize, next: usize) -> Result<(), NumberingError> {
        if next < rendered {
            for (_, header) in self.table.juniors_of_mut(next) {
                if header.reset_on_ascent {
                    header.current = header.initial.clone();
                } else if header.level == rendered {
                    header.current = header.family.advance(&header.current)?;
                }
            }
        } else if let Some(header) = self.table.get_mut(rendered) {
            header.current = header.family.advance(&header.current)?;
        }
        Ok(())
    }
}

/// Composes a label that quotes the parent level's current value, as
/// requested by a `pre`, `pre (` or `preval` prefix.
///
/// The parent's counter has already advanced past the position being
/// rendered (the walk advanced it on descent), so its value is stepped
/// back before quoting. `nested` marks recursive calls for ancestors whose
/// own rendered value must be stepped back for the same reason. Recursion
/// runs strictly up the parent chain, so depth is bounded by the table.
fn assemble_backref(
    table: &HeaderTable,
    level: usize,
    nested: bool,
) -> Result<String, NumberingError> {
    let this = table
        .get(level)
        .ok_or(NumberingError::MissingParent(level))?;
    let parent_level = level
        .checked_sub(1)
        .ok_or(NumberingError::MissingParent(level))?;
    let parent = table
        .get(parent_level)
        .ok_or(NumberingError::MissingParent(level))?;

    let this_prefix = this.prefix.trim();
    let parent_prefix = parent.prefix.trim();

    // Literal lead-in text ahead of the directive, outermost call only.
    let mut composed = String::new();
    if !nested
        && let Some(keyword) = backref_keyword(this_prefix)
        && this_prefix != keyword
    {
        composed = this_prefix.replacen(keyword, "", 1);
    }

    if backref_keyword(parent_prefix).is_some() {
        composed.push_str(&assemble_backref(table, parent_level, true)?);
    } else {
        composed.push_str(&parent.family.retreat(&parent.current)?);
    }

    let own_value = if nested {
        this.family.retreat(&this.current)?
    } else {
        this.current.clone()
    };

    composed.push_str(&parent.suffix);
    let mut composed = composed.trim().to_string();

    if this_prefix.ends_with("pre (") {
        composed.push('(');
        composed.push_str(&own_value);
        composed.push_str(&this.suffix);
    } else if this_prefix.ends_with("preval") {
        composed = composed.replace('.', "");
        composed.push('0');
        composed.push_str(&own_value);
        composed.push_str(&this.suffix);
    } else {
        composed.push_str(&own_value);
        composed.push_str(&this.suffix);
    }

    // Concatenation artifacts from the wrapped variants.
    composed = composed.replace(".(", "(");
    composed = composed.replace(". (", "(");
    composed = composed.replace(") )(", ")(");

    Ok(composed)
}

/// Joins the rendered segments and resolves every remaining `|name|`.
/// Substitution after the whole walk is what lets forward references work.
fn collate(rendered: &[String], crossrefs: &HashMap<String, String>) -> String {
    let mut block = rendered.join("\n\n");
    for (name, label) in crossrefs {
        block = block.replace(&format!("|{name}|"), label);
    }
    block
}
