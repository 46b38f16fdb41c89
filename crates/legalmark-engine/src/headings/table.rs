//! Header table construction from the parameter mapping.
//!
//! The table is built once per numbering pass, mutated in place while the
//! walk advances and resets counters, and discarded afterwards. Levels are
//! keyed by depth, so junior-level scans are ordered range queries rather
//! than trigger-string comparisons.

use std::collections::{BTreeMap, HashMap, btree_map};

use crate::counters::CounterFamily;

use super::style::{self, WrapStyle};

/// Trigger naming convention for heading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStyle {
    /// `l.`, `ll.`, `lll.` — depth is the number of repeated `l`s.
    Legacy,
    /// `l1.`, `l2.`, `l3.` — depth is the numeric suffix.
    Numbered,
}

impl LevelStyle {
    /// The trigger token marking `level` under this convention.
    pub fn trigger(self, level: usize) -> String {
        match self {
            LevelStyle::Legacy => format!("{}.", "l".repeat(level)),
            LevelStyle::Numbered => format!("l{level}."),
        }
    }

    /// Decodes a trigger token back to its depth.
    pub fn parse_level(self, token: &str) -> Option<usize> {
        let body = token.strip_suffix('.')?;
        match self {
            LevelStyle::Legacy => body.bytes().all(|b| b == b'l').then_some(body.len()),
            LevelStyle::Numbered => body.strip_prefix('l')?.parse().ok(),
        }
    }
}

/// One configured outline depth: the live counter plus everything needed
/// to render and advance it.
#[derive(Debug, Clone)]
pub struct Header {
    /// The leader token that marks this level in text.
    pub trigger: String,
    /// Depth, 1-based.
    pub level: usize,
    pub family: CounterFamily,
    pub wrap: WrapStyle,
    /// Spaces prepended to every line of the rendered segment.
    pub indent: usize,
    /// When false, an ascent past this level advances its counter (if it
    /// was the level just rendered) instead of resetting it.
    pub reset_on_ascent: bool,
    /// The value the counter starts at and resets to.
    pub initial: String,
    /// The live counter value.
    pub current: String,
    /// Literal text before the counter; may carry a back-reference
    /// directive (`pre`, `pre (`, `preval`).
    pub prefix: String,
    /// Literal text after the counter.
    pub suffix: String,
}

/// The per-pass table of heading levels.
#[derive(Debug, Clone)]
pub struct HeaderTable {
    levels: BTreeMap<usize, Header>,
    level_style: LevelStyle,
}

impl HeaderTable {
    /// Builds the table from the parameter mapping, consuming the
    /// engine-internal control keys.
    ///
    /// `level-style`, `no-indent`, `no-reset`, and every key whose name ends
    /// in a digit are removed from `parameters`; the remainder is left for
    /// other collaborators (mixin values and the like).
    pub fn from_parameters(parameters: &mut HashMap<String, String>) -> Self {
        let level_style = match parameters.remove("level-style").as_deref() {
            Some("l1.") => LevelStyle::Numbered,
            _ => LevelStyle::Legacy,
        };
        let no_indent = take_trigger_list(parameters, "no-indent");
        let no_reset = take_trigger_list(parameters, "no-reset");

        // Sorted so that duplicate level digits resolve the same way on
        // every pass regardless of map iteration order.
        let mut level_keys: Vec<(String, usize)> = parameters
            .keys()
            .filter_map(|key| {
                let digit = key.chars().last()?.to_digit(10)?;
                Some((key.clone(), digit as usize))
            })
            .collect();
        level_keys.sort();

        let mut levels = BTreeMap::new();
        for (key, level) in level_keys {
            let Some(style_def) = parameters.remove(&key) else {
                continue;
            };
            let spec = style::classify(&style_def);
            levels.insert(
                level,
                Header {
                    trigger: level_style.trigger(level),
                    level,
                    family: spec.family,
                    wrap: spec.wrap,
                    indent: 2 * level,
                    reset_on_ascent: true,
                    initial: spec.initial.clone(),
                    current: spec.initial,
                    prefix: spec.prefix,
                    suffix: spec.suffix,
                },
            );
        }

        let mut table = Self {
            levels,
            level_style,
        };
        for trigger in &no_reset {
            if let Some(header) = table.by_trigger_mut(trigger) {
                header.reset_on_ascent = false;
            }
        }
        for trigger in &no_indent {
            if let Some(header) = table.by_trigger_mut(trigger) {
                header.indent = 0;
            }
        }
        // Pull the remaining levels back so indentation stays proportional
        // when leading levels are suppressed.
        let pulled_back = 2 * no_indent.len();
        if pulled_back > 0 {
            for header in table.levels.values_mut() {
                if header.indent != 0 {
                    header.indent = header.indent.saturating_sub(pulled_back);
                }
            }
        }
        table
    }

    pub fn level_style(&self) -> LevelStyle {
        self.level_style
    }

    pub fn get(&self, level: usize) -> Option<&Header> {
        self.levels.get(&level)
    }

    pub fn get_mut(&mut self, level: usize) -> Option<&mut Header> {
        self.levels.get_mut(&level)
    }

    /// Every configured level strictly deeper than `level`, shallowest first.
    pub fn juniors_of_mut(&mut self, level: usize) -> btree_map::RangeMut<'_, usize, Header> {
        self.levels.range_mut(level + 1..)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn by_trigger_mut(&mut self, trigger: &str) -> Option<&mut Header> {
        self.levels.values_mut().find(|h| h.trigger == trigger)
    }
}

fn take_trigger_list(parameters: &mut HashMap<String, String>, key: &str) -> Vec<String> {
    match parameters.remove(key) {
        Some(value) if !value.trim().is_empty() => {
            value.split(", ").map(str::to_string).collect()
        }
        _ => Vec::new(),
    }
}
