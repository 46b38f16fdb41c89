//! Structured-heading numbering for fenced outline blocks.
//!
//! A template carries at most one fenced block (three or more backticks)
//! whose lines begin with trigger tokens (`ll.` or `l2.`). The engine
//! renders each trigger into its numbered label, tracking per-level
//! counters that advance and reset as the outline descends and ascends,
//! and resolves `|name|` cross-references once the whole block is known.

pub mod block;
pub mod style;
pub mod table;
pub mod walk;

#[cfg(test)]
mod tests;

use crate::error::NumberingError;

use table::HeaderTable;
use walk::NumberingWalk;

/// Rewrites the document's outline block using the given header table.
///
/// Documents without a fenced outline block pass through unchanged. The
/// table is mutated by the walk and should not be reused for another
/// document.
pub fn number_headings(contents: &str, table: &mut HeaderTable) -> Result<String, NumberingError> {
    let Some(extracted) = block::extract(contents) else {
        return Ok(contents.to_string());
    };
    let segments = block::split(extracted.body);
    let rendered = NumberingWalk::new(table).run(&segments)?;
    Ok(format!(
        "{}\n{}\n\n{}",
        extracted.before, rendered, extracted.after
    ))
}
