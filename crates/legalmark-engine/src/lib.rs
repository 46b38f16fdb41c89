//! Structured-heading numbering engine for legal document templates.
//!
//! Legal templates assemble contracts from text substitutions, optional
//! clauses, and automatically numbered outline headings. This crate
//! implements the last of those: it locates the fenced outline block in a
//! document, renders each trigger token (`ll.`, `l3.`) into a numbered
//! label with per-level counters, and resolves `|name|` cross-references.
//! Everything outside the block passes through byte-for-byte.
//!
//! Front-matter parsing, mixin substitution, file I/O, and rendering live
//! with the caller; the engine receives the document text plus a flat
//! parameter mapping and hands back the rewritten text:
//!
//! ```
//! use std::collections::HashMap;
//!
//! let mut parameters = HashMap::from([
//!     ("level-1".to_string(), "1.".to_string()),
//!     ("level-2".to_string(), "a.".to_string()),
//! ]);
//! let contents = "```\nl. Definitions.\nll. Interpretation.\n```\n";
//!
//! let rendered = legalmark_engine::process(contents, &mut parameters).unwrap();
//! assert_eq!(rendered, "\n  1. Definitions.\n\n    a. Interpretation.\n\n");
//! ```

pub mod counters;
pub mod error;
pub mod headings;

pub use counters::CounterFamily;
pub use error::NumberingError;
pub use headings::number_headings;
pub use headings::style::{StyleSpec, WrapStyle, classify};
pub use headings::table::{Header, HeaderTable, LevelStyle};

use std::collections::HashMap;

use anyhow::Context;

/// Builds the header table from `parameters` (consuming the engine's
/// control keys) and rewrites the outline block of `contents`.
pub fn process(contents: &str, parameters: &mut HashMap<String, String>) -> anyhow::Result<String> {
    let mut table = HeaderTable::from_parameters(parameters);
    number_headings(contents, &mut table).context("numbering structured headings")
}
