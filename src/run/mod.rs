//! Invocation of the external interaction-detection binary.
//!
//! The tool is consumed over a file-based protocol: a generated input file
//! carries one calculation per line (`{options} {tool} {receptor} {ligand}
//! [{output}]`), the binary is launched once per batch with `-F <input>`,
//! and per-structure output files plus captured stdout are collected
//! afterwards. Batched runs are much faster but the binary is known to
//! crash sporadically on batched input, so a failed batch is retried one
//! line at a time; a pair that still fails is recorded with a `|WARNING`
//! marker the fingerprint decoder turns into an unavailable row.

mod error;
mod invocation;
mod runner;

pub use error::Error;
pub use invocation::{IntsMode, PairRecord, RuleOverrides, ToolInvocation, result_map};
pub use runner::{BatchOutcome, ToolRunner};
