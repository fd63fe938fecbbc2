use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "external tool not found at '{path}'. \
         Update the configured tool path or install the binary on PATH"
    )]
    ToolNotFound { path: PathBuf },

    #[error("external tool timed out after {0:?}")]
    Timeout(Duration),

    #[error(
        "the same number of receptor and ligand structures is required \
         ({receptors} receptors, {ligands} ligands)"
    )]
    PairCountMismatch { receptors: usize, ligands: usize },

    #[error("unknown interaction rule parameter '{0}'")]
    UnknownRuleParameter(String),

    #[error(
        "result table misaligned: {rows} result rows for {pairs} structure pairs.\n\
         Check the tool output files for missing results; a crashed invocation \
         for one structure can be rerun individually from the input file"
    )]
    ResultCountMismatch { rows: usize, pairs: usize },

    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
