use crate::model::atom::ParseAtomError;
use crate::model::bond::ParseBondError;
use thiserror::Error;

/// Errors raised while normalizing a single document.
///
/// All variants are fatal for the file being processed; the caller decides
/// whether to abort the batch or skip the file.
#[derive(Debug, Error)]
pub enum Error {
    /// A force-field atom type with no bucket in the synonym table.
    #[error("atom type '{0}' is not supported, please update the conversion table")]
    UnsupportedAtomType(String),

    /// An (atom, residue) pair with no entry in the override table.
    #[error("no atom type override for atom '{atom}' in residue '{residue}'")]
    MissingOverride { atom: String, residue: String },

    #[error(transparent)]
    Atom(#[from] ParseAtomError),

    #[error(transparent)]
    Bond(#[from] ParseBondError),

    #[error("failed to parse conversion table: {0}")]
    TableParse(#[from] toml::de::Error),

    #[error(transparent)]
    Document(#[from] crate::io::Error),

    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
