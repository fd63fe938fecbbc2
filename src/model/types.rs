use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized fingerprint format: '{0}'")]
pub struct ParseFormatError(String);

/// Interaction vocabulary of a bit-matrix fingerprint file.
///
/// The external tool writes one bit per residue and interaction code; the
/// variant fixes which codes are present and in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfpVariant {
    /// Seven codes: hydrophobic, aromatic face-to-face and edge-to-face,
    /// H-bond donor/acceptor, cationic, anionic.
    Regular,
    /// Five polar codes, with metal coordination instead of the apolar set.
    Polar,
    /// The regular vocabulary plus pi-cation and metal coordination.
    Extended,
}

impl IfpVariant {
    /// Interaction codes in file column order.
    pub fn codes(self) -> &'static [&'static str] {
        match self {
            IfpVariant::Regular => &["HYD", "FTF", "ETF", "HBD", "HBA", "CAT", "ANI"],
            IfpVariant::Polar => &["HBD", "HBA", "CAT", "ANI", "MCO"],
            IfpVariant::Extended => {
                &["HYD", "FTF", "ETF", "HBD", "HBA", "CAT", "ANI", "PCI", "MCO"]
            }
        }
    }

    /// Command-line option passed to the external tool for this variant.
    pub fn tool_option(self) -> &'static str {
        match self {
            IfpVariant::Regular => "",
            IfpVariant::Polar => "--polar",
            IfpVariant::Extended => "--extended",
        }
    }
}

impl fmt::Display for IfpVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IfpVariant::Regular => write!(f, "regular"),
            IfpVariant::Polar => write!(f, "polar"),
            IfpVariant::Extended => write!(f, "extended"),
        }
    }
}

impl FromStr for IfpVariant {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" => Ok(IfpVariant::Regular),
            "polar" => Ok(IfpVariant::Polar),
            "extended" => Ok(IfpVariant::Extended),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Every interaction code any variant can produce, used to validate
/// interaction filters.
pub const RECOGNIZED_CODES: [&str; 9] =
    ["HYD", "FTF", "ETF", "HBD", "HBA", "CAT", "ANI", "PCI", "MCO"];

/// Storage encoding of a triplet-fingerprint (TIFP) file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TifpEncoding {
    /// Dense sequence of integer counts.
    Std,
    /// Sparse `position:value` pairs over a fixed-length vector.
    Svm,
    /// Run-length compressed: `[N]` skips N positions, a bare digit writes.
    Cmp,
}

impl fmt::Display for TifpEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TifpEncoding::Std => write!(f, "STD"),
            TifpEncoding::Svm => write!(f, "SVM"),
            TifpEncoding::Cmp => write!(f, "CMP"),
        }
    }
}

impl FromStr for TifpEncoding {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STD" => Ok(TifpEncoding::Std),
            "SVM" => Ok(TifpEncoding::Svm),
            "CMP" => Ok(TifpEncoding::Cmp),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Fingerprint length of the reduced triplet vocabulary.
pub const TIFP_LEN_SMALL: usize = 211;
/// Fingerprint length of the full triplet vocabulary.
pub const TIFP_LEN_FULL: usize = 20000;
