use super::error::Error;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The optional external lookup tables used by the atom pass.
///
/// Both tables default to absent, which means pass-through: atom types are
/// taken from the file as written.
#[derive(Debug, Clone, Default)]
pub struct ConversionTables {
    /// Force-field vocabulary to SYBYL synonym table.
    pub force_field: Option<ForceFieldTable>,
    /// Direct per-(atom name, residue name) type assignments.
    pub overrides: Option<OverrideTable>,
}

/// Maps each canonical SYBYL type to the set of force-field type names it
/// covers, e.g.
///
/// ```toml
/// "N.am" = ["N", "NC"]
/// "C.2" = ["C", "CC", "CD"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ForceFieldTable(BTreeMap<String, Vec<String>>);

impl ForceFieldTable {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Finds the canonical SYBYL type whose bucket contains the given
    /// force-field type.
    pub fn to_sybyl(&self, atom_type: &str) -> Result<&str, Error> {
        self.0
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| s == atom_type))
            .map(|(sybyl, _)| sybyl.as_str())
            .ok_or_else(|| Error::UnsupportedAtomType(atom_type.to_string()))
    }
}

/// Direct type assignments keyed by residue name then atom name, e.g.
///
/// ```toml
/// [LIG]
/// C1 = "C.ar"
/// N1 = "N.pl3"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable(BTreeMap<String, BTreeMap<String, String>>);

impl OverrideTable {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Looks up the type for an atom, first under the full residue name
    /// (which may carry a sequence suffix like `HID2`), then under its
    /// three-letter code.
    pub fn lookup(&self, atom: &str, residue: &str) -> Result<&str, Error> {
        let prefix: String = residue.chars().take(3).collect();
        self.0
            .get(residue)
            .or_else(|| self.0.get(&prefix))
            .and_then(|atoms| atoms.get(atom))
            .map(String::as_str)
            .ok_or_else(|| Error::MissingOverride {
                atom: atom.to_string(),
                residue: residue.to_string(),
            })
    }
}
