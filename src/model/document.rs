/// Section marker opening the molecule header block.
pub const MOLECULE_MARKER: &str = "@<TRIPOS>MOLECULE";
/// Section marker opening the atom block.
pub const ATOM_MARKER: &str = "@<TRIPOS>ATOM";
/// Section marker opening the bond block.
pub const BOND_MARKER: &str = "@<TRIPOS>BOND";
/// Section marker opening the substructure block.
pub const SUBSTRUCTURE_MARKER: &str = "@<TRIPOS>SUBSTRUCTURE";
/// Section marker opening the optional comment block.
pub const COMMENT_MARKER: &str = "@<TRIPOS>COMMENT";

/// A MOL2 document split into its five canonical sections.
///
/// Each section holds the verbatim text between its marker line and the next
/// marker, so an unmodified document serializes back byte-for-byte. The
/// normalization passes replace section contents with rewritten, newline-
/// terminated records but never reorder sections or the records inside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mol2Document {
    /// Molecule header: title line, counts line, molecule type, charge type.
    pub molecule: String,
    /// One atom record per line.
    pub atoms: String,
    /// One bond record per line.
    pub bonds: String,
    /// One substructure (residue) record per line.
    pub substructure: String,
    /// Comment block; `None` when the input carried no comment marker.
    pub comments: Option<String>,
}

impl Mol2Document {
    /// Non-empty atom record lines, in file order.
    pub fn atom_lines(&self) -> impl Iterator<Item = &str> {
        self.atoms.lines().filter(|l| !l.trim().is_empty())
    }

    /// Non-empty bond record lines, in file order.
    pub fn bond_lines(&self) -> impl Iterator<Item = &str> {
        self.bonds.lines().filter(|l| !l.trim().is_empty())
    }

    /// Non-empty substructure record lines, in file order.
    pub fn substructure_lines(&self) -> impl Iterator<Item = &str> {
        self.substructure.lines().filter(|l| !l.trim().is_empty())
    }
}
