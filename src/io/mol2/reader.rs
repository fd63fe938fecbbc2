use crate::io::{Format, error::Error};
use crate::model::document::{
    ATOM_MARKER, BOND_MARKER, COMMENT_MARKER, MOLECULE_MARKER, Mol2Document, SUBSTRUCTURE_MARKER,
};
use std::io::BufRead;
use std::path::Path;

pub fn read_path(path: &Path) -> Result<Mol2Document, Error> {
    let text = std::fs::read_to_string(path)?;
    read_str(&text)
}

pub fn read<R: BufRead>(mut reader: R) -> Result<Mol2Document, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    read_str(&text)
}

/// Splits a MOL2 document on its five section markers.
///
/// Markers must appear in the canonical order; each section's content is the
/// verbatim text between its marker line and the next marker, so a document
/// survives a read/write cycle untouched. The comment marker is optional;
/// the other four are required.
pub fn read_str(text: &str) -> Result<Mol2Document, Error> {
    // Anything before the molecule marker is discarded.
    let (_, rest) = split_required(text, MOLECULE_MARKER)?;
    let (molecule, rest) = split_required(rest, ATOM_MARKER)?;
    let (atoms, rest) = split_required(rest, BOND_MARKER)?;
    let (bonds, rest) = split_required(rest, SUBSTRUCTURE_MARKER)?;

    let (substructure, comments) = match split_on_marker(rest, COMMENT_MARKER) {
        Some((before, after)) => (before, Some(after.to_string())),
        None => (rest, None),
    };

    Ok(Mol2Document {
        molecule: molecule.to_string(),
        atoms: atoms.to_string(),
        bonds: bonds.to_string(),
        substructure: substructure.to_string(),
        comments,
    })
}

fn split_required<'a>(text: &'a str, marker: &str) -> Result<(&'a str, &'a str), Error> {
    split_on_marker(text, marker)
        .ok_or_else(|| Error::parse(Format::Mol2, 1, format!("missing {} section", marker)))
}

fn split_on_marker<'a>(text: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let sep = format!("{}\n", marker);
    text.split_once(&sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
@<TRIPOS>MOLECULE
frame_1
 2 1 1
@<TRIPOS>ATOM
      1 N         24.9820   16.9350   10.1130 N.4     1 ARG1     0.1305
      2 CA        25.7236   18.1922   10.2811 C.3     1 ARG1     0.0371
@<TRIPOS>BOND
     1    1    2 1
@<TRIPOS>SUBSTRUCTURE
     1 ARG1        1 RESIDUE           4 A     ARG     1
@<TRIPOS>COMMENT
generated from frame 1
";

    #[test]
    fn splits_all_five_sections() {
        let doc = read_str(SAMPLE).unwrap();
        assert_eq!(doc.molecule, "frame_1\n 2 1 1\n");
        assert_eq!(doc.atom_lines().count(), 2);
        assert_eq!(doc.bonds, "     1    1    2 1\n");
        assert!(doc.substructure.contains("RESIDUE"));
        assert_eq!(doc.comments.as_deref(), Some("generated from frame 1\n"));
    }

    #[test]
    fn comment_section_is_optional() {
        let (head, _) = SAMPLE.split_once("@<TRIPOS>COMMENT\n").unwrap();
        let doc = read_str(head).unwrap();
        assert!(doc.comments.is_none());
        assert!(doc.substructure.contains("RESIDUE"));
    }

    #[test]
    fn missing_atom_section_is_a_format_error() {
        let broken = SAMPLE.replace("@<TRIPOS>ATOM\n", "");
        let err = read_str(&broken).unwrap_err();
        assert!(err.to_string().contains("@<TRIPOS>ATOM"));
    }

    #[test]
    fn missing_bond_section_is_a_format_error() {
        let broken = SAMPLE.replace("@<TRIPOS>BOND\n", "");
        assert!(read_str(&broken).is_err());
    }
}
