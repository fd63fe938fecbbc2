use crate::io::error::Error;
use crate::model::document::{
    ATOM_MARKER, BOND_MARKER, COMMENT_MARKER, MOLECULE_MARKER, Mol2Document, SUBSTRUCTURE_MARKER,
};
use std::io::Write;
use std::path::Path;

pub fn write_path(path: &Path, doc: &Mol2Document) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write(std::io::BufWriter::new(file), doc)
}

/// Serializes a document: markers in canonical order, each followed by its
/// section content. An unmodified document is reproduced byte-for-byte.
pub fn write<W: Write>(mut writer: W, doc: &Mol2Document) -> Result<(), Error> {
    write!(writer, "{}", write_string(doc))?;
    Ok(())
}

pub fn write_string(doc: &Mol2Document) -> String {
    let mut out = String::with_capacity(
        doc.molecule.len() + doc.atoms.len() + doc.bonds.len() + doc.substructure.len() + 128,
    );
    for (marker, block) in [
        (MOLECULE_MARKER, doc.molecule.as_str()),
        (ATOM_MARKER, doc.atoms.as_str()),
        (BOND_MARKER, doc.bonds.as_str()),
        (SUBSTRUCTURE_MARKER, doc.substructure.as_str()),
    ] {
        out.push_str(marker);
        out.push('\n');
        out.push_str(block);
    }
    if let Some(comments) = &doc.comments {
        out.push_str(COMMENT_MARKER);
        out.push('\n');
        out.push_str(comments);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::mol2::read_str;

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
    fn read_then_write_is_byte_identical() {
        let doc = read_str(SAMPLE).unwrap();
        assert_eq!(write_string(&doc), SAMPLE);
    }

    #[test]
    fn comment_marker_is_omitted_when_absent() {
        let (head, _) = SAMPLE.split_once("@<TRIPOS>COMMENT\n").unwrap();
        let doc = read_str(head).unwrap();
        assert_eq!(write_string(&doc), head);
    }

    #[test]
    fn empty_comment_section_keeps_its_marker() {
        let mut doc = read_str(SAMPLE).unwrap();
        doc.comments = Some(String::new());
        assert!(write_string(&doc).ends_with("@<TRIPOS>COMMENT\n"));
    }
}
