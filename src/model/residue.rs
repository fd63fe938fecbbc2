/// One record from the `@<TRIPOS>SUBSTRUCTURE` section.
///
/// Only the first three fields survive rewriting; the remaining positional
/// fields are replaced with the fixed `RESIDUE … A <name> 0` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueRecord {
    pub id: String,
    pub name: String,
    pub root_atom: String,
}

impl ResidueRecord {
    /// Parses a substructure line. Lines with fewer than seven fields are
    /// not full residue records and pass through untouched; they yield
    /// `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 7 {
            return None;
        }
        Some(Self {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            root_atom: fields[2].to_string(),
        })
    }

    /// Recomposes the record with the canonicalized residue name in the
    /// fixed canonical layout.
    pub fn compose(&self, canonical: &str) -> String {
        format!(
            "{:>7}{:>7}{:>16} RESIDUE{:>14} A {}{:>6}",
            self.id,
            format!("{}{}", canonical, self.id),
            self.root_atom,
            4,
            canonical,
            0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_record() {
        let line = "     1 ARG1        1 RESIDUE           4 A     ARG     1";
        let res = ResidueRecord::parse(line).unwrap();
        assert_eq!(res.id, "1");
        assert_eq!(res.name, "ARG1");
        assert_eq!(res.root_atom, "1");
    }

    #[test]
    fn short_record_passes_through() {
        assert!(ResidueRecord::parse("1 LIG 1 GROUP").is_none());
    }

    #[test]
    fn compose_uses_canonical_layout() {
        let res = ResidueRecord {
            id: "2".to_string(),
            name: "HID2".to_string(),
            root_atom: "15".to_string(),
        };
        assert_eq!(
            res.compose("HIS"),
            "      2   HIS2              15 RESIDUE             4 A HIS     0"
        );
    }
}
