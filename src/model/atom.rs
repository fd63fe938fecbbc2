use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed ATOM record: '{0}'")]
pub struct ParseAtomError(String);

/// One record from the `@<TRIPOS>ATOM` section.
///
/// Coordinate and charge fields are kept as the verbatim input tokens; only
/// the SYBYL type, the residue name and the status field are rewritten by
/// normalization, so untouched fields survive unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord {
    pub id: u32,
    pub name: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub sybyl_type: String,
    pub subst_id: String,
    pub residue: String,
    pub charge: String,
    /// Free-text status field (e.g. `BACKBONE`); empty when absent.
    pub status: String,
}

impl AtomRecord {
    /// Parses one atom line.
    ///
    /// Some trajectory converters emit the atom id and a four-character atom
    /// name fused into a single token; a record with fewer than nine fields
    /// is repaired by splitting the trailing four characters of the first
    /// token back into the name field.
    pub fn parse(line: &str) -> Result<Self, ParseAtomError> {
        let mut fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() < 9 {
            let head = fields
                .first()
                .copied()
                .ok_or_else(|| ParseAtomError(line.to_string()))?;
            let chars = head.chars().count();
            if chars <= 4 {
                return Err(ParseAtomError(line.to_string()));
            }
            let cut = head
                .char_indices()
                .nth(chars - 4)
                .map(|(i, _)| i)
                .unwrap_or(0);
            let (id_part, name_part) = head.split_at(cut);
            fields[0] = id_part;
            fields.insert(1, name_part);
        }

        if fields.len() < 9 {
            return Err(ParseAtomError(line.to_string()));
        }

        let id = fields[0]
            .parse::<u32>()
            .map_err(|_| ParseAtomError(line.to_string()))?;

        Ok(Self {
            id,
            name: fields[1].to_string(),
            x: fields[2].to_string(),
            y: fields[3].to_string(),
            z: fields[4].to_string(),
            sybyl_type: fields[5].to_string(),
            subst_id: fields[6].to_string(),
            residue: fields[7].to_string(),
            charge: fields[8].to_string(),
            status: fields.get(9).copied().unwrap_or("").to_string(),
        })
    }

    /// Recomposes the record in the fixed-column layout the external tool
    /// expects. The column contract is strict: do not reformat.
    pub fn compose(&self) -> String {
        format!(
            "{:>7} {:>5}{:>14}{:>10}{:>10} {:<11}{} {:<8}{:>9} {}",
            self.id,
            self.name,
            self.x,
            self.y,
            self.z,
            self.sybyl_type,
            self.subst_id,
            self.residue,
            self.charge,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str =
        "      1 N         24.9820   16.9350   10.1130 N.4     1 ARG1     0.1305";

    #[test]
    fn parses_regular_record() {
        let atom = AtomRecord::parse(LINE).unwrap();
        assert_eq!(atom.id, 1);
        assert_eq!(atom.name, "N");
        assert_eq!(atom.x, "24.9820");
        assert_eq!(atom.sybyl_type, "N.4");
        assert_eq!(atom.subst_id, "1");
        assert_eq!(atom.residue, "ARG1");
        assert_eq!(atom.charge, "0.1305");
        assert_eq!(atom.status, "");
    }

    #[test]
    fn keeps_existing_status_field() {
        let atom = AtomRecord::parse(&format!("{} BACKBONE", LINE)).unwrap();
        assert_eq!(atom.status, "BACKBONE");
    }

    #[test]
    fn repairs_fused_id_and_name() {
        // id 1172 and name HD11 written without a separating space
        let line = "1172HD11   25.7236   18.1922   10.2811 H       74 LEU74    0.0000";
        let atom = AtomRecord::parse(line).unwrap();
        assert_eq!(atom.id, 1172);
        assert_eq!(atom.name, "HD11");
        assert_eq!(atom.residue, "LEU74");
    }

    #[test]
    fn rejects_short_record() {
        assert!(AtomRecord::parse("1 N 0.0").is_err());
    }

    #[test]
    fn compose_reproduces_fixed_columns() {
        let atom = AtomRecord::parse(LINE).unwrap();
        assert_eq!(
            atom.compose(),
            "      1     N       24.9820   16.9350   10.1130 N.4        1 ARG1       0.1305 "
        );
    }

    #[test]
    fn compose_then_parse_is_stable() {
        let atom = AtomRecord::parse(LINE).unwrap();
        let reparsed = AtomRecord::parse(&atom.compose()).unwrap();
        assert_eq!(atom, reparsed);
    }
}
