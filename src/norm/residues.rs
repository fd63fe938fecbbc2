use crate::model::residue::ResidueRecord;

/// Folds non-standard protonation-state residue codes to the standard
/// three-letter code. Unknown codes pass through unchanged.
pub fn canonical_residue(res: &str) -> &str {
    match res {
        "CYX" => "CYS",
        "HIE" | "HIP" | "HID" | "HSD" | "HSE" => "HIS",
        "ASH" => "ASP",
        "LYN" => "LYS",
        "GLH" => "GLU",
        other => other,
    }
}

pub(crate) fn normalize_block(block: &str) -> String {
    let mut out = String::with_capacity(block.len());
    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(&normalize_line(line));
        out.push('\n');
    }
    out
}

/// Rewrites one substructure record to the canonical RESIDUE layout; lines
/// that are not full residue records pass through untouched.
pub fn normalize_line(line: &str) -> String {
    match ResidueRecord::parse(line) {
        Some(record) => {
            let prefix: String = record.name.chars().take(3).collect();
            record.compose(canonical_residue(&prefix))
        }
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_synonyms_are_folded() {
        assert_eq!(canonical_residue("CYX"), "CYS");
        assert_eq!(canonical_residue("HSE"), "HIS");
        assert_eq!(canonical_residue("ASH"), "ASP");
        assert_eq!(canonical_residue("LYN"), "LYS");
        assert_eq!(canonical_residue("GLH"), "GLU");
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(canonical_residue("LIG"), "LIG");
        assert_eq!(canonical_residue("TRP"), "TRP");
    }

    #[test]
    fn residue_record_is_rewritten_to_canonical_layout() {
        let line = "     2 HID2        15 RESIDUE           4 A     HID     1";
        assert_eq!(
            normalize_line(line),
            "      2   HIS2              15 RESIDUE             4 A HIS     0"
        );
    }

    #[test]
    fn rewriting_is_idempotent() {
        let line = "     2 HID2        15 RESIDUE           4 A     HID     1";
        let once = normalize_line(line);
        assert_eq!(normalize_line(&once), once);
    }

    #[test]
    fn short_records_pass_through() {
        assert_eq!(normalize_line("1 LIG 1 GROUP"), "1 LIG 1 GROUP");
    }
}
