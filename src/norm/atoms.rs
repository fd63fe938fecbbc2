use super::context::NormalizationContext;
use super::error::Error;
use super::residues::canonical_residue;
use super::tables::ConversionTables;
use super::NormConfig;
use crate::model::atom::AtomRecord;

// O.co2, N.pl3 and C.cat count as aromatic so the bond pass emits `ar`
// bonds for carboxylate, guanidinium and protonated-ring nitrogens.
const AROMATIC_TYPES: [&str; 5] = ["C.ar", "N.ar", "O.co2", "N.pl3", "C.cat"];
const SP2_TYPES: [&str; 4] = ["O.2", "N.2", "C.2", "S.2"];

const BACKBONE_NAMES: [&str; 9] = ["C", "CA", "O", "N", "H", "HA", "HA1", "HA2", "HA3"];
const AMIDE_NAMES: [&str; 2] = ["C", "N"];

pub(crate) fn normalize_block(
    block: &str,
    config: &NormConfig,
    tables: &ConversionTables,
    ctx: &mut NormalizationContext,
) -> Result<String, Error> {
    let mut out = String::with_capacity(block.len());
    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(&normalize_line(line, config, tables, ctx)?);
        out.push('\n');
    }
    Ok(out)
}

/// Normalizes one atom record.
///
/// The order of the rewriting steps matters: type lookups run on the raw
/// residue name, the tautomer overrides run before the residue name is
/// canonicalized (they key on HID/HIE/HIP/HSD/HSE), and the aromatic/sp2
/// memberships are recorded from the final type.
pub fn normalize_line(
    line: &str,
    config: &NormConfig,
    tables: &ConversionTables,
    ctx: &mut NormalizationContext,
) -> Result<String, Error> {
    // Sulfoxide and sulfone types are case-sensitive downstream.
    let line = line.replace("S.O", "S.o");
    let mut atom = AtomRecord::parse(&line)?;

    if let Some(table) = &tables.overrides {
        atom.sybyl_type = table.lookup(&atom.name, &atom.residue)?.to_string();
    } else if let Some(table) = &tables.force_field {
        atom.sybyl_type = table.to_sybyl(&atom.sybyl_type)?.to_string();
    }

    // A foreign status field is preserved untouched; an empty one (or our
    // own BACKBONE marker, on a re-run) participates in backbone tagging.
    if config.backbone_tag
        && BACKBONE_NAMES.contains(&atom.name.as_str())
        && (atom.status.is_empty() || atom.status == "BACKBONE")
    {
        atom.status = "BACKBONE".to_string();
        ctx.backbone.insert(atom.id);
        if AMIDE_NAMES.contains(&atom.name.as_str()) {
            ctx.amide.insert(atom.id);
        }
    }

    apply_residue_overrides(&mut atom);
    canonicalize_residue_name(&mut atom);

    if AROMATIC_TYPES.contains(&atom.sybyl_type.as_str()) {
        ctx.aromatic.insert(atom.id);
    } else if SP2_TYPES.contains(&atom.sybyl_type.as_str()) {
        ctx.sp2.insert(atom.id);
    }

    Ok(atom.compose())
}

/// Residue-specific type corrections for ambiguous protonation and
/// resonance states.
fn apply_residue_overrides(atom: &mut AtomRecord) {
    let prefix: String = atom.residue.chars().take(3).collect();
    let name = atom.name.as_str();

    match prefix.as_str() {
        "TRP" => {
            if name == "CG" {
                atom.sybyl_type = "C.ar".to_string();
            }
        }
        // Delta-protonated histidine: the protonated ND1 is planar, NE2
        // stays in the aromatic system.
        "HID" | "HSD" => match name {
            "ND1" => atom.sybyl_type = "N.pl3".to_string(),
            "NE2" => atom.sybyl_type = "N.ar".to_string(),
            _ => {}
        },
        // Epsilon-protonated histidine: mirrored assignment.
        "HIE" | "HSE" => match name {
            "ND1" => atom.sybyl_type = "N.ar".to_string(),
            "NE2" => atom.sybyl_type = "N.pl3".to_string(),
            _ => {}
        },
        // Doubly protonated: both ring nitrogens planar.
        "HIP" => {
            if name == "ND1" || name == "NE2" {
                atom.sybyl_type = "N.pl3".to_string();
            }
        }
        "ARG" => match name {
            "NE" | "NH1" | "NH2" => atom.sybyl_type = "N.pl3".to_string(),
            "CZ" => atom.sybyl_type = "C.cat".to_string(),
            _ => {}
        },
        // Any histidine not covered by a specific tautomer code.
        "HIS" => {
            if atom.sybyl_type == "N.2" {
                atom.sybyl_type = "N.ar".to_string();
            } else if atom.sybyl_type == "N.3" {
                atom.sybyl_type = "N.pl3".to_string();
            }
        }
        _ => {}
    }
}

fn canonicalize_residue_name(atom: &mut AtomRecord) {
    let prefix: String = atom.residue.chars().take(3).collect();
    let suffix: String = atom.residue.chars().skip(3).collect();
    atom.residue = format!("{}{}", canonical_residue(&prefix), suffix);

    // A bare three-letter name lost its sequence suffix; restore it from
    // the substructure id.
    if atom.residue.chars().count() == 3 {
        atom.residue.push_str(&atom.subst_id);
    }
}
