use super::context::NormalizationContext;
use super::error::Error;
use crate::model::bond::BondRecord;

pub(crate) fn normalize_block(
    block: &str,
    ctx: &NormalizationContext,
) -> Result<String, Error> {
    let mut out = String::with_capacity(block.len());
    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(&normalize_line(line, ctx)?);
        out.push('\n');
    }
    Ok(out)
}

/// Re-derives one bond's order from the atom classifications.
///
/// First matching rule wins: backbone pairs are tagged (and peptide C–N
/// pairs become amide bonds), fully aromatic pairs and mixed aromatic/sp2
/// pairs become `ar`, pure sp2 pairs become double bonds, anything else
/// keeps the order the file declared.
pub fn normalize_line(line: &str, ctx: &NormalizationContext) -> Result<String, Error> {
    let mut bond = BondRecord::parse(line)?;
    bond.tag.clear();

    let (a, b) = (bond.a, bond.b);
    let conjugated =
        |id: u32| ctx.aromatic.contains(&id) || ctx.sp2.contains(&id);

    if ctx.backbone.contains(&a) && ctx.backbone.contains(&b) {
        if ctx.amide.contains(&a) && ctx.amide.contains(&b) {
            bond.order = "am".to_string();
            bond.tag = "BACKBONE|INTERRES".to_string();
        } else {
            bond.tag = "BACKBONE".to_string();
        }
    } else if ctx.aromatic.contains(&a) && ctx.aromatic.contains(&b) {
        bond.order = "ar".to_string();
    } else if ctx.sp2.contains(&a) && ctx.sp2.contains(&b) {
        bond.order = "2".to_string();
    } else if conjugated(a) && conjugated(b) {
        bond.order = "ar".to_string();
    }

    Ok(bond.compose())
}
