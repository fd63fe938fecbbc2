use super::error::Error;
use crate::model::types::{IfpVariant, TIFP_LEN_FULL, TIFP_LEN_SMALL, TifpEncoding};
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Interaction pseudo-atom output mode of the `ints` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntsMode {
    /// Merged protein/ligand pseudo-atoms.
    Merged,
    /// Interaction midpoints only.
    Center,
    /// Ligand-side pseudo-atoms.
    Ligand,
    /// Protein-side pseudo-atoms.
    Protein,
}

impl IntsMode {
    fn tool_keyword(self) -> &'static str {
        match self {
            IntsMode::Merged => "MERG",
            IntsMode::Center => "CENT",
            IntsMode::Ligand => "LIG",
            IntsMode::Protein => "PROT",
        }
    }
}

/// Overrides for the tool's topological interaction definitions
/// (distance and angle cutoffs), accumulated as command-line flags.
#[derive(Debug, Clone, Default)]
pub struct RuleOverrides {
    flags: String,
}

impl RuleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one geometry parameter by its short code (e.g. `DAR` for the
    /// aromatic-contact distance). Unknown codes are rejected.
    pub fn set(&mut self, parameter: &str, value: f64) -> Result<(), Error> {
        let flag = match parameter {
            "DHB" => "-D_Hb",
            "DHYD" => "-D_Hyd",
            "DIO" => "-D_Io",
            "DME" => "-D_Me",
            "DAR" => "-D_Ar",
            "DPIC" => "-D_PIC",
            "AH" => "-a_H",
            "ATH" => "-at_H",
            "AARFF" => "-a_ArFF",
            "ATARFF" => "-at_ArFF",
            "AAREF" => "-a_ArEF",
            "ATAREF" => "-at_ArEF",
            "APIC" => "-a_Pic",
            "ATPIC" => "-at_PIC",
            _ => return Err(Error::UnknownRuleParameter(parameter.to_string())),
        };
        let _ = write!(self.flags, "{} {} ", flag, value);
        Ok(())
    }

    pub fn as_flags(&self) -> &str {
        &self.flags
    }
}

/// One batch calculation: which tool to run, with which options, over which
/// receptor/ligand structure pairs.
///
/// The tool modes differ only in their option strings and whether they
/// produce per-pair output files, so each mode is a constructor over the
/// same value type.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Tool keyword written into every input line (e.g. `IFP`, `ints`).
    pub tool: String,
    /// Option string prepended to every input line.
    pub options: String,
    pub receptors: Vec<PathBuf>,
    pub ligands: Vec<PathBuf>,
    /// Per-pair output path prefix; `None` when the tool writes to stdout.
    pub output_prefix: Option<String>,
    pub output_suffix: String,
}

impl ToolInvocation {
    /// Bit-matrix fingerprint calculation; results arrive on stdout.
    pub fn ifp(variant: IfpVariant, receptors: Vec<PathBuf>, ligands: Vec<PathBuf>) -> Self {
        Self {
            tool: "IFP".to_string(),
            options: variant.tool_option().to_string(),
            receptors,
            ligands,
            output_prefix: None,
            output_suffix: String::new(),
        }
    }

    /// Triplet fingerprint calculation; one output file per pair.
    pub fn tifp(
        encoding: TifpEncoding,
        small: bool,
        receptors: Vec<PathBuf>,
        ligands: Vec<PathBuf>,
    ) -> Self {
        let options = if small {
            format!("--small -fgps {}", encoding)
        } else {
            format!("-fgps {}", encoding)
        };
        Self {
            tool: "ints".to_string(),
            options,
            receptors,
            ligands,
            output_prefix: Some("out_tifp_".to_string()),
            output_suffix: ".tifp".to_string(),
        }
    }

    /// Declared vector length of a triplet fingerprint.
    pub fn tifp_len(small: bool) -> usize {
        if small { TIFP_LEN_SMALL } else { TIFP_LEN_FULL }
    }

    /// Interaction pseudo-atom detection; one output file per pair.
    pub fn ints(
        mode: IntsMode,
        new_hyd: bool,
        receptors: Vec<PathBuf>,
        ligands: Vec<PathBuf>,
    ) -> Self {
        let options = if new_hyd {
            format!("-type {} --newH", mode.tool_keyword())
        } else {
            format!("-type {}", mode.tool_keyword())
        };
        Self {
            tool: "ints".to_string(),
            options,
            receptors,
            ligands,
            output_prefix: Some("out_ints_".to_string()),
            output_suffix: String::new(),
        }
    }

    /// Prepends geometry rule overrides to the option string.
    pub fn with_rules(mut self, rules: &RuleOverrides) -> Self {
        self.options = format!("{}{}", rules.as_flags(), self.options);
        self
    }

    pub fn pair_count(&self) -> usize {
        self.receptors.len()
    }

    fn validate(&self) -> Result<(), Error> {
        if self.receptors.len() != self.ligands.len() {
            return Err(Error::PairCountMismatch {
                receptors: self.receptors.len(),
                ligands: self.ligands.len(),
            });
        }
        Ok(())
    }

    /// Builds the input-file lines and the predicted per-pair output paths.
    ///
    /// Output files are numbered from `start_index` so repeated batches into
    /// the same directory never collide.
    pub fn command_lines(
        &self,
        output_dir: &Path,
        start_index: usize,
    ) -> Result<(Vec<String>, Vec<PathBuf>), Error> {
        self.validate()?;

        let mut lines = Vec::with_capacity(self.pair_count());
        let mut outputs = Vec::new();

        for (i, (receptor, ligand)) in self.receptors.iter().zip(&self.ligands).enumerate() {
            let mut line = String::new();
            if !self.options.is_empty() {
                let _ = write!(line, "{} ", self.options.trim_end());
            }
            let _ = write!(
                line,
                "{} {} {}",
                self.tool,
                receptor.display(),
                ligand.display()
            );
            if let Some(prefix) = &self.output_prefix {
                let output = output_dir.join(format!(
                    "{}{}{}",
                    prefix,
                    start_index + i,
                    self.output_suffix
                ));
                let _ = write!(line, " {}", output.display());
                outputs.push(output);
            }
            lines.push(line);
        }

        Ok((lines, outputs))
    }

    /// Writes the batch input file consumed via the tool's `-F` flag and
    /// returns the predicted output paths.
    pub fn write_batch_input(
        &self,
        input_path: &Path,
        output_dir: &Path,
        start_index: usize,
    ) -> Result<Vec<PathBuf>, Error> {
        let (lines, outputs) = self.command_lines(output_dir, start_index)?;
        let mut file = std::fs::File::create(input_path)?;
        for line in &lines {
            writeln!(file, "{}", line)?;
        }
        Ok(outputs)
    }
}

/// One row of the receptor/ligand/output mapping table written next to the
/// fingerprint results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRecord {
    pub receptor: PathBuf,
    pub ligand: PathBuf,
    pub output: Option<PathBuf>,
}

/// Maps each structure pair to its output file (or to its row index when
/// the tool wrote to stdout).
///
/// A length mismatch means some calculations produced no result; the error
/// points the user at the partial-failure diagnosis.
pub fn result_map(
    invocation: &ToolInvocation,
    outputs: &[PathBuf],
) -> Result<Vec<PairRecord>, Error> {
    if invocation.receptors.len() != invocation.ligands.len()
        || (!outputs.is_empty() && outputs.len() != invocation.receptors.len())
    {
        return Err(Error::ResultCountMismatch {
            rows: outputs.len(),
            pairs: invocation.receptors.len().max(invocation.ligands.len()),
        });
    }

    Ok(invocation
        .receptors
        .iter()
        .zip(&invocation.ligands)
        .enumerate()
        .map(|(i, (receptor, ligand))| PairRecord {
            receptor: receptor.clone(),
            ligand: ligand.clone(),
            output: outputs.get(i).cloned(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(n: usize) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let receptors = (0..n)
            .map(|i| PathBuf::from(format!("receptor_{}.mol2", i)))
            .collect();
        let ligands = (0..n)
            .map(|i| PathBuf::from(format!("ligand_{}.mol2", i)))
            .collect();
        (receptors, ligands)
    }

    #[test]
    fn ifp_lines_carry_no_output_path() {
        let (receptors, ligands) = pair(2);
        let inv = ToolInvocation::ifp(IfpVariant::Polar, receptors, ligands);
        let (lines, outputs) = inv.command_lines(Path::new("out"), 0).unwrap();
        assert_eq!(lines[0], "--polar IFP receptor_0.mol2 ligand_0.mol2");
        assert!(outputs.is_empty());
    }

    #[test]
    fn regular_ifp_has_no_leading_option() {
        let (receptors, ligands) = pair(1);
        let inv = ToolInvocation::ifp(IfpVariant::Regular, receptors, ligands);
        let (lines, _) = inv.command_lines(Path::new("out"), 0).unwrap();
        assert_eq!(lines[0], "IFP receptor_0.mol2 ligand_0.mol2");
    }

    #[test]
    fn tifp_lines_number_their_output_files() {
        let (receptors, ligands) = pair(2);
        let inv = ToolInvocation::tifp(TifpEncoding::Svm, true, receptors, ligands);
        let (lines, outputs) = inv.command_lines(Path::new("out"), 3).unwrap();
        assert_eq!(
            lines[0],
            "--small -fgps SVM ints receptor_0.mol2 ligand_0.mol2 out/out_tifp_3.tifp"
        );
        assert_eq!(outputs[1], PathBuf::from("out/out_tifp_4.tifp"));
    }

    #[test]
    fn rule_overrides_are_prepended() {
        let (receptors, ligands) = pair(1);
        let mut rules = RuleOverrides::new();
        rules.set("DAR", 5.0).unwrap();
        let inv = ToolInvocation::ints(IntsMode::Merged, true, receptors, ligands)
            .with_rules(&rules);
        let (lines, _) = inv.command_lines(Path::new("out"), 0).unwrap();
        assert!(lines[0].starts_with("-D_Ar 5 -type MERG --newH ints"));
    }

    #[test]
    fn unknown_rule_parameter_is_rejected() {
        let mut rules = RuleOverrides::new();
        let err = rules.set("DXX", 1.0).unwrap_err();
        assert!(matches!(err, Error::UnknownRuleParameter(p) if p == "DXX"));
    }

    #[test]
    fn mismatched_pair_lists_are_rejected() {
        let receptors = vec![PathBuf::from("receptor_0.mol2")];
        let ligands = pair(2).1;
        let inv = ToolInvocation::ifp(IfpVariant::Regular, receptors, ligands);
        assert!(matches!(
            inv.command_lines(Path::new("out"), 0),
            Err(Error::PairCountMismatch { .. })
        ));
    }

    #[test]
    fn result_map_aligns_pairs_with_outputs() {
        let (receptors, ligands) = pair(2);
        let inv = ToolInvocation::tifp(TifpEncoding::Std, true, receptors, ligands);
        let outputs = vec![PathBuf::from("out_0.tifp"), PathBuf::from("out_1.tifp")];
        let map = result_map(&inv, &outputs).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[1].output, Some(PathBuf::from("out_1.tifp")));
    }

    #[test]
    fn result_map_reports_partial_failure() {
        let (receptors, ligands) = pair(3);
        let inv = ToolInvocation::tifp(TifpEncoding::Std, true, receptors, ligands);
        let outputs = vec![PathBuf::from("out_0.tifp")];
        let err = result_map(&inv, &outputs).unwrap_err();
        assert!(err.to_string().contains("crashed invocation"));
    }

    #[test]
    fn declared_tifp_lengths() {
        assert_eq!(ToolInvocation::tifp_len(true), 211);
        assert_eq!(ToolInvocation::tifp_len(false), 20000);
    }
}
