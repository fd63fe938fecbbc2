use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use plif_forge::run::IntsMode;
use plif_forge::{IfpVariant, TifpEncoding};

#[derive(Parser)]
#[command(
    name = "pforge",
    about = "MOL2 normalization and protein-ligand interaction fingerprints",
    version,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize MOL2 structure files for the detection tool
    #[command(visible_alias = "f")]
    Fix(FixArgs),

    /// Run the external detection binary over receptor/ligand pairs
    #[command(visible_alias = "c")]
    Compute(ComputeArgs),

    /// Decode fingerprint output files into a CSV table
    #[command(visible_alias = "d")]
    Decode(DecodeArgs),
}

#[derive(Args)]
pub struct FixArgs {
    /// MOL2 files to normalize
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Normalize every MOL2 file in this directory
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Tag backbone atoms (use for receptor structures)
    #[arg(long)]
    pub backbone: bool,

    /// Force-field to SYBYL conversion table (TOML)
    #[arg(long = "ff", value_name = "FILE")]
    pub force_field: Option<PathBuf>,

    /// Per-(atom, residue) type override table (TOML)
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Write fixed files here instead of rewriting in place
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ComputeArgs {
    /// Directory holding the normalized receptor structures
    #[arg(long, value_name = "DIR")]
    pub receptor_dir: PathBuf,

    /// Directory holding the normalized ligand structures
    #[arg(long, value_name = "DIR")]
    pub ligand_dir: PathBuf,

    /// Which calculation to run
    #[arg(long, value_name = "MODE", default_value = "ifp")]
    pub mode: ComputeMode,

    /// Bit-matrix vocabulary (ifp mode)
    #[arg(long, value_name = "VARIANT", default_value = "regular")]
    pub variant: IfpVariantArg,

    /// Storage encoding (tifp mode)
    #[arg(long, value_name = "ENC", default_value = "std")]
    pub encoding: TifpEncodingArg,

    /// Use the full triplet vocabulary instead of the reduced one
    #[arg(long)]
    pub full: bool,

    /// Pseudo-atom output mode (ints mode)
    #[arg(long = "ints-mode", value_name = "MODE", default_value = "merg")]
    pub ints_mode: IntsModeArg,

    /// Use the alternative hydrophobic contact definition (ints mode)
    #[arg(long = "new-hyd")]
    pub new_hyd: bool,

    /// Path to the detection binary (searched on PATH if omitted)
    #[arg(long, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Timeout for one tool invocation, in seconds
    #[arg(long, value_name = "SECS", default_value = "3600")]
    pub timeout: u64,

    /// Geometry rule override CODE=VALUE (e.g. DAR=5.0), repeatable
    #[arg(long = "rule", value_name = "CODE=VALUE", action = clap::ArgAction::Append)]
    pub rules: Vec<String>,

    /// Directory for input/output files of this run
    #[arg(short, long, value_name = "DIR", default_value = "ichem_outputs")]
    pub output_dir: PathBuf,

    /// Write the receptor/ligand/output map to this CSV file
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Fingerprint output files, in structure order
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Fingerprint family to decode
    #[arg(long, value_name = "KIND", default_value = "ifp")]
    pub kind: DecodeKind,

    /// Bit-matrix vocabulary (ifp kind)
    #[arg(long, value_name = "VARIANT", default_value = "regular")]
    pub variant: IfpVariantArg,

    /// Storage encoding (tifp kind)
    #[arg(long, value_name = "ENC", default_value = "std")]
    pub encoding: TifpEncodingArg,

    /// Declared fingerprint length (tifp kind; defaults by vocabulary)
    #[arg(long, value_name = "N")]
    pub length: Option<usize>,

    /// Use the full triplet vocabulary length instead of the reduced one
    #[arg(long)]
    pub full: bool,

    /// CSV file to write the fingerprint table to
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComputeMode {
    /// Bit-matrix interaction fingerprint (stdout stream)
    Ifp,
    /// Triplet fingerprint (one output file per pair)
    Tifp,
    /// Interaction pseudo-atom detection
    Ints,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DecodeKind {
    Ifp,
    Tifp,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IfpVariantArg {
    Regular,
    Polar,
    Extended,
}

impl From<IfpVariantArg> for IfpVariant {
    fn from(arg: IfpVariantArg) -> Self {
        match arg {
            IfpVariantArg::Regular => IfpVariant::Regular,
            IfpVariantArg::Polar => IfpVariant::Polar,
            IfpVariantArg::Extended => IfpVariant::Extended,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TifpEncodingArg {
    Std,
    Svm,
    Cmp,
}

impl From<TifpEncodingArg> for TifpEncoding {
    fn from(arg: TifpEncodingArg) -> Self {
        match arg {
            TifpEncodingArg::Std => TifpEncoding::Std,
            TifpEncodingArg::Svm => TifpEncoding::Svm,
            TifpEncodingArg::Cmp => TifpEncoding::Cmp,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IntsModeArg {
    Merg,
    Cent,
    Lig,
    Prot,
}

impl From<IntsModeArg> for IntsMode {
    fn from(arg: IntsModeArg) -> Self {
        match arg {
            IntsModeArg::Merg => IntsMode::Merged,
            IntsModeArg::Cent => IntsMode::Center,
            IntsModeArg::Lig => IntsMode::Ligand,
            IntsModeArg::Prot => IntsMode::Protein,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
