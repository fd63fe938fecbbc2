//! A pure Rust toolkit for preparing TRIPOS MOL2 structures for external
//! protein–ligand interaction-fingerprint software and for decoding the
//! fingerprint files that software produces.
//!
//! Trajectory-derived MOL2 files are rarely accepted as-is by interaction
//! detection tools: force-field atom types must be mapped back to SYBYL
//! types, histidine tautomer and arginine resonance states need explicit
//! aromatic/planar nitrogen assignments, bond orders have to be re-derived
//! from the corrected atom types, and residue names carrying protonation
//! state codes must be folded back to their standard three-letter codes.
//! This crate performs that normalization on the raw section text of a MOL2
//! document, preserving the exact fixed-column layout downstream tools
//! expect.
//!
//! # Features
//!
//! - **MOL2 normalization** — Section-preserving rewrite of atom, bond,
//!   molecule and substructure blocks with SYBYL type correction,
//!   residue canonicalization and backbone/amide tagging
//! - **Fingerprint decoding** — Bit-matrix interaction fingerprints
//!   (regular, polar and extended vocabularies) and the compact
//!   triplet-fingerprint encodings (dense, `pos:value` sparse and
//!   run-length compressed)
//! - **Batch tool invocation** — Input-file generation, batch execution
//!   with timeout, and per-pair retry for the external detection binary
//!
//! # Quick start
//!
//! ```
//! use plif_forge::io::mol2;
//! use plif_forge::norm::{self, ConversionTables, NormConfig};
//!
//! let text = "\
//! @<TRIPOS>MOLECULE
//! frame_1
//!  2 1 1
//! @<TRIPOS>ATOM
//!       1 N         24.9820   16.9350   10.1130 N.4     1 ARG1     0.1305
//!       2 CA        25.7236   18.1922   10.2811 C.3     1 ARG1     0.0371
//! @<TRIPOS>BOND
//!      1    1    2 1
//! @<TRIPOS>SUBSTRUCTURE
//!      1 ARG1        1 RESIDUE           4 A     ARG     1
//! ";
//!
//! let mut doc = mol2::read_str(text)?;
//! let config = NormConfig { backbone_tag: true };
//! norm::normalize(&mut doc, &config, &ConversionTables::default())?;
//! let fixed = mol2::write_string(&doc);
//! assert!(fixed.starts_with("@<TRIPOS>MOLECULE"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Module organization
//!
//! - [`io`] — MOL2 document reading/writing and fingerprint file decoding
//! - [`norm`] — The normalization pipeline and its conversion tables
//! - [`run`] — External tool invocation (batch input files, execution)
//! - [`model`] — Document, record and fingerprint data types

pub mod io;
pub mod model;
pub mod norm;
pub mod run;

pub use model::document::Mol2Document;
pub use model::fingerprint::{FingerprintMatrix, FingerprintRow};
pub use model::types::{IfpVariant, ParseFormatError, TifpEncoding};

pub use norm::{ConversionTables, NormConfig, NormalizationContext};

pub use run::{RuleOverrides, ToolInvocation, ToolRunner};
