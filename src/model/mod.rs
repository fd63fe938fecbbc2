pub mod atom;
pub mod bond;
pub mod document;
pub mod fingerprint;
pub mod residue;
pub mod types;
