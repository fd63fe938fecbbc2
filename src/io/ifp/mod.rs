mod reader;

pub use reader::{IfpDecode, IfpOutcome, read, read_many, read_path};
