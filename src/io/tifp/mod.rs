mod reader;

pub use reader::{read, read_many, read_path};
