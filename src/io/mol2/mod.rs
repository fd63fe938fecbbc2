mod reader;
mod writer;

pub use reader::{read, read_path, read_str};
pub use writer::{write, write_path, write_string};

use std::path::{Path, PathBuf};

/// Lists the MOL2 files in a directory, sorted by file name so frame order
/// stays stable across runs.
pub fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, crate::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mol2"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_dir_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["frame_2.mol2", "frame_1.mol2", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let files = list_dir(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["frame_1.mol2", "frame_2.mol2"]);
    }
}
