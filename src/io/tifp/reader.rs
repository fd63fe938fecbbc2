use crate::io::{Format, error::Error};
use crate::model::fingerprint::{FingerprintMatrix, FingerprintRow};
use crate::model::types::TifpEncoding;
use std::io::BufRead;
use std::path::Path;

pub fn read_path(
    path: &Path,
    encoding: TifpEncoding,
    declared_len: usize,
) -> Result<Vec<u32>, Error> {
    let file = std::fs::File::open(path)?;
    read(std::io::BufReader::new(file), encoding, declared_len)
}

/// Decodes one triplet-fingerprint file.
///
/// The fingerprint sits on the last non-empty line; the leading token is a
/// label and is dropped. Sparse encodings scatter into a zero-filled vector
/// of `declared_len`; the dense encoding returns the values as written.
pub fn read<R: BufRead>(
    reader: R,
    encoding: TifpEncoding,
    declared_len: usize,
) -> Result<Vec<u32>, Error> {
    let mut last_line: Option<(usize, String)> = None;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            last_line = Some((idx + 1, line));
        }
    }

    let (line_no, line) = last_line
        .ok_or_else(|| Error::parse(Format::Tifp, 0, "fingerprint file contains no data"))?;
    let tokens: Vec<&str> = line.split_whitespace().skip(1).collect();

    match encoding {
        TifpEncoding::Std => decode_std(&tokens, line_no),
        TifpEncoding::Svm => decode_svm(&tokens, declared_len, line_no),
        TifpEncoding::Cmp => decode_cmp(&tokens, declared_len, line_no),
    }
}

/// Assembles one matrix (bit-position columns) from per-structure files.
/// Missing files become unavailable rows so row order matches the input
/// structure list.
pub fn read_many(
    paths: &[impl AsRef<Path>],
    encoding: TifpEncoding,
    declared_len: usize,
) -> Result<(FingerprintMatrix, Vec<String>), Error> {
    let mut matrix = FingerprintMatrix::with_index_columns(declared_len);
    let mut warnings = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            warnings.push(format!("missing fingerprint file: {}", path.display()));
            matrix.push_unavailable();
            continue;
        }

        let values = read_path(path, encoding, declared_len)?;
        if values.len() != declared_len {
            return Err(Error::InconsistentBatch(format!(
                "fingerprint in '{}' has length {} but {} was declared",
                path.display(),
                values.len(),
                declared_len
            )));
        }
        matrix.push(FingerprintRow::Available(values));
    }

    Ok((matrix, warnings))
}

fn decode_std(tokens: &[&str], line_no: usize) -> Result<Vec<u32>, Error> {
    tokens
        .iter()
        .map(|t| {
            t.parse::<u32>().map_err(|_| {
                Error::parse(
                    Format::Tifp,
                    line_no,
                    format!("invalid fingerprint value '{}'", t),
                )
            })
        })
        .collect()
}

fn decode_svm(tokens: &[&str], declared_len: usize, line_no: usize) -> Result<Vec<u32>, Error> {
    let mut fp = vec![0u32; declared_len];
    for token in tokens {
        let (position, value) = token.split_once(':').ok_or_else(|| {
            Error::parse(
                Format::Tifp,
                line_no,
                format!("expected 'position:value' pair, found '{}'", token),
            )
        })?;
        let position: usize = position.parse().map_err(|_| {
            Error::parse(
                Format::Tifp,
                line_no,
                format!("invalid fingerprint position '{}'", position),
            )
        })?;
        let value: u32 = value.parse().map_err(|_| {
            Error::parse(
                Format::Tifp,
                line_no,
                format!("invalid fingerprint value '{}'", value),
            )
        })?;
        let slot = fp.get_mut(position).ok_or_else(|| {
            Error::parse(
                Format::Tifp,
                line_no,
                format!(
                    "position {} is outside the declared length {}",
                    position, declared_len
                ),
            )
        })?;
        *slot = value;
    }
    Ok(fp)
}

fn decode_cmp(tokens: &[&str], declared_len: usize, line_no: usize) -> Result<Vec<u32>, Error> {
    let mut fp = vec![0u32; declared_len];
    let mut pointer = 0usize;
    for token in tokens {
        if let Some(skip) = token.strip_prefix('[') {
            let skip = skip.trim_end_matches(']');
            let skip: usize = skip.parse().map_err(|_| {
                Error::parse(
                    Format::Tifp,
                    line_no,
                    format!("invalid skip count '{}'", token),
                )
            })?;
            pointer += skip;
        } else {
            let value: u32 = token.parse().map_err(|_| {
                Error::parse(
                    Format::Tifp,
                    line_no,
                    format!("invalid fingerprint value '{}'", token),
                )
            })?;
            let slot = fp.get_mut(pointer).ok_or_else(|| {
                Error::parse(
                    Format::Tifp,
                    line_no,
                    format!(
                        "write position {} is outside the declared length {}",
                        pointer, declared_len
                    ),
                )
            })?;
            *slot = value;
            pointer += 1;
        }
    }
    Ok(fp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn svm_scatter_writes_declared_positions() {
        let fp = read(Cursor::new("fp_1 0:1 3:1\n"), TifpEncoding::Svm, 5).unwrap();
        assert_eq!(fp, vec![1, 0, 0, 1, 0]);
    }

    #[test]
    fn cmp_skip_advances_write_pointer() {
        let fp = read(Cursor::new("fp_1 1 [2] 1\n"), TifpEncoding::Cmp, 4).unwrap();
        assert_eq!(fp, vec![1, 0, 0, 1]);
    }

    #[test]
    fn std_returns_dense_values() {
        let fp = read(Cursor::new("fp_1 0 2 0 1\n"), TifpEncoding::Std, 4).unwrap();
        assert_eq!(fp, vec![0, 2, 0, 1]);
    }

    #[test]
    fn last_non_empty_line_wins() {
        let text = "header line ignored\nfp_1 0:1\n";
        let fp = read(Cursor::new(text), TifpEncoding::Svm, 3).unwrap();
        assert_eq!(fp, vec![0, 1, 0]);
    }

    #[test]
    fn out_of_range_position_is_a_format_error() {
        let err = read(Cursor::new("fp_1 7:1\n"), TifpEncoding::Svm, 5).unwrap_err();
        assert!(err.to_string().contains("outside the declared length"));
    }

    #[test]
    fn empty_file_is_a_format_error() {
        assert!(read(Cursor::new(""), TifpEncoding::Std, 4).is_err());
    }

    #[test]
    fn missing_file_becomes_unavailable_row() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("out_tifp_0.tifp");
        std::fs::write(&present, "fp_0 0:1 2:1\n").unwrap();
        let absent = dir.path().join("out_tifp_1.tifp");

        let (matrix, warnings) =
            read_many(&[present, absent], TifpEncoding::Svm, 4).unwrap();
        assert_eq!(matrix.row_count(), 2);
        assert_eq!(matrix.rows[0], FingerprintRow::Available(vec![1, 0, 1, 0]));
        assert_eq!(matrix.rows[1], FingerprintRow::Unavailable);
        assert_eq!(warnings.len(), 1);
    }
}
