use crate::io::{Format, error::Error};
use crate::model::fingerprint::{FingerprintMatrix, FingerprintRow};
use crate::model::types::IfpVariant;
use std::io::BufRead;
use std::path::Path;

/// Result of decoding one bit-matrix fingerprint file, together with any
/// non-fatal irregularities encountered on the way.
#[derive(Debug)]
pub struct IfpDecode {
    pub outcome: IfpOutcome,
    pub warnings: Vec<String>,
}

/// Either a decoded matrix, or the signal that the bit rows do not fit the
/// header-derived column count — a structurally incompatible file rather
/// than a parse failure.
#[derive(Debug)]
pub enum IfpOutcome {
    Matrix(FingerprintMatrix),
    WidthMismatch { expected: usize, found: usize },
}

pub fn read_path(path: &Path, variant: IfpVariant) -> Result<IfpDecode, Error> {
    let file = std::fs::File::open(path)?;
    read(std::io::BufReader::new(file), variant)
}

/// Decodes a bit-matrix fingerprint file.
///
/// Header lines start with `|` and list the interacting residues. The first
/// header is authoritative: a later header of the same length that differs
/// is reported as a warning and ignored, a header of a different length is
/// a fatal inconsistency. `0`/`1` lines are bit rows (one bit per residue
/// and interaction code), `|WARNING` lines mark frames the tool failed to
/// compute and become unavailable rows, `|ERROR` lines are skipped.
pub fn read<R: BufRead>(reader: R, variant: IfpVariant) -> Result<IfpDecode, Error> {
    let mut header: Option<String> = None;
    let mut rows: Vec<FingerprintRow> = Vec::new();
    let mut warnings = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;

        if line.starts_with('|') && !line.starts_with("|ERROR") {
            if line.starts_with("|WARNING") {
                if header.is_none() {
                    return Err(Error::parse(
                        Format::Ifp,
                        line_no,
                        "warning marker before any fingerprint header",
                    ));
                }
                rows.push(FingerprintRow::Unavailable);
            } else {
                match &header {
                    None => header = Some(line),
                    Some(first) if *first == line => {}
                    Some(first) if first.len() == line.len() => {
                        warnings.push(format!(
                            "fingerprint header changed at line {}; \
                             keeping the first detected header",
                            line_no
                        ));
                    }
                    Some(first) => {
                        return Err(Error::HeaderMismatch {
                            line: line_no,
                            expected: first.len(),
                            found: line.len(),
                        });
                    }
                }
            }
        } else if line.starts_with('0') || line.starts_with('1') {
            let bits = parse_bit_row(line.trim_end(), line_no)?;
            rows.push(FingerprintRow::Available(bits));
        }
    }

    let header = header
        .ok_or_else(|| Error::parse(Format::Ifp, 0, "no fingerprint header found in file"))?;
    let columns = header_columns(&header, variant);

    if let Some(first_width) = rows.iter().find_map(|r| r.values().map(<[u32]>::len)) {
        if first_width != columns.len() {
            return Ok(IfpDecode {
                outcome: IfpOutcome::WidthMismatch {
                    expected: columns.len(),
                    found: first_width,
                },
                warnings,
            });
        }
        if let Some(bad) = rows
            .iter()
            .filter_map(FingerprintRow::values)
            .find(|v| v.len() != first_width)
        {
            return Err(Error::parse(
                Format::Ifp,
                0,
                format!(
                    "bit rows have inconsistent widths ({} and {})",
                    first_width,
                    bad.len()
                ),
            ));
        }
    }

    let mut matrix = FingerprintMatrix::new(columns);
    matrix.rows = rows;
    Ok(IfpDecode {
        outcome: IfpOutcome::Matrix(matrix),
        warnings,
    })
}

/// Assembles one matrix from a list of per-structure output files.
///
/// Every path contributes at least one row: a missing or structurally
/// incompatible file becomes a single unavailable row, keeping row indices
/// aligned with the structure list.
pub fn read_many(
    paths: &[impl AsRef<Path>],
    variant: IfpVariant,
) -> Result<(FingerprintMatrix, Vec<String>), Error> {
    let mut matrix: Option<FingerprintMatrix> = None;
    let mut leading_unavailable = 0usize;
    let mut warnings = Vec::new();

    let push_unavailable = |matrix: &mut Option<FingerprintMatrix>, pending: &mut usize| {
        match matrix {
            Some(m) => m.push_unavailable(),
            None => *pending += 1,
        }
    };

    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            warnings.push(format!("missing fingerprint file: {}", path.display()));
            push_unavailable(&mut matrix, &mut leading_unavailable);
            continue;
        }

        let decoded = read_path(path, variant)?;
        warnings.extend(decoded.warnings);

        match decoded.outcome {
            IfpOutcome::Matrix(file_matrix) => match &mut matrix {
                None => {
                    let mut m = FingerprintMatrix::new(file_matrix.columns);
                    for _ in 0..leading_unavailable {
                        m.push_unavailable();
                    }
                    m.rows.extend(file_matrix.rows);
                    matrix = Some(m);
                }
                Some(m) => {
                    if m.columns != file_matrix.columns {
                        return Err(Error::InconsistentBatch(format!(
                            "residue columns in '{}' differ from earlier files",
                            path.display()
                        )));
                    }
                    m.rows.extend(file_matrix.rows);
                }
            },
            IfpOutcome::WidthMismatch { expected, found } => {
                warnings.push(format!(
                    "fingerprint width mismatch in '{}' (expected {}, found {}); \
                     substituting an unavailable row",
                    path.display(),
                    expected,
                    found
                ));
                push_unavailable(&mut matrix, &mut leading_unavailable);
            }
        }
    }

    let matrix = matrix.ok_or_else(|| {
        Error::InconsistentBatch("none of the fingerprint files could be decoded".to_string())
    })?;
    Ok((matrix, warnings))
}

fn parse_bit_row(line: &str, line_no: usize) -> Result<Vec<u32>, Error> {
    line.chars()
        .map(|c| {
            c.to_digit(10).ok_or_else(|| {
                Error::parse(
                    Format::Ifp,
                    line_no,
                    format!("unexpected character '{}' in bit row", c),
                )
            })
        })
        .collect()
}

/// Expands the residue header into one column label per residue and
/// interaction code, in file column order.
fn header_columns(header: &str, variant: IfpVariant) -> Vec<String> {
    let residues = header.trim_end().split('|').skip(1);
    let mut columns = Vec::new();
    for residue in residues {
        for code in variant.codes() {
            columns.push(format!("{} {}", residue, code));
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // Two residues, polar vocabulary (5 codes): 10 bits per row.
    const POLAR_FILE: &str = "\
|GLU117|TRP94
0100110010
1100100010
";

    fn decode(text: &str, variant: IfpVariant) -> IfpDecode {
        read(Cursor::new(text), variant).unwrap()
    }

    #[test]
    fn decodes_polar_bit_rows() {
        let decoded = decode(POLAR_FILE, IfpVariant::Polar);
        let IfpOutcome::Matrix(matrix) = decoded.outcome else {
            panic!("expected a matrix");
        };
        assert_eq!(matrix.width(), 10);
        assert_eq!(matrix.columns[0], "GLU117 HBD");
        assert_eq!(matrix.columns[5], "TRP94 HBD");
        assert_eq!(
            matrix.rows[0],
            FingerprintRow::Available(vec![0, 1, 0, 0, 1, 1, 0, 0, 1, 0])
        );
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn repeated_identical_header_is_accepted() {
        let text = "|GLU117|TRP94\n0100110010\n|GLU117|TRP94\n1100100010\n";
        let decoded = decode(text, IfpVariant::Polar);
        assert!(matches!(decoded.outcome, IfpOutcome::Matrix(m) if m.row_count() == 2));
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn changed_header_of_equal_length_warns_and_keeps_first() {
        let text = "|GLU117|TRP94\n0100110010\n|GLU117|TRP95\n1100100010\n";
        let decoded = decode(text, IfpVariant::Polar);
        let IfpOutcome::Matrix(matrix) = decoded.outcome else {
            panic!("expected a matrix");
        };
        assert_eq!(matrix.columns[5], "TRP94 HBD");
        assert_eq!(decoded.warnings.len(), 1);
    }

    #[test]
    fn changed_header_of_different_length_is_fatal() {
        let text = "|GLU117|TRP94\n0100110010\n|GLU117|TRP94|SER23\n1100100010\n";
        let err = read(Cursor::new(text), IfpVariant::Polar).unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { .. }));
    }

    #[test]
    fn warning_line_becomes_unavailable_row() {
        let text = "|GLU117|TRP94\n0100110010\n|WARNING the tool could not compute this frame\n";
        let decoded = decode(text, IfpVariant::Polar);
        let IfpOutcome::Matrix(matrix) = decoded.outcome else {
            panic!("expected a matrix");
        };
        assert_eq!(matrix.rows[1], FingerprintRow::Unavailable);
    }

    #[test]
    fn error_lines_are_skipped_entirely() {
        let text = "|GLU117|TRP94\n|ERROR bad input pair\n0100110010\n";
        let decoded = decode(text, IfpVariant::Polar);
        assert!(matches!(decoded.outcome, IfpOutcome::Matrix(m) if m.row_count() == 1));
    }

    #[test]
    fn row_width_not_matching_header_yields_mismatch_outcome() {
        // regular vocabulary expects 14 bits for two residues, rows carry 10
        let decoded = decode(POLAR_FILE, IfpVariant::Regular);
        assert!(matches!(
            decoded.outcome,
            IfpOutcome::WidthMismatch {
                expected: 14,
                found: 10
            }
        ));
    }

    #[test]
    fn missing_file_yields_unavailable_row() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("frame_1.ifp");
        std::fs::write(&present, POLAR_FILE).unwrap();
        let absent = dir.path().join("frame_2.ifp");

        let (matrix, warnings) =
            read_many(&[present, absent], IfpVariant::Polar).unwrap();
        assert_eq!(matrix.row_count(), 3);
        assert_eq!(matrix.rows[2], FingerprintRow::Unavailable);
        assert_eq!(matrix.width(), 10);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn missing_file_before_first_decodable_one_keeps_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("frame_1.ifp");
        let present = dir.path().join("frame_2.ifp");
        std::fs::write(&present, POLAR_FILE).unwrap();

        let (matrix, _) = read_many(&[absent, present], IfpVariant::Polar).unwrap();
        assert_eq!(matrix.rows[0], FingerprintRow::Unavailable);
        assert!(matrix.rows[1].is_available());
    }
}
