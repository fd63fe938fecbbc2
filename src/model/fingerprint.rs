use super::types::RECOGNIZED_CODES;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized interaction code: '{0}'")]
pub struct UnknownInteractionError(String);

/// One fingerprint row: either the decoded values, or a marker for a frame
/// whose fingerprint could not be computed or whose output file is missing.
///
/// The marker is deliberately a distinct variant rather than a sentinel
/// value, so an unavailable frame can never be mistaken for an all-zero
/// fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FingerprintRow {
    Available(Vec<u32>),
    Unavailable,
}

impl FingerprintRow {
    pub fn is_available(&self) -> bool {
        matches!(self, FingerprintRow::Available(_))
    }

    pub fn values(&self) -> Option<&[u32]> {
        match self {
            FingerprintRow::Available(values) => Some(values),
            FingerprintRow::Unavailable => None,
        }
    }
}

/// A fingerprint table: one labeled column per (residue, interaction code)
/// pair — or per bit position for triplet fingerprints — and one row per
/// structure, in input order.
///
/// Every input structure is represented by exactly one row; failures become
/// [`FingerprintRow::Unavailable`] rows instead of being dropped, so row
/// indices always line up with the structure list that produced the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<FingerprintRow>,
}

impl FingerprintMatrix {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// A matrix whose columns are plain bit positions, for triplet
    /// fingerprints with no residue header.
    pub fn with_index_columns(len: usize) -> Self {
        Self::new((0..len).map(|i| i.to_string()).collect())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn push(&mut self, row: FingerprintRow) {
        self.rows.push(row);
    }

    pub fn push_unavailable(&mut self) {
        self.rows.push(FingerprintRow::Unavailable);
    }

    /// Keeps only the columns carrying one of the given interaction codes.
    ///
    /// Fails if a requested code is not part of any known vocabulary.
    pub fn filter_interactions(
        &self,
        interactions: &[&str],
    ) -> Result<FingerprintMatrix, UnknownInteractionError> {
        for code in interactions {
            if !RECOGNIZED_CODES.contains(code) {
                return Err(UnknownInteractionError(code.to_string()));
            }
        }

        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, label)| {
                interactions
                    .iter()
                    .any(|code| label.ends_with(code))
            })
            .map(|(i, _)| i)
            .collect();

        Ok(self.select_columns(&keep))
    }

    /// Keeps only the columns belonging to the given residue sequence
    /// numbers.
    pub fn filter_residues(&self, residues: &[u32]) -> FingerprintMatrix {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, label)| {
                residue_number(label).is_some_and(|n| residues.contains(&n))
            })
            .map(|(i, _)| i)
            .collect();

        self.select_columns(&keep)
    }

    fn select_columns(&self, keep: &[usize]) -> FingerprintMatrix {
        let columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| match row {
                FingerprintRow::Available(values) => {
                    FingerprintRow::Available(keep.iter().map(|&i| values[i]).collect())
                }
                FingerprintRow::Unavailable => FingerprintRow::Unavailable,
            })
            .collect();
        FingerprintMatrix { columns, rows }
    }
}

/// Extracts the residue sequence number from a column label of the form
/// `"<residue> <code>"`, e.g. `"GLU117 HBD"` → 117.
fn residue_number(label: &str) -> Option<u32> {
    let residue = label.rsplit_once(' ').map(|(r, _)| r).unwrap_or(label);
    let digits: String = residue.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FingerprintMatrix {
        let mut matrix = FingerprintMatrix::new(vec![
            "GLU117 HBD".to_string(),
            "GLU117 HBA".to_string(),
            "TRP94 HYD".to_string(),
        ]);
        matrix.push(FingerprintRow::Available(vec![1, 0, 1]));
        matrix.push(FingerprintRow::Unavailable);
        matrix
    }

    #[test]
    fn interaction_filter_selects_matching_columns() {
        let filtered = sample().filter_interactions(&["HBD"]).unwrap();
        assert_eq!(filtered.columns, vec!["GLU117 HBD"]);
        assert_eq!(filtered.rows[0], FingerprintRow::Available(vec![1]));
        assert_eq!(filtered.rows[1], FingerprintRow::Unavailable);
    }

    #[test]
    fn interaction_filter_rejects_unknown_code() {
        let err = sample().filter_interactions(&["XYZ"]).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized interaction code: 'XYZ'");
    }

    #[test]
    fn residue_filter_selects_by_sequence_number() {
        let filtered = sample().filter_residues(&[94]);
        assert_eq!(filtered.columns, vec!["TRP94 HYD"]);
    }

    #[test]
    fn index_columns_cover_declared_length() {
        let matrix = FingerprintMatrix::with_index_columns(4);
        assert_eq!(matrix.columns, vec!["0", "1", "2", "3"]);
    }
}
