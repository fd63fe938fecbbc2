use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed BOND record: '{0}'")]
pub struct ParseBondError(String);

/// One record from the `@<TRIPOS>BOND` section.
///
/// The order field stays a string because re-typing writes both numeric
/// orders (`2`) and symbolic ones (`ar`, `am`) into the same column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondRecord {
    pub id: u32,
    pub a: u32,
    pub b: u32,
    pub order: String,
    /// `BACKBONE` / `BACKBONE|INTERRES` annotation; empty when absent.
    pub tag: String,
}

impl BondRecord {
    pub fn parse(line: &str) -> Result<Self, ParseBondError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ParseBondError(line.to_string()));
        }

        let number = |s: &str| {
            s.parse::<u32>()
                .map_err(|_| ParseBondError(line.to_string()))
        };

        Ok(Self {
            id: number(fields[0])?,
            a: number(fields[1])?,
            b: number(fields[2])?,
            order: fields[3].to_string(),
            tag: fields.get(4).copied().unwrap_or("").to_string(),
        })
    }

    pub fn compose(&self) -> String {
        let tag = if self.tag.is_empty() {
            String::new()
        } else {
            format!("  {}", self.tag)
        };
        format!("{:>6}{:>5}{:>5} {}{}", self.id, self.a, self.b, self.order, tag)
    }
}
