use std::path::Path;

use anyhow::{Context as _, Result};

use plif_forge::io::{ifp, tifp};
use plif_forge::run::ToolInvocation;
use plif_forge::{FingerprintMatrix, FingerprintRow};

use crate::cli::{DecodeArgs, DecodeKind};
use crate::display::{self, Context, Progress};

/// Value written into CSV cells of unavailable rows; deliberately not a
/// digit so it can never be read back as a fingerprint bit.
const UNAVAILABLE: &str = "NA";

pub fn run(args: DecodeArgs, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, 2);
    progress.step(&format!("Decoding {} fingerprint files", args.files.len()));

    let (matrix, warnings) = match args.kind {
        DecodeKind::Ifp => ifp::read_many(&args.files, args.variant.into())
            .context("Failed to decode fingerprint files")?,
        DecodeKind::Tifp => {
            let length = args
                .length
                .unwrap_or_else(|| ToolInvocation::tifp_len(!args.full));
            tifp::read_many(&args.files, args.encoding.into(), length)
                .context("Failed to decode fingerprint files")?
        }
    };

    display::print_warnings(&warnings);
    progress.complete_step(&format!(
        "Decoded {} rows × {} columns",
        matrix.row_count(),
        matrix.width()
    ));

    progress.step("Writing CSV table");
    write_matrix_csv(&args.output, &matrix)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    progress.complete_step(&format!("Wrote {}", args.output.display()));
    progress.finish();

    Ok(())
}

fn write_matrix_csv(path: &Path, matrix: &FingerprintMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(matrix.width() + 1);
    header.push("frame".to_string());
    header.extend(matrix.columns.iter().cloned());
    writer.write_record(&header)?;

    for (index, row) in matrix.rows.iter().enumerate() {
        let mut record = Vec::with_capacity(matrix.width() + 1);
        record.push(index.to_string());
        match row {
            FingerprintRow::Available(values) => {
                record.extend(values.iter().map(u32::to_string));
            }
            FingerprintRow::Unavailable => {
                record.extend((0..matrix.width()).map(|_| UNAVAILABLE.to_string()));
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
