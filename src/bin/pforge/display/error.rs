use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = collect_hints(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Option<Vec<String>> {
    let mut hints = Vec::new();

    collect_norm_hints(err, &mut hints);
    collect_io_hints(err, &mut hints);
    collect_run_hints(err, &mut hints);

    if hints.is_empty() { None } else { Some(hints) }
}

fn collect_norm_hints(err: &Error, hints: &mut Vec<String>) {
    use plif_forge::norm::Error as NormError;

    let Some(norm_err) = err.downcast_ref::<NormError>() else {
        return;
    };

    match norm_err {
        NormError::UnsupportedAtomType(atom_type) => {
            hints.push(format!(
                "The force-field table has no bucket containing '{}'",
                atom_type
            ));
            hints.push("Add the type to the matching SYBYL entry in the table".to_string());
        }
        NormError::MissingOverride { residue, .. } => {
            hints.push(format!(
                "Add the atom under the [{}] section of the override table",
                residue
            ));
        }
        NormError::Atom(_) | NormError::Bond(_) => {
            hints.push("Check the MOL2 file for truncated or misaligned records".to_string());
        }
        NormError::TableParse(_) => {
            hints.push("Conversion tables are TOML: check quoting and brackets".to_string());
        }
        NormError::Document(_) | NormError::Io { .. } => {}
    }
}

fn collect_io_hints(err: &Error, hints: &mut Vec<String>) {
    use plif_forge::io::Error as IoError;

    let Some(io_err) = err.downcast_ref::<IoError>() else {
        return;
    };

    match io_err {
        IoError::Parse { format, line, .. } => {
            hints.push(format!(
                "Parser encountered an issue near line {} in {} data",
                line, format
            ));
            hints.push("Inspect the file around that line for malformed entries".to_string());
        }
        IoError::HeaderMismatch { .. } => {
            hints.push("The residue set changed while the tool was running".to_string());
            hints.push("Regenerate the fingerprints from one consistent receptor".to_string());
        }
        IoError::InconsistentBatch(_) => {
            hints.push("Rerun the failed pair individually from the batch input file".to_string());
        }
        IoError::Io { source } => {
            if source.kind() == std::io::ErrorKind::NotFound {
                hints.push("Check the path spelling and ensure the file exists".to_string());
            }
        }
    }
}

fn collect_run_hints(err: &Error, hints: &mut Vec<String>) {
    use plif_forge::run::Error as RunError;

    let Some(run_err) = err.downcast_ref::<RunError>() else {
        return;
    };

    match run_err {
        RunError::ToolNotFound { .. } => {
            hints.push("Pass --tool with the full path to the detection binary".to_string());
        }
        RunError::Timeout(_) => {
            hints.push("Raise --timeout, or split the batch into smaller runs".to_string());
        }
        RunError::PairCountMismatch { .. } => {
            hints.push(
                "Receptor and ligand directories must hold one file per frame".to_string(),
            );
        }
        RunError::UnknownRuleParameter(_) => {
            hints.push("Valid codes include DHB, DHYD, DIO, DAR, DPIC, AH, APIC".to_string());
        }
        RunError::ResultCountMismatch { .. } | RunError::Io { .. } => {}
    }
}
