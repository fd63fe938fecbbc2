use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow, bail};

use plif_forge::io::mol2;
use plif_forge::run::{self, RuleOverrides, ToolInvocation, ToolRunner};

use crate::cli::{ComputeArgs, ComputeMode};
use crate::display::{Context, Progress};

pub fn run(args: ComputeArgs, ctx: Context) -> Result<()> {
    let receptors = mol2::list_dir(&args.receptor_dir)
        .with_context(|| format!("Failed to list '{}'", args.receptor_dir.display()))?;
    let ligands = mol2::list_dir(&args.ligand_dir)
        .with_context(|| format!("Failed to list '{}'", args.ligand_dir.display()))?;
    if receptors.is_empty() {
        bail!(
            "No MOL2 structures found in '{}'",
            args.receptor_dir.display()
        );
    }

    let rules = parse_rules(&args.rules)?;
    let invocation = match args.mode {
        ComputeMode::Ifp => ToolInvocation::ifp(args.variant.into(), receptors, ligands),
        ComputeMode::Tifp => {
            ToolInvocation::tifp(args.encoding.into(), !args.full, receptors, ligands)
        }
        ComputeMode::Ints => {
            ToolInvocation::ints(args.ints_mode.into(), args.new_hyd, receptors, ligands)
        }
    }
    .with_rules(&rules);

    let runner = ToolRunner::locate(args.tool.as_deref())
        .context("Could not resolve the detection binary")?
        .with_timeout(Duration::from_secs(args.timeout));

    let mut progress = Progress::new(ctx.interactive, 2);
    progress.step(&format!(
        "Running {} over {} structure pairs",
        invocation.tool,
        invocation.pair_count()
    ));

    let input_path = args.output_dir.join("batch_input.in");
    let outcome = runner
        .execute(&invocation, &input_path, &args.output_dir)
        .context("External tool invocation failed")?;

    progress.complete_step(if outcome.retried_line_by_line {
        "Calculation finished (batch crashed; pairs were rerun individually)"
    } else {
        "Calculation finished"
    });

    progress.step("Collecting results");
    write_captures(&args, &outcome.combined_output, &outcome.stderr)?;

    if let Some(map_path) = &args.map {
        let map = run::result_map(&invocation, &outcome.outputs)
            .context("Could not map structures to their result files")?;
        write_map_csv(map_path, &map)?;
    }
    progress.complete_step("Results collected");
    progress.finish();

    Ok(())
}

fn parse_rules(specs: &[String]) -> Result<RuleOverrides> {
    let mut rules = RuleOverrides::new();
    for spec in specs {
        let (code, value) = spec
            .split_once('=')
            .ok_or_else(|| anyhow!("Rule override must be CODE=VALUE, got '{}'", spec))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("Invalid rule value in '{}'", spec))?;
        rules.set(code, value)?;
    }
    Ok(rules)
}

fn write_captures(args: &ComputeArgs, stdout: &str, stderr: &str) -> Result<()> {
    let stdout_name = match args.mode {
        ComputeMode::Ifp => "ligands.ifp",
        ComputeMode::Tifp | ComputeMode::Ints => "tool_stdout.txt",
    };
    let stdout_path = args.output_dir.join(stdout_name);
    std::fs::write(&stdout_path, stdout)
        .with_context(|| format!("Failed to write '{}'", stdout_path.display()))?;

    if !stderr.is_empty() {
        let stderr_path = args.output_dir.join("tool_stderr.txt");
        std::fs::write(&stderr_path, stderr)
            .with_context(|| format!("Failed to write '{}'", stderr_path.display()))?;
    }
    Ok(())
}

fn write_map_csv(path: &Path, map: &[run::PairRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    writer.write_record(["Receptor_file", "Ligand_file", "Output_file"])?;
    for record in map {
        writer.write_record([
            record.receptor.display().to_string(),
            record.ligand.display().to_string(),
            record
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
