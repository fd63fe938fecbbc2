use anyhow::{Context as _, Result, bail};
use rayon::prelude::*;

use plif_forge::io::mol2;
use plif_forge::norm::{self, ConversionTables, ForceFieldTable, NormConfig, OverrideTable};

use crate::cli::FixArgs;
use crate::display::{Context, Progress};

pub fn run(args: FixArgs, ctx: Context) -> Result<()> {
    let mut files = args.files.clone();
    if let Some(dir) = &args.dir {
        files.extend(
            mol2::list_dir(dir)
                .with_context(|| format!("Failed to list '{}'", dir.display()))?,
        );
    }
    if files.is_empty() {
        bail!("No MOL2 files to normalize. Pass file paths or --dir <DIR>.");
    }

    let tables = load_tables(&args)?;
    let config = NormConfig {
        backbone_tag: args.backbone,
    };

    let mut progress = Progress::new(ctx.interactive, 1);
    progress.step("Normalizing structures");

    match &args.output_dir {
        None => norm::fix_files(&files, &config, &tables)
            .context("Failed to normalize structure files")?,
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create '{}'", dir.display()))?;
            files
                .par_iter()
                .try_for_each(|path| {
                    let name = path
                        .file_name()
                        .ok_or_else(|| anyhow::anyhow!("Invalid file path '{}'", path.display()))?;
                    norm::fix_file(path, Some(&dir.join(name)), &config, &tables)
                        .with_context(|| format!("Failed to normalize '{}'", path.display()))
                })?;
        }
    }

    progress.complete_step(&format!(
        "Normalized {} structure file{}",
        files.len(),
        if files.len() == 1 { "" } else { "s" }
    ));
    progress.finish();

    Ok(())
}

fn load_tables(args: &FixArgs) -> Result<ConversionTables> {
    let force_field = args
        .force_field
        .as_deref()
        .map(ForceFieldTable::load)
        .transpose()
        .context("Failed to load the force-field conversion table")?;

    let overrides = args
        .overrides
        .as_deref()
        .map(OverrideTable::load)
        .transpose()
        .context("Failed to load the atom type override table")?;

    Ok(ConversionTables {
        force_field,
        overrides,
    })
}
