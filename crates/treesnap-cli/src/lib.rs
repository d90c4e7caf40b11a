//! CLI logic for the TreeSnap focus tree renderer.
//!
//! Each input focus file is parsed, laid out against the assets of the game
//! folder and mod folders, and written to `<output-dir>/<stem>.svg`. A tree
//! that fails is reported and the batch moves on to the next file.

pub mod error_adapter;

mod args;
mod config;
mod sources;
mod texture;

pub use args::Args;
pub use sources::SourceRoots;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use treesnap::{TreeBuilder, TreeSnapError, config::AppConfig};

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// SVG files written, in input order.
    pub rendered: Vec<PathBuf>,
    /// Inputs that failed with their errors.
    pub failed: Vec<(PathBuf, TreeSnapError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the TreeSnap CLI application
///
/// # Errors
///
/// Returns `TreeSnapError` when the configuration cannot be loaded or the
/// output directory cannot be created. Failures of individual trees are
/// collected in the returned [`BatchReport`].
pub fn run(args: &Args) -> Result<BatchReport, TreeSnapError> {
    info!(
        input_count = args.inputs.len(),
        game_path = args.game,
        output_dir = args.output_dir;
        "Processing focus trees"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;

    let roots = SourceRoots::new(&args.game, &args.mods);
    let builder = TreeBuilder::new(app_config);

    let mut report = BatchReport::default();
    for input in &args.inputs {
        let input = PathBuf::from(input);
        match render_tree(&builder, &roots, &input, output_dir) {
            Ok(output) => {
                info!(output_file = output.display().to_string(); "SVG exported successfully");
                report.rendered.push(output);
            }
            Err(err) => {
                warn!(input_path = input.display().to_string(), err:% = err; "Focus tree failed");
                report.failed.push((input, err));
            }
        }
    }

    info!(
        rendered = report.rendered.len(),
        failed = report.failed.len();
        "Batch finished"
    );
    Ok(report)
}

fn render_tree(
    builder: &TreeBuilder,
    roots: &SourceRoots,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf, TreeSnapError> {
    info!(input_path = input.display().to_string(); "Rendering focus tree");

    let config: &AppConfig = builder.config();
    let assets = roots
        .with_focus_file(input)
        .load_assets(&config.text.language)?;

    let tree = sources::parse_file(input, treesnap_parser::parse_focus_tree)?;
    let layout = builder.layout(&tree, &assets)?;
    if !layout.warnings().is_empty() {
        warn!(
            input_path = input.display().to_string(),
            warning_count = layout.warnings().len();
            "Focus tree rendered with warnings"
        );
        for warning in layout.warnings() {
            info!(warning:% = warning; "Warning");
        }
    }

    let svg = builder.render_svg(&layout, &assets)?;

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "focus_tree".to_string());
    let output = output_dir.join(format!("{stem}.svg"));
    fs::write(&output, svg)?;
    Ok(output)
}
