use argh::FromArgs;
use frametime_stats::analysis::format_summary;
use frametime_stats::common::plots::PlottersRenderer;
use frametime_stats::config::{PipelineConfig, Preset};
use frametime_stats::{pipeline, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Charts the highest and average frame time of benchmark runs, grouped by scene size
#[derive(FromArgs, Debug)]
pub struct Args {
    /// benchmark CSV files (default: the preset's files in the current directory)
    #[argh(positional)]
    inputs: Vec<PathBuf>,

    /// benchmark scene: cubes or spheres (default: cubes)
    #[argh(option, short = 'p', default = "Preset::Cubes")]
    preset: Preset,

    /// column to group by (default: the preset's column)
    #[argh(option)]
    key_column: Option<String>,

    /// column holding the frame time (default: FrameTime_ms)
    #[argh(option)]
    value_column: Option<String>,

    /// chart title
    #[argh(option)]
    title: Option<String>,

    /// x axis label
    #[argh(option)]
    x_label: Option<String>,

    /// y axis label
    #[argh(option)]
    y_label: Option<String>,

    /// chart file, PNG or SVG by extension (default: <preset>_frametime.png)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// also write per-group statistics as JSON to this file
    #[argh(option)]
    summary: Option<PathBuf>,

    /// bar width in key units (default: 4)
    #[argh(option)]
    bar_width: Option<f64>,

    /// only log warnings and hide the progress bar
    #[argh(switch, short = 'q')]
    quiet: bool,
}

impl Args {
    /// Applies the command line on top of the preset's defaults
    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::for_preset(self.preset);

        if !self.inputs.is_empty() {
            config.inputs = self.inputs;
        }
        if let Some(key) = self.key_column {
            config.columns.key = key;
        }
        if let Some(value) = self.value_column {
            config.columns.value = value;
        }
        if let Some(title) = self.title {
            config.labels.title = title;
        }
        if let Some(x_label) = self.x_label {
            config.labels.x_label = x_label;
        }
        if let Some(y_label) = self.y_label {
            config.labels.y_label = y_label;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(bar_width) = self.bar_width {
            config.bar_width = bar_width;
        }
        config.summary = self.summary;
        config.show_progress = !self.quiet;

        config
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    init_logging(args.quiet);

    let config = args.into_config();
    info!(
        inputs = config.inputs.len(),
        key = %config.columns.key,
        value = %config.columns.value,
        "starting frame time analysis"
    );

    let renderer = PlottersRenderer::new(&config.output);
    let report = pipeline::run(&config, &renderer)?;

    println!("{}", format_summary(&report.aggregates, &config.columns.key));
    info!(path = %config.output.display(), "chart written");

    Ok(())
}
