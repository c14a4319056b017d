use crate::config::{Config, load_config};
use crate::dashboard::Dashboard;
use crate::geometry::{ExportTarget, GridLayoutConfig, compute_layout};
use crate::layout_dump::{CloneReport, LayoutDump, write_json, write_layout_dump};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::tile::TileId;
use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dgrid", version, about = "Dashboard grid layout engine")]
pub struct Args {
    /// Log placement decisions to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print grid geometry, zoom and per-tile styles as JSON
    Layout(LayoutArgs),
    /// Clone a tile into the nearest free space and print the new dashboard
    #[command(name = "clone")]
    CloneTile(CloneArgs),
    /// Render a wireframe preview of the dashboard
    Preview(PreviewArgs),
}

#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// Dashboard JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct TargetArgs {
    /// Export target: screen, a4, a4-landscape or a width in px
    #[arg(short = 't', long = "target")]
    pub target: Option<ExportTarget>,

    /// Width of the live container in px
    #[arg(short = 'w', long = "container-width")]
    pub container_width: Option<f32>,
}

#[derive(ClapArgs, Debug)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Disable per-tile scaling (print/mobile view)
    #[arg(long = "collapse")]
    pub collapse: bool,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct CloneArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Id of the tile to clone
    #[arg(long = "tile")]
    pub tile: String,

    /// Print where the copy was placed instead of the new dashboard
    #[arg(long = "report")]
    pub report: bool,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Layout(cmd) => run_layout(cmd),
        Command::CloneTile(cmd) => run_clone(cmd),
        Command::Preview(cmd) => run_preview(cmd),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_layout(cmd: LayoutArgs) -> Result<()> {
    let (dashboard, mut config) = load_inputs(&cmd.input)?;
    apply_target(&mut config, &cmd.target);
    if cmd.collapse {
        config.render.collapse = true;
    }
    let grid = grid_for(&dashboard, &config);
    let dump = LayoutDump::from_dashboard(
        &dashboard,
        &grid,
        &config.render.self_scaling,
        config.render.collapse,
    )?;
    write_layout_dump(&dump, cmd.output.as_deref())
}

fn run_clone(cmd: CloneArgs) -> Result<()> {
    let (dashboard, _config) = load_inputs(&cmd.input)?;
    let source_id = TileId::new(cmd.tile);
    let outcome = dashboard.clone_tile_with_placement(&source_id)?;

    if cmd.report {
        return write_json(&CloneReport::new(&source_id, &outcome), cmd.output.as_deref());
    }

    write_json(&outcome.dashboard, cmd.output.as_deref())
}

fn run_preview(cmd: PreviewArgs) -> Result<()> {
    let (dashboard, mut config) = load_inputs(&cmd.input)?;
    apply_target(&mut config, &cmd.target);
    let grid = grid_for(&dashboard, &config);
    let svg = render_svg(&dashboard, &grid, &config.theme, &config.render);
    match cmd.output_format {
        OutputFormat::Svg => write_output_svg(&svg, cmd.output.as_deref()),
        OutputFormat::Png => {
            let output = ensure_output(&cmd.output, "png")?;
            write_output_png(&svg, &output, &config.theme)
        }
    }
}

fn load_inputs(input: &InputArgs) -> Result<(Dashboard, Config)> {
    let config = load_config(input.config.as_deref())?;
    let raw = read_input(input.input.as_deref())?;
    let dashboard: Dashboard = serde_json::from_str(&raw).context("invalid dashboard JSON")?;
    tracing::debug!(
        dashboard = dashboard.id(),
        tiles = dashboard.items().len(),
        "loaded dashboard"
    );
    Ok((dashboard, config))
}

fn apply_target(config: &mut Config, target: &TargetArgs) {
    if let Some(target) = target.target {
        config.render.target = target;
    }
    if let Some(width) = target.container_width {
        config.render.container_width = width;
    }
}

fn grid_for(dashboard: &Dashboard, config: &Config) -> GridLayoutConfig {
    let settings = config.grid.for_grid(dashboard.grid());
    compute_layout(
        &settings,
        config.render.container_width,
        config.render.output_width(),
        dashboard.grid().legacy,
    )
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
