use clap::Parser;
use fractal_studio::{
    CanvasSize, ColourPackStore, ExportController, ExportOptions, FractalEngine, ImageFilePresenter,
    PluginRegistry, PresetStore, Settings,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Render an escape-time fractal preset to an image file.
#[derive(Debug, Parser)]
#[command(name = "fractal_studio", version)]
struct Cli {
    /// Preset to render.
    #[arg(short, long, default_value = "マンデルブロ")]
    preset: String,

    /// Settings file (JSONC). Its `presets` section is merged over the built-in presets.
    #[arg(long, default_value = "settings.jsonc")]
    settings: PathBuf,

    /// Extra preset file, merged after the settings file.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Directory of colour pack JSON files.
    #[arg(long)]
    colour_packs: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Supersampling factor per axis.
    #[arg(long, default_value_t = 1)]
    supersampling: u32,

    /// Output file. The extension picks the format: png, jpg, tiff, bmp or ppm.
    #[arg(short, long, default_value = "output/fractal.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    #[arg(long)]
    workers: Option<usize>,

    #[arg(long)]
    tile_size: Option<u32>,

    /// Abort the render after this many seconds.
    #[arg(long)]
    time_budget: Option<f64>,

    /// Print the available presets and exit.
    #[arg(long)]
    list_presets: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = Settings::load(&cli.settings)?;

    let mut presets = PresetStore::builtin();
    if cli.settings.is_file() {
        presets.merge(PresetStore::load(&cli.settings)?);
    }
    if let Some(path) = &cli.presets {
        presets.merge(PresetStore::load(path)?);
    }

    if cli.list_presets {
        for name in presets.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut config = settings.engine;
    if let Some(workers) = cli.workers {
        config.worker_count = Some(workers);
    }
    if let Some(tile_size) = cli.tile_size {
        config.tile_size = tile_size;
    }

    let colour_packs = match cli.colour_packs.as_ref().or(settings.colour_pack_dir.as_ref()) {
        Some(dir) => ColourPackStore::load_dir(dir)?,
        None => ColourPackStore::new(),
    };

    let engine = FractalEngine::new(config, PluginRegistry::builtin(), Arc::new(colour_packs))?;
    let job = presets.get(&cli.preset, CanvasSize::new(cli.width, cli.height)?)?;
    let options = ExportOptions {
        supersampling: cli.supersampling,
        time_budget: cli.time_budget.map(Duration::try_from_secs_f64).transpose()?,
    };

    println!("Rendering '{}'...", cli.preset);
    println!("Image size: {}x{}", cli.width, cli.height);
    println!("Max iterations: {}", job.viewport.max_iterations);
    println!("Workers: {}", engine.worker_count());

    let presenter = ImageFilePresenter::new()
        .creating_dirs()
        .with_jpeg_quality(cli.jpeg_quality);
    let controller = ExportController::new(Arc::new(engine), presenter);
    let summary = controller.export(&job, options, &cli.output, |progress| {
        log::debug!("{}/{} tiles", progress.completed, progress.total);
    })?;

    println!("Duration:   {:?}", summary.render_duration);
    println!("Wrote {}", summary.path.display());

    Ok(())
}
