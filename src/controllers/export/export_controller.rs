use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::cancellation::{CancelToken, Deadline};
use crate::core::actions::render_tiles::render_tiles_parallel_rayon::GenerateFractalError;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::render_job::RenderJob;
use crate::core::engine::fractal_engine::{FractalEngine, TileProgress};
use crate::core::errors::RenderError;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum ExportError {
    InvalidSupersampling(u32),
    Render(RenderError),
    TimedOut(Duration),
    Raster(PixelBufferError),
    Io(io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSupersampling(factor) => {
                write!(f, "supersampling factor must be at least 1: {}", factor)
            }
            Self::Render(err) => write!(f, "render failed: {}", err),
            Self::TimedOut(budget) => write!(f, "render exceeded its {:?} budget", budget),
            Self::Raster(err) => write!(f, "raster error: {}", err),
            Self::Io(err) => write!(f, "failed to write image: {}", err),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::Raster(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for ExportError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Each output pixel averages `supersampling`² rendered samples.
    pub supersampling: u32,
    pub time_budget: Option<Duration>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            supersampling: 1,
            time_budget: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub render_duration: Duration,
}

/// Renders a job in one batch and hands the raster to a file presenter.
pub struct ExportController<P: FilePresenterPort> {
    engine: Arc<FractalEngine>,
    presenter: P,
}

impl<P: FilePresenterPort> ExportController<P> {
    pub fn new(engine: Arc<FractalEngine>, presenter: P) -> Self {
        Self { engine, presenter }
    }

    /// Renders `job` at its canvas size, supersampled when requested.
    pub fn render<F>(
        &self,
        job: &RenderJob,
        options: ExportOptions,
        progress: F,
    ) -> Result<PixelBuffer, ExportError>
    where
        F: Fn(TileProgress) + Sync,
    {
        let factor = options.supersampling;
        if factor == 0 {
            return Err(ExportError::InvalidSupersampling(factor));
        }

        let sampled_job = RenderJob {
            canvas: job
                .canvas
                .scaled(factor)
                .map_err(RenderError::InvalidCanvas)?,
            ..job.clone()
        };

        let deadline = options.time_budget.map(Deadline::after);
        let cancel = || deadline.is_some_and(|deadline| deadline.is_cancelled());

        log::info!(
            "exporting {}x{} ({}x supersampling)",
            job.canvas.width(),
            job.canvas.height(),
            factor
        );

        let sampled = self
            .engine
            .render_with_progress(&sampled_job, &cancel, progress)
            .map_err(|err| match err {
                GenerateFractalError::Cancelled(_) => {
                    ExportError::TimedOut(options.time_budget.unwrap_or_default())
                }
                GenerateFractalError::Algorithm(err) => ExportError::Render(err),
            })?;

        if factor == 1 {
            return Ok(sampled);
        }

        sampled.downsample(factor).map_err(ExportError::Raster)
    }

    pub fn export<F>(
        &self,
        job: &RenderJob,
        options: ExportOptions,
        path: impl AsRef<Path>,
        progress: F,
    ) -> Result<ExportSummary, ExportError>
    where
        F: Fn(TileProgress) + Sync,
    {
        let path = path.as_ref();
        let start = Instant::now();
        let buffer = self.render(job, options, progress)?;
        let render_duration = start.elapsed();

        self.presenter.present(&buffer, path)?;

        log::info!("wrote {} in {:?}", path.display(), render_duration);

        Ok(ExportSummary {
            path: path.to_path_buf(),
            width: buffer.width(),
            height: buffer.height(),
            render_duration,
        })
    }
}
