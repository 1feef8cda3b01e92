use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::render_tiles::render_tiles_parallel_rayon::{
    GenerateFractalError, evaluate_tiles_parallel_rayon, render_tiles_parallel_rayon,
    run_tiles_parallel_rayon,
};
use crate::core::colour_maps::ports::colormap_source::ColormapSource;
use crate::core::data::canvas_size::CanvasSize;
use crate::core::data::iteration_field::IterationField;
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::render_job::RenderJob;
use crate::core::engine::engine_config::{EngineConfig, EngineConfigError};
use crate::core::engine::prepared_render::PreparedRender;
use crate::core::errors::RenderError;
use crate::core::registry::plugin_registry::PluginRegistry;
use crate::core::util::calculate_tiles_in_pixel_rect::calculate_tiles_in_pixel_rect;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::error::Error;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub enum EngineError {
    Config(EngineConfigError),
    ThreadPool(ThreadPoolBuildError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid engine configuration: {}", err),
            Self::ThreadPool(err) => write!(f, "failed to start worker pool: {}", err),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::ThreadPool(err) => Some(err),
        }
    }
}

impl From<EngineConfigError> for EngineError {
    fn from(err: EngineConfigError) -> Self {
        Self::Config(err)
    }
}

/// Progress of a tiled render: tiles finished so far out of the total.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileProgress {
    pub completed: usize,
    pub total: usize,
}

/// Resolves render jobs against the plugin registry and colormap source and
/// runs them on one worker pool shared by every job.
pub struct FractalEngine {
    config: EngineConfig,
    registry: PluginRegistry,
    colormaps: Arc<dyn ColormapSource>,
    tile_size: NonZeroU32,
    pool: ThreadPool,
}

impl fmt::Debug for FractalEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FractalEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("workers", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

impl FractalEngine {
    pub fn new(
        config: EngineConfig,
        registry: PluginRegistry,
        colormaps: Arc<dyn ColormapSource>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let tile_size = config.tile_size()?;

        let workers = config.resolved_worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("fractal-worker-{}", index))
            .build()
            .map_err(EngineError::ThreadPool)?;

        log::info!(
            "fractal engine started with {} workers, {}px tiles, {:?} colormap sampling",
            workers,
            config.tile_size,
            config.colormap_sampling
        );

        Ok(Self {
            config,
            registry,
            colormaps,
            tile_size,
            pool,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Resolves every plugin and colormap a job names. Fails before any pixel
    /// is computed.
    pub fn prepare(&self, job: &RenderJob) -> Result<PreparedRender, RenderError> {
        let region = job.viewport.region(job.canvas)?;
        let canvas_rect = job.canvas.pixel_rect()?;
        let limits = job.viewport.escape_limits();

        let fractal = self.registry.fractal(&job.fractal.plugin_name)?;
        let divergent = self.registry.divergent(&job.divergent.plugin_name)?;
        let non_divergent = self.registry.non_divergent(&job.non_divergent.plugin_name)?;

        let algorithm = fractal.instantiate(&limits, &job.fractal.plugin_parameters)?;
        let divergent_colouring =
            divergent.instantiate(&limits, &job.divergent.plugin_parameters)?;
        let non_divergent_colouring =
            non_divergent.instantiate(&limits, &job.non_divergent.plugin_parameters)?;

        let divergent_colormap = self
            .colormaps
            .load(&job.divergent.pack_name, &job.divergent.map_name)?;
        let non_divergent_colormap = self
            .colormaps
            .load(&job.non_divergent.pack_name, &job.non_divergent.map_name)?;

        log::debug!(
            "prepared {} render {}x{} at ({}, {}) width {}",
            fractal.name,
            job.canvas.width(),
            job.canvas.height(),
            job.viewport.center.real,
            job.viewport.center.imag,
            job.viewport.width
        );

        Ok(PreparedRender {
            canvas: job.canvas,
            canvas_rect,
            region,
            algorithm,
            divergent: divergent_colouring,
            divergent_colormap,
            non_divergent: non_divergent_colouring,
            non_divergent_colormap,
            sampling: self.config.colormap_sampling,
        })
    }

    /// The tile partition used for `canvas`, in row-major order.
    pub fn tiles(&self, canvas: CanvasSize) -> Result<Vec<PixelRect>, RenderError> {
        Ok(calculate_tiles_in_pixel_rect(
            self.tile_size,
            canvas.pixel_rect()?,
        ))
    }

    pub fn render(&self, job: &RenderJob) -> Result<PixelBuffer, RenderError> {
        self.render_cancelable(job, &NeverCancel)
            .map_err(never_cancelled)
    }

    pub fn render_cancelable<C: CancelToken>(
        &self,
        job: &RenderJob,
        cancel: &C,
    ) -> Result<PixelBuffer, GenerateFractalError<RenderError>> {
        self.render_with_progress(job, cancel, |_| {})
    }

    /// Renders `job` into one raster, reporting each finished tile.
    pub fn render_with_progress<C, P>(
        &self,
        job: &RenderJob,
        cancel: &C,
        progress: P,
    ) -> Result<PixelBuffer, GenerateFractalError<RenderError>>
    where
        C: CancelToken,
        P: Fn(TileProgress) + Sync,
    {
        let prepared = self.prepare(job).map_err(GenerateFractalError::Algorithm)?;
        let tiles = self.tiles(job.canvas).map_err(GenerateFractalError::Algorithm)?;
        let buffer = Mutex::new(PixelBuffer::new(prepared.canvas_rect()));
        let completed = AtomicUsize::new(0);
        let total = tiles.len();

        self.render_tiles(&prepared, &tiles, cancel, |tile, pixels| {
            buffer
                .lock()
                .expect("raster mutex poisoned")
                .write_tile(tile, &pixels)
                .map_err(|err| GenerateFractalError::Algorithm(RenderError::from(err)))?;

            let completed = completed.fetch_add(1, Ordering::Relaxed) + 1;
            progress(TileProgress { completed, total });

            Ok(())
        })?;

        Ok(buffer.into_inner().expect("raster mutex poisoned"))
    }

    /// Renders `job` and keeps the per-pixel iteration results, so a later
    /// colour-only change can go through `recolour`.
    pub fn render_with_iterations(
        &self,
        job: &RenderJob,
    ) -> Result<(PixelBuffer, IterationField), RenderError> {
        let prepared = self.prepare(job)?;
        let tiles = self.tiles(job.canvas)?;
        let buffer = Mutex::new(PixelBuffer::new(prepared.canvas_rect()));
        let field = Mutex::new(IterationField::new(prepared.canvas_rect()));

        self.evaluate_tiles(&prepared, &tiles, &NeverCancel, |tile, results| {
            let pixels = prepared.colour_results(&results);

            field
                .lock()
                .expect("iteration field mutex poisoned")
                .write_tile(tile, &results)
                .map_err(|err| GenerateFractalError::Algorithm(RenderError::from(err)))?;
            buffer
                .lock()
                .expect("raster mutex poisoned")
                .write_tile(tile, &pixels)
                .map_err(|err| GenerateFractalError::Algorithm(RenderError::from(err)))
        })
        .map_err(never_cancelled)?;

        Ok((
            buffer.into_inner().expect("raster mutex poisoned"),
            field.into_inner().expect("iteration field mutex poisoned"),
        ))
    }

    /// Colours `job` from the iteration results of an earlier render with the
    /// same viewport, fractal and canvas. The fractal is never evaluated.
    pub fn recolour(
        &self,
        job: &RenderJob,
        field: &IterationField,
    ) -> Result<PixelBuffer, RenderError> {
        let prepared = self.prepare(job)?;
        let tiles = self.tiles(job.canvas)?;
        let buffer = Mutex::new(PixelBuffer::new(prepared.canvas_rect()));

        self.recolour_tiles(&prepared, field, &tiles, &NeverCancel, |tile, pixels| {
            buffer
                .lock()
                .expect("raster mutex poisoned")
                .write_tile(tile, &pixels)
                .map_err(|err| GenerateFractalError::Algorithm(RenderError::from(err)))
        })
        .map_err(never_cancelled)?;

        Ok(buffer.into_inner().expect("raster mutex poisoned"))
    }

    fn check_tiles(
        prepared: &PreparedRender,
        tiles: &[PixelRect],
    ) -> Result<(), GenerateFractalError<RenderError>> {
        let canvas = prepared.canvas_rect();
        match tiles.iter().find(|tile| !canvas.contains_rect(**tile)) {
            Some(&tile) => Err(GenerateFractalError::Algorithm(RenderError::InvalidTile {
                tile,
                canvas,
            })),
            None => Ok(()),
        }
    }

    /// Renders `tiles` of a prepared job on the shared pool. Tiles must lie on
    /// the job's canvas.
    pub fn render_tiles<C, F>(
        &self,
        prepared: &PreparedRender,
        tiles: &[PixelRect],
        cancel: &C,
        on_tile: F,
    ) -> Result<(), GenerateFractalError<RenderError>>
    where
        C: CancelToken,
        F: Fn(PixelRect, Vec<u8>) -> Result<(), GenerateFractalError<RenderError>> + Sync,
    {
        Self::check_tiles(prepared, tiles)?;

        render_tiles_parallel_rayon(&self.pool, prepared, tiles, cancel, on_tile)
    }

    /// Like `render_tiles` but hands over raw iteration results.
    pub fn evaluate_tiles<C, F>(
        &self,
        prepared: &PreparedRender,
        tiles: &[PixelRect],
        cancel: &C,
        on_tile: F,
    ) -> Result<(), GenerateFractalError<RenderError>>
    where
        C: CancelToken,
        F: Fn(PixelRect, Vec<IterationResult>) -> Result<(), GenerateFractalError<RenderError>>
            + Sync,
    {
        Self::check_tiles(prepared, tiles)?;

        evaluate_tiles_parallel_rayon(&self.pool, prepared, tiles, cancel, on_tile)
    }

    /// Like `render_tiles` but colours from `field` instead of evaluating.
    pub fn recolour_tiles<C, F>(
        &self,
        prepared: &PreparedRender,
        field: &IterationField,
        tiles: &[PixelRect],
        cancel: &C,
        on_tile: F,
    ) -> Result<(), GenerateFractalError<RenderError>>
    where
        C: CancelToken,
        F: Fn(PixelRect, Vec<u8>) -> Result<(), GenerateFractalError<RenderError>> + Sync,
    {
        Self::check_tiles(prepared, tiles)?;

        run_tiles_parallel_rayon(
            &self.pool,
            tiles,
            cancel,
            |tile| prepared.recolour_tile(field, tile),
            on_tile,
        )
    }
}

fn never_cancelled(err: GenerateFractalError<RenderError>) -> RenderError {
    match err {
        GenerateFractalError::Algorithm(err) => err,
        GenerateFractalError::Cancelled(_) => {
            unreachable!("NeverCancel token should never signal cancellation")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour_maps::builtin::BuiltinColormaps;
    use crate::core::colour_maps::colormap::ColormapSampling;
    use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
    use crate::core::data::complex::Complex;
    use crate::core::data::escape_limits::EscapeLimits;
    use crate::core::data::iteration_field::IterationFieldError;
    use crate::core::data::plugin_params::ResolvedParameters;
    use crate::core::fractals::mandelbrot::MandelbrotAlgorithm;
    use crate::core::registry::plugin_descriptor::FractalPlugin;
    use crate::core::data::iteration_result::IterationResult;
    use crate::core::data::point::Point;
    use crate::core::data::render_job::{ColouringDescriptor, FractalDescriptor};
    use crate::core::data::viewport::Viewport;
    use crate::core::registry::plugin_kind::PluginKind;

    fn engine(workers: usize, tile_size: u32) -> FractalEngine {
        let config = EngineConfig {
            worker_count: Some(workers),
            tile_size,
            ..EngineConfig::default()
        };

        FractalEngine::new(config, PluginRegistry::builtin(), Arc::new(BuiltinColormaps)).unwrap()
    }

    fn mandelbrot_job(viewport: Viewport, width: u32, height: u32) -> RenderJob {
        RenderJob {
            viewport,
            fractal: FractalDescriptor::new("mandelbrot"),
            divergent: ColouringDescriptor::new("smooth", "builtin", "fire"),
            non_divergent: ColouringDescriptor::new("complex_potential", "builtin", "blue_white"),
            canvas: CanvasSize::new(width, height).unwrap(),
        }
    }

    fn square_view(real: f64, imag: f64, size: f64) -> Viewport {
        Viewport {
            center: Complex::new(real, imag),
            width: size,
            height: Some(size),
            ..Viewport::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            tile_size: 0,
            ..EngineConfig::default()
        };

        let result = FractalEngine::new(config, PluginRegistry::builtin(), Arc::new(BuiltinColormaps));

        assert!(matches!(
            result,
            Err(EngineError::Config(EngineConfigError::ZeroTileSize))
        ));
    }

    #[test]
    fn test_worker_count_matches_config() {
        assert_eq!(engine(3, 16).worker_count(), 3);
    }

    #[test]
    fn test_render_is_repeatable() {
        let engine = engine(4, 16);
        let job = mandelbrot_job(Viewport::default(), 96, 72);

        let first = engine.render(&job).unwrap();
        let second = engine.render(&job).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_output_does_not_depend_on_pool_size_or_tiling() {
        let job = mandelbrot_job(Viewport::default(), 101, 67);

        let single = engine(1, 7).render(&job).unwrap();
        let parallel = engine(4, 32).render(&job).unwrap();

        assert_eq!(single, parallel);
    }

    #[test]
    fn test_sub_rectangle_matches_full_render() {
        let engine = engine(2, 16);
        let full = engine
            .render(&mandelbrot_job(square_view(-0.5, 0.0, 4.0), 64, 64))
            .unwrap();
        let sub = engine
            .render(&mandelbrot_job(square_view(-0.5, 0.5, 2.0), 32, 32))
            .unwrap();

        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(
                    sub.pixel(Point { x, y }).unwrap(),
                    full.pixel(Point { x: x + 16, y: y + 8 }).unwrap(),
                    "pixel ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_default_mandelbrot_view_classifies_known_points() {
        let engine = engine(2, 64);
        let job = mandelbrot_job(Viewport::default(), 800, 600);
        let prepared = engine.prepare(&job).unwrap();

        let near_origin = prepared.evaluate_pixel(Point { x: 533, y: 300 }).unwrap();
        let far_out = prepared.evaluate_point(Complex::new(2.0, 2.0));

        assert!(matches!(near_origin, IterationResult::Bounded(_)));
        match far_out {
            IterationResult::Escaped(escaped) => assert!(escaped.iteration_count <= 2),
            other => panic!("expected escape, got {:?}", other),
        }
    }

    #[test]
    fn test_julia_job_uses_its_constant() {
        let engine = engine(2, 64);
        let job = RenderJob {
            fractal: FractalDescriptor::new("julia")
                .with_parameter("c_real", -0.745)
                .with_parameter("c_imag", 0.113),
            ..mandelbrot_job(square_view(0.0, 0.0, 3.0), 40, 40)
        };
        let prepared = engine.prepare(&job).unwrap();

        let at_constant = prepared.evaluate_point(Complex::new(-0.745, 0.113));
        let far_out = prepared.evaluate_point(Complex::new(3.0, 3.0));

        assert!(matches!(at_constant, IterationResult::Bounded(_)));
        assert!(far_out.escaped());
        assert_eq!(engine.render(&job).unwrap().width(), 40);
    }

    #[test]
    fn test_unknown_plugin_fails_before_any_tile() {
        let engine = engine(2, 16);
        let job = RenderJob {
            fractal: FractalDescriptor::new("sierpinski"),
            ..mandelbrot_job(Viewport::default(), 32, 32)
        };

        let result = engine.render_with_progress(&job, &NeverCancel, |_| {
            panic!("no tile may be rendered for an unresolved job")
        });

        assert_eq!(
            result,
            Err(GenerateFractalError::Algorithm(RenderError::UnknownPlugin {
                kind: PluginKind::Fractal,
                name: "sierpinski".to_string(),
            }))
        );
    }

    #[test]
    fn test_missing_required_parameter_is_rejected() {
        let engine = engine(1, 16);
        let job = RenderJob {
            fractal: FractalDescriptor::new("julia").with_parameter("c_real", 0.285),
            ..mandelbrot_job(Viewport::default(), 8, 8)
        };

        assert!(matches!(
            engine.render(&job),
            Err(RenderError::InvalidPluginParameters { .. })
        ));
    }

    #[test]
    fn test_missing_colormap_is_reported() {
        let engine = engine(1, 16);
        let job = RenderJob {
            non_divergent: ColouringDescriptor::new("solid", "builtin", "aurora"),
            ..mandelbrot_job(Viewport::default(), 8, 8)
        };

        assert_eq!(
            engine.render(&job),
            Err(RenderError::ColormapNotFound {
                pack: "builtin".to_string(),
                map: "aurora".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_viewport_is_reported() {
        let engine = engine(1, 16);
        let job = mandelbrot_job(
            Viewport {
                max_iterations: 0,
                ..Viewport::default()
            },
            8,
            8,
        );

        assert!(matches!(
            engine.render(&job),
            Err(RenderError::InvalidViewport(_))
        ));
    }

    #[test]
    fn test_cancelled_render_returns_cancelled() {
        let engine = engine(2, 8);
        let job = mandelbrot_job(Viewport::default(), 64, 64);

        let result = engine.render_cancelable(&job, &|| true);

        assert!(matches!(result, Err(GenerateFractalError::Cancelled(_))));
    }

    #[test]
    fn test_progress_reaches_total() {
        let engine = engine(3, 16);
        let job = mandelbrot_job(Viewport::default(), 50, 40);
        let expected_tiles = engine.tiles(job.canvas).unwrap().len();
        let seen = Mutex::new(Vec::new());

        engine
            .render_with_progress(&job, &NeverCancel, |progress| {
                seen.lock().unwrap().push(progress);
            })
            .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort_by_key(|progress| progress.completed);
        assert_eq!(seen.len(), expected_tiles);
        assert_eq!(
            seen.last(),
            Some(&TileProgress {
                completed: expected_tiles,
                total: expected_tiles,
            })
        );
    }

    #[test]
    fn test_render_tiles_rejects_tile_outside_canvas() {
        let engine = engine(1, 16);
        let prepared = engine
            .prepare(&mandelbrot_job(Viewport::default(), 16, 16))
            .unwrap();
        let outside = PixelRect::new(Point { x: 8, y: 8 }, Point { x: 20, y: 20 }).unwrap();

        let result = engine.render_tiles(&prepared, &[outside], &NeverCancel, |_, _| Ok(()));

        assert_eq!(
            result,
            Err(GenerateFractalError::Algorithm(RenderError::InvalidTile {
                tile: outside,
                canvas: prepared.canvas_rect(),
            }))
        );
    }

    #[test]
    fn test_table_sampling_renders_full_canvas() {
        let config = EngineConfig {
            worker_count: Some(2),
            colormap_sampling: ColormapSampling::Table,
            ..EngineConfig::default()
        };
        let engine =
            FractalEngine::new(config, PluginRegistry::builtin(), Arc::new(BuiltinColormaps))
                .unwrap();

        let buffer = engine
            .render(&mandelbrot_job(Viewport::default(), 30, 20))
            .unwrap();

        assert_eq!(buffer.buffer_size(), 30 * 20 * 4);
    }

    static COUNTED_EVALUATIONS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    struct CountingMandelbrot(MandelbrotAlgorithm);

    impl FractalAlgorithm for CountingMandelbrot {
        fn evaluate(&self, point: Complex) -> IterationResult {
            COUNTED_EVALUATIONS.fetch_add(1, Ordering::SeqCst);
            self.0.evaluate(point)
        }
    }

    fn build_counting(
        limits: &EscapeLimits,
        _: &ResolvedParameters,
    ) -> Result<Box<dyn FractalAlgorithm>, RenderError> {
        Ok(Box::new(CountingMandelbrot(MandelbrotAlgorithm::new(*limits))))
    }

    fn counting_engine() -> FractalEngine {
        let mut registry = PluginRegistry::builtin();
        registry
            .register_fractal(FractalPlugin {
                name: "counting_mandelbrot",
                aliases: &[],
                parameters: &[],
                build: build_counting,
            })
            .unwrap();

        let config = EngineConfig {
            worker_count: Some(3),
            tile_size: 8,
            ..EngineConfig::default()
        };

        FractalEngine::new(config, registry, Arc::new(BuiltinColormaps)).unwrap()
    }

    #[test]
    fn test_recolour_matches_full_render_without_evaluating() {
        let engine = counting_engine();
        let job = RenderJob {
            fractal: FractalDescriptor::new("counting_mandelbrot"),
            ..mandelbrot_job(Viewport::default(), 40, 30)
        };

        let (first, field) = engine.render_with_iterations(&job).unwrap();
        assert_eq!(first, engine.render(&job).unwrap());

        let recoloured_job = RenderJob {
            divergent: ColouringDescriptor::new("iteration_based", "builtin", "grayscale"),
            non_divergent: ColouringDescriptor::new("solid", "builtin", "fire"),
            ..job.clone()
        };

        let before = COUNTED_EVALUATIONS.load(Ordering::SeqCst);
        let recoloured = engine.recolour(&recoloured_job, &field).unwrap();
        assert_eq!(COUNTED_EVALUATIONS.load(Ordering::SeqCst), before);

        assert_ne!(recoloured, first);
        assert_eq!(recoloured, engine.render(&recoloured_job).unwrap());
    }

    #[test]
    fn test_recolour_rejects_field_of_another_canvas() {
        let engine = engine(2, 16);
        let (_, field) = engine
            .render_with_iterations(&mandelbrot_job(Viewport::default(), 20, 10))
            .unwrap();

        let result = engine.recolour(&mandelbrot_job(Viewport::default(), 30, 10), &field);

        assert!(matches!(
            result,
            Err(RenderError::IterationField(IterationFieldError::RectMismatch { .. }))
        ));
    }

    #[test]
    fn test_recolour_still_validates_colouring() {
        let engine = engine(2, 16);
        let job = mandelbrot_job(Viewport::default(), 20, 10);
        let (_, field) = engine.render_with_iterations(&job).unwrap();

        let broken = RenderJob {
            divergent: ColouringDescriptor::new("smooth", "builtin", "no_such_map"),
            ..job
        };

        assert!(matches!(
            engine.recolour(&broken, &field),
            Err(RenderError::ColormapNotFound { .. })
        ));
    }
}
