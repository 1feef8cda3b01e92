use rayon::ThreadPool;
use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::render_tile::ports::iteration_source::IterationSource;
use crate::core::actions::render_tile::ports::pixel_source::PixelSource;
use crate::core::actions::render_tile::render_tile::{evaluate_tile, render_tile};
use crate::core::data::iteration_result::IterationResult;
use crate::core::data::pixel_rect::PixelRect;

/// Error type for cancelable tile rendering.
///
/// Distinguishes between pixel failures and cancellation, allowing callers
/// to handle each case appropriately (e.g., not displaying cancellation as errors).
#[derive(Debug, PartialEq)]
pub enum GenerateFractalError<E> {
    /// The operation was cancelled before completion.
    Cancelled(Cancelled),
    /// The pixel source or the tile sink reported a failure.
    Algorithm(E),
}

impl<E: std::fmt::Display> std::fmt::Display for GenerateFractalError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateFractalError::Cancelled(c) => write!(f, "{}", c),
            GenerateFractalError::Algorithm(e) => write!(f, "algorithm error: {}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for GenerateFractalError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateFractalError::Cancelled(c) => Some(c),
            GenerateFractalError::Algorithm(e) => Some(e),
        }
    }
}

impl<E> From<Cancelled> for GenerateFractalError<E> {
    fn from(cancelled: Cancelled) -> Self {
        Self::Cancelled(cancelled)
    }
}

/// Runs `work` for every tile on `pool`, handing each result to `on_tile`.
///
/// The token is polled before each tile starts and again before the tile is
/// handed over. Tiles complete in any order; `on_tile` sees the whole result
/// of a tile at once. The first error from `work` or from `on_tile` stops the
/// remaining work.
pub fn run_tiles_parallel_rayon<T, E, C, W, F>(
    pool: &ThreadPool,
    tiles: &[PixelRect],
    cancel: &C,
    work: W,
    on_tile: F,
) -> Result<(), GenerateFractalError<E>>
where
    T: Send,
    E: Send,
    C: CancelToken,
    W: Fn(PixelRect) -> Result<T, E> + Sync,
    F: Fn(PixelRect, T) -> Result<(), GenerateFractalError<E>> + Sync,
{
    pool.install(|| {
        tiles.par_iter().try_for_each(|&tile| {
            if cancel.is_cancelled() {
                return Err(GenerateFractalError::Cancelled(Cancelled));
            }

            let output = work(tile).map_err(GenerateFractalError::Algorithm)?;

            if cancel.is_cancelled() {
                return Err(GenerateFractalError::Cancelled(Cancelled));
            }

            on_tile(tile, output)
        })
    })
}

/// Renders `tiles` of `source` to RGBA on `pool`. See `run_tiles_parallel_rayon`.
pub fn render_tiles_parallel_rayon<Src, C, F>(
    pool: &ThreadPool,
    source: &Src,
    tiles: &[PixelRect],
    cancel: &C,
    on_tile: F,
) -> Result<(), GenerateFractalError<Src::Failure>>
where
    Src: PixelSource + Sync,
    Src::Failure: Send,
    C: CancelToken,
    F: Fn(PixelRect, Vec<u8>) -> Result<(), GenerateFractalError<Src::Failure>> + Sync,
{
    run_tiles_parallel_rayon(pool, tiles, cancel, |tile| render_tile(source, tile), on_tile)
}

/// Evaluates `tiles` of `source` without colouring them. See `run_tiles_parallel_rayon`.
pub fn evaluate_tiles_parallel_rayon<Src, C, F>(
    pool: &ThreadPool,
    source: &Src,
    tiles: &[PixelRect],
    cancel: &C,
    on_tile: F,
) -> Result<(), GenerateFractalError<Src::Failure>>
where
    Src: IterationSource + Sync,
    Src::Failure: Send,
    C: CancelToken,
    F: Fn(PixelRect, Vec<IterationResult>) -> Result<(), GenerateFractalError<Src::Failure>>
        + Sync,
{
    run_tiles_parallel_rayon(pool, tiles, cancel, |tile| evaluate_tile(source, tile), on_tile)
}
