use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::job_state::JobState;
use crate::controllers::interactive::data::tile_data::TileData;
use crate::controllers::interactive::errors::render_failure::RenderFailure;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::InteractivePresenterPort;
use crate::core::actions::cancellation::Cancelled;
use crate::core::actions::render_tiles::render_tiles_parallel_rayon::GenerateFractalError;
use crate::core::data::iteration_field::IterationField;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::render_job::RenderJob;
use crate::core::engine::fractal_engine::FractalEngine;
use crate::core::errors::RenderError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

const RETAINED_STATES: usize = 64;

#[derive(Debug)]
struct CurrentJob {
    generation: u64,
    fingerprint: u64,
    job: Arc<RenderJob>,
}

/// Iteration results of the last completed job, reused when only the
/// colouring changes.
#[derive(Debug, Clone)]
struct CachedIterations {
    job: Arc<RenderJob>,
    field: Arc<IterationField>,
}

#[derive(Debug, Default)]
struct JobLedger {
    states: VecDeque<(u64, JobState)>,
    current: Option<CurrentJob>,
    last_frame: Option<FrameData>,
    iterations: Option<CachedIterations>,
}

impl JobLedger {
    /// The generation already covering `job`, if it is running or completed.
    fn covering_generation(&self, job: &RenderJob, fingerprint: u64) -> Option<u64> {
        let current = self.current.as_ref()?;
        let reusable = matches!(
            self.state(current.generation),
            Some(JobState::Running | JobState::Completed)
        );

        (reusable && current.fingerprint == fingerprint && *current.job == *job)
            .then_some(current.generation)
    }

    fn reusable_iterations(&self, job: &RenderJob) -> Option<Arc<IterationField>> {
        self.iterations
            .as_ref()
            .filter(|cached| cached.job.shares_iterations_with(job))
            .map(|cached| Arc::clone(&cached.field))
    }

    fn state(&self, generation: u64) -> Option<JobState> {
        self.states
            .iter()
            .find(|(candidate, _)| *candidate == generation)
            .map(|(_, state)| *state)
    }

    fn set_state(&mut self, generation: u64, state: JobState) {
        if let Some(entry) = self
            .states
            .iter_mut()
            .find(|(candidate, _)| *candidate == generation)
        {
            entry.1 = state;
            return;
        }

        self.states.push_back((generation, state));
        while self.states.len() > RETAINED_STATES {
            self.states.pop_front();
        }
    }

    fn cancel_if_running(&mut self, generation: u64) {
        if self.state(generation) == Some(JobState::Running) {
            self.set_state(generation, JobState::Cancelled);
        }
    }
}

struct SharedState {
    engine: Arc<FractalEngine>,
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, Arc<RenderJob>)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    publish_gate: Mutex<()>,
    ledger: Mutex<JobLedger>,
    presenter_port: Arc<dyn InteractivePresenterPort>,
}

impl SharedState {
    fn is_current(&self, generation: u64) -> bool {
        !self.shutdown.load(Ordering::Acquire)
            && self.generation.load(Ordering::Acquire) == generation
    }
}

/// Keeps at most one render running and publishes its tiles as they finish.
///
/// A new submission supersedes the running job. The superseded job stops at
/// its next tile boundary and never publishes again once `submit` returns.
pub struct RenderCoordinator {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl RenderCoordinator {
    pub fn new(
        engine: Arc<FractalEngine>,
        presenter_port: Arc<dyn InteractivePresenterPort>,
    ) -> Self {
        let shared = Arc::new(SharedState {
            engine,
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            publish_gate: Mutex::new(()),
            ledger: Mutex::new(JobLedger::default()),
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Queues `job` and returns its generation. Resubmitting the job that is
    /// running or was last completed returns the existing generation.
    pub fn submit(&self, job: RenderJob) -> u64 {
        let fingerprint = job.fingerprint();

        let _gate = self.shared.publish_gate.lock().expect("publish gate poisoned");
        let mut ledger = self.shared.ledger.lock().expect("job ledger poisoned");

        if let Some(current) = ledger.covering_generation(&job, fingerprint) {
            log::debug!("render {} already covers this job", current);
            return current;
        }

        if let Some(current) = ledger.current.as_ref().map(|current| current.generation) {
            ledger.cancel_if_running(current);
        }

        let job = Arc::new(job);
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        ledger.set_state(generation, JobState::Running);
        ledger.current = Some(CurrentJob {
            generation,
            fingerprint,
            job: Arc::clone(&job),
        });

        // written under the gate so a racing submit cannot replace a newer request
        *self
            .shared
            .latest_request
            .lock()
            .expect("request slot poisoned") = Some((generation, job));
        self.shared.wake.notify_one();

        log::debug!("submitted render {}", generation);

        generation
    }

    #[must_use]
    pub fn state(&self, generation: u64) -> Option<JobState> {
        self.shared
            .ledger
            .lock()
            .expect("job ledger poisoned")
            .state(generation)
    }

    /// The last fully assembled raster. Kept until a newer job completes.
    #[must_use]
    pub fn last_completed_frame(&self) -> Option<FrameData> {
        self.shared
            .ledger
            .lock()
            .expect("job ledger poisoned")
            .last_frame
            .clone()
    }

    /// Generation of the last job that completed or failed.
    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    pub fn shutdown(&mut self) {
        {
            let _gate = self.shared.publish_gate.lock().expect("publish gate poisoned");
            self.shared.shutdown.store(true, Ordering::Release);

            let mut ledger = self.shared.ledger.lock().expect("job ledger poisoned");
            if let Some(current) = ledger.current.as_ref().map(|current| current.generation) {
                ledger.cancel_if_running(current);
            }
        }

        drop(self.shared.latest_request.lock().expect("request slot poisoned"));
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let (job_generation, job) = {
                let mut guard = shared.latest_request.lock().expect("request slot poisoned");
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(request) = guard.take() {
                        break request;
                    }

                    guard = shared.wake.wait(guard).expect("request slot poisoned");
                }
            };

            if !shared.is_current(job_generation) {
                continue;
            }

            let start = Instant::now();
            match Self::render_job(shared, job_generation, &job) {
                Ok((pixel_buffer, field)) => {
                    let iterations = CachedIterations { job, field };
                    Self::publish_completed(shared, job_generation, pixel_buffer, iterations, start);
                }
                Err(GenerateFractalError::Cancelled(_)) => {
                    log::debug!("render {} cancelled", job_generation);
                }
                Err(GenerateFractalError::Algorithm(error)) => {
                    Self::publish_failed(shared, job_generation, error);
                }
            }
        }
    }

    fn render_job(
        shared: &SharedState,
        job_generation: u64,
        job: &RenderJob,
    ) -> Result<(PixelBuffer, Arc<IterationField>), GenerateFractalError<RenderError>> {
        let engine = &shared.engine;
        let cancel_token = || !shared.is_current(job_generation);

        let prepared = engine.prepare(job).map_err(GenerateFractalError::Algorithm)?;
        let tiles = engine.tiles(job.canvas).map_err(GenerateFractalError::Algorithm)?;
        let total = tiles.len();
        let buffer = Mutex::new(PixelBuffer::new(prepared.canvas_rect()));
        let completed = Mutex::new(0_usize);

        let publish_tile =
            |tile: PixelRect, pixels: Vec<u8>| -> Result<(), GenerateFractalError<RenderError>> {
                buffer
                    .lock()
                    .expect("raster mutex poisoned")
                    .write_tile(tile, &pixels)
                    .map_err(|err| GenerateFractalError::Algorithm(RenderError::from(err)))?;

                let _gate = shared.publish_gate.lock().expect("publish gate poisoned");
                if !shared.is_current(job_generation) {
                    return Err(GenerateFractalError::Cancelled(Cancelled));
                }

                let mut completed = completed.lock().expect("progress mutex poisoned");
                *completed += 1;

                shared.presenter_port.present(RenderEvent::Tile(TileData {
                    generation: job_generation,
                    tile,
                    pixels,
                    completed: *completed,
                    total,
                }));

                Ok(())
            };

        let cached = shared
            .ledger
            .lock()
            .expect("job ledger poisoned")
            .reusable_iterations(job);

        let field = match cached {
            Some(field) => {
                log::debug!("render {} recolours the previous iterations", job_generation);
                engine.recolour_tiles(&prepared, &field, &tiles, &cancel_token, &publish_tile)?;
                field
            }
            None => {
                let field = Mutex::new(IterationField::new(prepared.canvas_rect()));
                engine.evaluate_tiles(&prepared, &tiles, &cancel_token, |tile, results| {
                    let pixels = prepared.colour_results(&results);
                    field
                        .lock()
                        .expect("iteration field mutex poisoned")
                        .write_tile(tile, &results)
                        .map_err(|err| GenerateFractalError::Algorithm(RenderError::from(err)))?;

                    publish_tile(tile, pixels)
                })?;
                Arc::new(field.into_inner().expect("iteration field mutex poisoned"))
            }
        };

        Ok((buffer.into_inner().expect("raster mutex poisoned"), field))
    }

    fn publish_completed(
        shared: &SharedState,
        job_generation: u64,
        pixel_buffer: PixelBuffer,
        iterations: CachedIterations,
        start: Instant,
    ) {
        let _gate = shared.publish_gate.lock().expect("publish gate poisoned");
        if !shared.is_current(job_generation) {
            return;
        }

        let frame = FrameData {
            generation: job_generation,
            pixel_buffer: Arc::new(pixel_buffer),
            render_duration: start.elapsed(),
        };

        {
            let mut ledger = shared.ledger.lock().expect("job ledger poisoned");
            ledger.set_state(job_generation, JobState::Completed);
            ledger.last_frame = Some(frame.clone());
            ledger.iterations = Some(iterations);
        }

        shared
            .last_completed_generation
            .store(job_generation, Ordering::Release);

        log::debug!(
            "render {} completed in {:?}",
            job_generation,
            frame.render_duration
        );

        shared.presenter_port.present(RenderEvent::Completed(frame));
    }

    fn publish_failed(shared: &SharedState, job_generation: u64, error: RenderError) {
        let _gate = shared.publish_gate.lock().expect("publish gate poisoned");
        if !shared.is_current(job_generation) {
            return;
        }

        shared
            .ledger
            .lock()
            .expect("job ledger poisoned")
            .set_state(job_generation, JobState::Failed);

        shared
            .last_completed_generation
            .store(job_generation, Ordering::Release);

        log::warn!("render {} failed: {}", job_generation, error);

        shared.presenter_port.present(RenderEvent::Failed(RenderFailure {
            generation: job_generation,
            error,
        }));
    }
}

impl Drop for RenderCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
