//! Background texture synthesis with a configurable thread pool.
//!
//! Offloads raster synthesis to worker threads so texture regeneration
//! (planet type or seed changes) never blocks the caller's frame loop.
//! Completed rasters are delivered through bounded channels and collected
//! with [`AsyncSurfaceGenerator::drain_results`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;
use ecosse_noise::NoiseError;
use tracing::warn;

use crate::classification::TerrainClass;
use crate::error::SurfaceError;
use crate::raster::SurfaceRaster;
use crate::synthesizer::{SurfaceSynthesizer, SynthesisParams};

/// Which texture a task produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Packed RGB color texture.
    Color,
    /// Single-channel bump (height) texture.
    Bump,
}

impl TextureKind {
    /// The lowercase name used in log output and file names.
    pub fn name(self) -> &'static str {
        match self {
            TextureKind::Color => "color",
            TextureKind::Bump => "bump",
        }
    }
}

/// Identifies one texture slot: a classification plus color or bump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureKey {
    /// Terrain classification the texture belongs to.
    pub class: TerrainClass,
    /// Color or bump.
    pub kind: TextureKind,
}

/// A request to synthesize a single texture.
#[derive(Clone, Debug)]
pub struct SynthesisTask {
    /// The texture slot this task fills.
    pub key: TextureKey,
    /// Noise seed, threaded explicitly for reproducible output.
    pub seed: f64,
    /// Raster width in texels.
    pub width: u32,
    /// Raster height in texels.
    pub height: u32,
}

/// A completed texture ready for upload by the caller.
#[derive(Debug)]
pub struct CompletedTexture {
    /// The texture slot matching the original task.
    pub key: TextureKey,
    /// The synthesized raster.
    pub raster: SurfaceRaster,
    /// Synthesis time in microseconds (for profiling).
    pub synthesis_time_us: u64,
}

/// Errors from submitting a synthesis task.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The task failed validation before queueing.
    #[error(transparent)]
    Invalid(#[from] SurfaceError),

    /// The task queue is full; the rejected task is handed back.
    #[error("synthesis queue is full")]
    QueueFull(SynthesisTask),
}

/// Internal wrapper that carries the task and its cancellation flag.
struct QueuedTask {
    task: SynthesisTask,
    cancelled: Arc<AtomicBool>,
}

/// Manages background texture synthesis across a thread pool.
pub struct AsyncSurfaceGenerator {
    /// Sender for submitting synthesis tasks.
    task_sender: Sender<QueuedTask>,
    /// Receiver for collecting completed textures on the caller's thread.
    result_receiver: Receiver<CompletedTexture>,
    /// Shared cancellation flag per task, keyed by texture slot.
    active_tasks: Arc<DashMap<TextureKey, Arc<AtomicBool>>>,
    /// Current number of in-flight tasks.
    in_flight: Arc<AtomicU64>,
}

impl AsyncSurfaceGenerator {
    /// Create a generator with the specified thread count and queue capacities.
    ///
    /// # Arguments
    /// - `params`: pass parameters applied to every task.
    /// - `thread_count`: number of worker threads. Typically `num_cpus - 2`
    ///   to leave headroom for the main thread and render thread.
    /// - `max_concurrent`: maximum in-flight tasks. Excess submissions are
    ///   rejected.
    /// - `result_capacity`: bounded channel capacity for completed textures.
    pub fn new(
        params: SynthesisParams,
        thread_count: usize,
        max_concurrent: usize,
        result_capacity: usize,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<QueuedTask>(max_concurrent * 2);
        let (result_sender, result_receiver) = bounded::<CompletedTexture>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let params = params.clone();

            std::thread::Builder::new()
                .name("surface-synth-worker".into())
                .spawn(move || {
                    while let Ok(queued) = receiver.recv() {
                        // Check cancellation before starting work.
                        if queued.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = std::time::Instant::now();
                        let result = synthesize_task(&queued.task, params.clone());
                        let elapsed = start.elapsed().as_micros() as u64;

                        match result {
                            // Check cancellation again after synthesis.
                            Ok(raster) if !queued.cancelled.load(Ordering::Relaxed) => {
                                let _ = sender.send(CompletedTexture {
                                    key: queued.task.key,
                                    raster,
                                    synthesis_time_us: elapsed,
                                });
                            }
                            Ok(_) => {}
                            // Tasks are validated at submission; a failure
                            // here means the validation drifted.
                            Err(err) => warn!(%err, key = ?queued.task.key, "synthesis task failed"),
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("Failed to spawn surface synthesis worker thread");
        }

        Self {
            task_sender,
            result_receiver,
            active_tasks: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Create a generator with a sensible thread count based on CPU cores.
    pub fn with_defaults(params: SynthesisParams) -> Self {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 2).max(1);
        Self::new(params, threads, 64, 128)
    }

    /// Submit a texture for background synthesis.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] if the task's dimensions or seed fail
    /// validation, or [`SubmitError::QueueFull`] (handing the task back) if
    /// the queue has no room.
    pub fn submit(&self, task: SynthesisTask) -> Result<(), SubmitError> {
        if task.width == 0 || task.height == 0 {
            return Err(SurfaceError::InvalidDimension {
                width: task.width,
                height: task.height,
            }
            .into());
        }
        if !task.seed.is_finite() {
            return Err(SurfaceError::from(NoiseError::InvalidSeed(task.seed)).into());
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_tasks.insert(task.key, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        let queued = QueuedTask {
            task: task.clone(),
            cancelled,
        };
        self.task_sender.try_send(queued).map_err(|e| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            self.active_tasks.remove(&e.into_inner().task.key);
            SubmitError::QueueFull(task)
        })
    }

    /// Cancel a pending or in-progress synthesis task.
    ///
    /// If the task has already completed, this is a no-op.
    pub fn cancel(&self, key: &TextureKey) {
        if let Some((_, cancelled)) = self.active_tasks.remove(key) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Drain all completed textures from the result channel.
    ///
    /// Call this once per frame on the caller's thread.
    pub fn drain_results(&self) -> Vec<CompletedTexture> {
        let mut results = Vec::new();
        while let Ok(texture) = self.result_receiver.try_recv() {
            self.active_tasks.remove(&texture.key);
            results.push(texture);
        }
        results
    }

    /// Number of tasks currently in flight (queued or executing).
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` if a task for the given texture slot is pending.
    pub fn is_pending(&self, key: &TextureKey) -> bool {
        self.active_tasks.contains_key(key)
    }
}

/// Synthesize one task's raster. This is the CPU-intensive function that
/// runs on worker threads.
fn synthesize_task(
    task: &SynthesisTask,
    params: SynthesisParams,
) -> Result<SurfaceRaster, SurfaceError> {
    let synthesizer = SurfaceSynthesizer::with_params(task.seed, params)?;
    match task.key.kind {
        TextureKind::Color => synthesizer.synthesize_color(task.key.class, task.width, task.height),
        TextureKind::Bump => synthesizer.synthesize_bump(task.key.class, task.width, task.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(class: TerrainClass, kind: TextureKind) -> SynthesisTask {
        SynthesisTask {
            key: TextureKey { class, kind },
            seed: 0.42,
            width: 32,
            height: 16,
        }
    }

    #[test]
    fn test_all_submitted_textures_complete() {
        let generator = AsyncSurfaceGenerator::new(SynthesisParams::default(), 4, 32, 64);

        let mut submitted = 0;
        for class in TerrainClass::ALL {
            for kind in [TextureKind::Color, TextureKind::Bump] {
                if generator.submit(task(class, kind)).is_ok() {
                    submitted += 1;
                }
            }
        }

        let mut received = 0;
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(30);
        while received < submitted && std::time::Instant::now() < deadline {
            received += generator.drain_results().len();
            if received < submitted {
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
        }

        assert_eq!(
            received, submitted,
            "Should receive all submitted textures: got {received}/{submitted}"
        );
    }

    #[test]
    fn test_background_result_matches_synchronous() {
        let generator = AsyncSurfaceGenerator::new(SynthesisParams::default(), 2, 16, 16);
        generator
            .submit(task(TerrainClass::Volcanic, TextureKind::Color))
            .unwrap();

        let mut results = Vec::new();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while results.is_empty() && std::time::Instant::now() < deadline {
            results.extend(generator.drain_results());
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let synchronous = SurfaceSynthesizer::new(0.42)
            .unwrap()
            .synthesize_color(TerrainClass::Volcanic, 32, 16)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].raster, synchronous);
    }

    #[test]
    fn test_invalid_task_rejected_at_submit() {
        let generator = AsyncSurfaceGenerator::new(SynthesisParams::default(), 1, 16, 16);

        let mut bad_dims = task(TerrainClass::Gas, TextureKind::Color);
        bad_dims.width = 0;
        assert!(matches!(
            generator.submit(bad_dims),
            Err(SubmitError::Invalid(SurfaceError::InvalidDimension { .. }))
        ));

        let mut bad_seed = task(TerrainClass::Gas, TextureKind::Color);
        bad_seed.seed = f64::NAN;
        assert!(matches!(
            generator.submit(bad_seed),
            Err(SubmitError::Invalid(SurfaceError::InvalidSeed(_)))
        ));

        assert_eq!(generator.in_flight_count(), 0);
    }

    #[test]
    fn test_cancellation_before_completion() {
        let generator = AsyncSurfaceGenerator::new(SynthesisParams::default(), 2, 16, 16);

        let key = TextureKey {
            class: TerrainClass::Desert,
            kind: TextureKind::Bump,
        };
        generator
            .submit(task(TerrainClass::Desert, TextureKind::Bump))
            .unwrap();
        generator.cancel(&key);

        // The task may have completed before the cancel landed; either way
        // the slot must no longer be pending once the queue settles.
        std::thread::sleep(std::time::Duration::from_millis(200));
        let _ = generator.drain_results();
        assert!(!generator.is_pending(&key));
    }

    #[test]
    fn test_in_flight_count_settles_to_zero() {
        let generator = AsyncSurfaceGenerator::new(SynthesisParams::default(), 1, 64, 64);

        assert_eq!(generator.in_flight_count(), 0);
        for class in TerrainClass::ALL {
            let _ = generator.submit(task(class, TextureKind::Color));
        }
        assert!(
            generator.in_flight_count() > 0,
            "Should have in-flight tasks after submission"
        );

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while generator.in_flight_count() > 0 && std::time::Instant::now() < deadline {
            let _ = generator.drain_results();
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(generator.in_flight_count(), 0);
    }
}
