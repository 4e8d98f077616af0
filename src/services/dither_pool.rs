//! Bounded pool of dedicated dithering threads.
//!
//! Jobs wait in a bounded queue; each carries its raster and palette in and
//! gets its result back over a one-shot channel. A panicking job is caught
//! and reported as [`ProcessError::WorkerFailure`], and the worker keeps
//! serving.

use epaper_dither::{Ditherer, Palette, QuantizedImage};
use image::RgbaImage;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};

use crate::error::ProcessError;

type Work = Box<dyn FnOnce() -> Result<QuantizedImage, ProcessError> + Send>;

struct Job {
    work: Work,
    reply: oneshot::Sender<Result<QuantizedImage, ProcessError>>,
}

pub struct DitherPool {
    sender: mpsc::Sender<Job>,
    workers: usize,
}

impl DitherPool {
    /// Spawn `workers` threads sharing a queue of `queue` pending jobs.
    pub fn new(workers: usize, queue: usize) -> std::io::Result<Self> {
        let workers = workers.max(1);
        let (sender, receiver) = mpsc::channel::<Job>(queue.max(1));
        let receiver = Arc::new(Mutex::new(receiver));

        for i in 0..workers {
            let receiver = receiver.clone();
            std::thread::Builder::new()
                .name(format!("dither-{i}"))
                .spawn(move || worker_loop(receiver))?;
        }

        tracing::info!(workers, queue, "Dither pool started");
        Ok(Self { sender, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Dither an RGBA raster against `palette`. Alpha is ignored.
    pub async fn dither(
        &self,
        image: RgbaImage,
        palette: Palette,
        step: u32,
    ) -> Result<QuantizedImage, ProcessError> {
        self.run(move || {
            let (width, height) = image.dimensions();
            let started = Instant::now();
            let result = Ditherer::new(palette).step(step).dither_rgba(
                image.as_raw(),
                width as usize,
                height as usize,
            )?;
            tracing::debug!(
                width,
                height,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Dithered image"
            );
            Ok(result)
        })
        .await
    }

    /// Queue arbitrary work on the pool and wait for its result.
    pub(crate) async fn run<F>(&self, work: F) -> Result<QuantizedImage, ProcessError>
    where
        F: FnOnce() -> Result<QuantizedImage, ProcessError> + Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let job = Job {
            work: Box::new(work),
            reply,
        };

        self.sender
            .send(job)
            .await
            .map_err(|_| ProcessError::WorkerFailure("dither pool has shut down".to_string()))?;

        response.await.map_err(|_| {
            ProcessError::WorkerFailure("dither worker exited without replying".to_string())
        })?
    }
}

fn worker_loop(receiver: Arc<Mutex<mpsc::Receiver<Job>>>) {
    loop {
        // Hold the lock only while waiting for the next job
        let job = receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .blocking_recv();
        let Some(job) = job else {
            break;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(job.work)).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::error!(%message, "Dither job panicked");
            Err(ProcessError::WorkerFailure(message))
        });

        if job.reply.send(result).is_err() {
            tracing::debug!("Dither result dropped, caller went away");
        }
    }
    tracing::debug!("Dither worker stopping");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "dither job panicked".to_string()
    }
}
