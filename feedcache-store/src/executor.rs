//! Serialized operation executor.
//!
//! One dedicated worker thread per store instance drains a FIFO queue of
//! operations. That single drain is what gives the store its ordering
//! contract: operations submitted by any number of concurrent callers run
//! strictly one at a time, in submission order, and operation N+1 does not
//! start until N's backing-engine transaction has fully finished.
//!
//! The worker owns the backing handle exclusively. It is opened lazily on
//! the first operation that needs it and cached on success; if opening
//! fails, that operation completes with the open error and the next one
//! attempts the open again. The executor is agnostic to what an operation
//! does - it only runs it and delivers the result, exactly once, over a
//! oneshot channel.

use std::sync::mpsc;
use std::thread;

use tokio::sync::oneshot;
use tracing::debug;

use feedcache_core::{BackendError, StoreError, StoreResult};

/// A queued operation. Receives the opened backend handle, or the open
/// error when the handle could not be produced.
type Job<B> = Box<dyn FnOnce(Result<&mut B, BackendError>) + Send>;

/// FIFO executor owning a backend handle on a dedicated worker thread.
pub struct SerialExecutor<B> {
    sender: Option<mpsc::Sender<Job<B>>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl<B: 'static> SerialExecutor<B> {
    /// Spawn the worker. `open` runs on the worker thread, so the backend
    /// type itself never has to cross threads.
    pub fn spawn<F>(open: F) -> Self
    where
        F: FnMut() -> Result<B, BackendError> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<Job<B>>();
        let worker = thread::spawn(move || run_worker(receiver, open));
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Submit an operation and await its result.
    ///
    /// The calling task is never blocked by the backing-engine work; it
    /// only awaits the completion. Every submission completes exactly
    /// once, whatever the operation's outcome.
    pub async fn submit<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut B) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job<B> = Box::new(move |backend| {
            let outcome = match backend {
                Ok(backend) => op(backend),
                Err(e) => Err(StoreError::Backend(e)),
            };
            // The caller may have stopped waiting; that is their choice.
            let _ = tx.send(outcome);
        });

        let sender = self.sender.as_ref().ok_or_else(worker_gone)?;
        sender.send(job).map_err(|_| worker_gone())?;
        rx.await.map_err(|_| worker_gone())?
    }
}

impl<B> Drop for SerialExecutor<B> {
    /// Close the queue and wait for already-submitted operations to
    /// finish, so the backend handle is released deterministically.
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker<B, F>(receiver: mpsc::Receiver<Job<B>>, mut open: F)
where
    F: FnMut() -> Result<B, BackendError>,
{
    let mut handle: Option<B> = None;
    while let Ok(job) = receiver.recv() {
        match ensure_open(&mut handle, &mut open) {
            Ok(backend) => job(Ok(backend)),
            Err(e) => job(Err(e)),
        }
    }
    debug!("store worker queue closed, draining finished");
}

fn ensure_open<'a, B>(
    handle: &'a mut Option<B>,
    open: &mut impl FnMut() -> Result<B, BackendError>,
) -> Result<&'a mut B, BackendError> {
    let backend = match handle.take() {
        Some(backend) => backend,
        None => open()?,
    };
    Ok(handle.insert(backend))
}

fn worker_gone() -> StoreError {
    StoreError::Backend(BackendError::Open {
        reason: "store worker is no longer running".into(),
    })
}
