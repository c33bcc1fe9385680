//! Background thread for layout writes
//!
//! The event thread hands finished documents to the worker and polls results
//! back, so a slow disk never stalls pointer handling.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use super::document::AppLayout;
use super::store::LayoutStore;

struct WriteJob {
    path: PathBuf,
    layout: AppLayout,
}

/// Result of one background write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    pub path: PathBuf,
    pub result: Result<(), String>,
}

pub struct PersistWorker {
    jobs: Option<Sender<WriteJob>>,
    results: Receiver<WriteResult>,
    handle: Option<JoinHandle<()>>,
}

impl PersistWorker {
    pub fn spawn() -> std::io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<WriteJob>();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("dockyard-persist".to_string())
            .spawn(move || {
                for job in job_rx {
                    let result = LayoutStore::new(&job.path)
                        .save(&job.layout)
                        .map_err(|e| e.to_string());
                    if result_tx
                        .send(WriteResult {
                            path: job.path,
                            result,
                        })
                        .is_err()
                    {
                        break;
                    }
                }
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
        })
    }

    /// Queue a write; returns false if the worker has shut down
    pub fn submit(&self, path: PathBuf, layout: AppLayout) -> bool {
        match &self.jobs {
            Some(jobs) => jobs.send(WriteJob { path, layout }).is_ok(),
            None => false,
        }
    }

    /// Drain finished writes (non-blocking)
    pub fn poll_results(&self) -> Vec<WriteResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.results.try_recv() {
            if let Err(e) = &result.result {
                tracing::warn!("Layout write to {} failed: {}", result.path.display(), e);
            }
            results.push(result);
        }
        results
    }

    /// Block until every queued write is done, then return all results
    pub fn shutdown(mut self) -> Vec<WriteResult> {
        self.finish();
        self.results.try_iter().collect()
    }

    fn finish(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Layout persistence thread panicked");
            }
        }
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        self.finish();
    }
}
