//! Round-robin pool of recognizer instances.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use comply_core::errors::DetectionError;
use comply_core::traits::EntityRecognizer;

/// Upper bound on pooled instances.
const MAX_POOL_SIZE: usize = 16;

/// Recognizer instances shared by worker threads. Each instance is used by
/// one worker at a time.
pub struct RecognizerPool {
    instances: Vec<Mutex<Box<dyn EntityRecognizer>>>,
    next: AtomicUsize,
}

impl RecognizerPool {
    /// Build a pool from ready instances. Returns `None` for an empty list.
    pub fn new(instances: Vec<Box<dyn EntityRecognizer>>) -> Option<Self> {
        if instances.is_empty() {
            return None;
        }
        let instances = instances
            .into_iter()
            .take(MAX_POOL_SIZE)
            .map(Mutex::new)
            .collect();
        Some(Self {
            instances,
            next: AtomicUsize::new(0),
        })
    }

    /// Build `size` instances with `factory`.
    pub fn build<F>(size: usize, mut factory: F) -> Result<Self, DetectionError>
    where
        F: FnMut() -> Result<Box<dyn EntityRecognizer>, DetectionError>,
    {
        let size = size.clamp(1, MAX_POOL_SIZE);
        let mut instances = Vec::with_capacity(size);
        for _ in 0..size {
            instances.push(factory()?);
        }
        Self::new(instances).ok_or_else(|| DetectionError::RecognizerUnavailable {
            recognizer: "pool".to_string(),
            reason: "no instances".to_string(),
        })
    }

    /// Run `f` with the next instance (round-robin).
    pub fn with_recognizer<F, T>(&self, f: F) -> Result<T, DetectionError>
    where
        F: FnOnce(&mut dyn EntityRecognizer) -> Result<T, DetectionError>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.instances.len();
        let mut guard = self.instances[idx]
            .lock()
            .map_err(|e| DetectionError::RecognizerUnavailable {
                recognizer: format!("pool[{idx}]"),
                reason: format!("recognizer lock poisoned: {e}"),
            })?;
        f(guard.as_mut())
    }

    pub fn size(&self) -> usize {
        self.instances.len()
    }
}
