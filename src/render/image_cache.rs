//! Async decoding of image strokes.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task, TaskPool};
use futures_lite::future;
use image::RgbaImage;

use crate::error::AnnotationResult;

/// Cache key for encoded image bytes
pub fn content_key(data: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    data.hash(&mut hasher);
    hasher.finish()
}

/// Decode PNG/JPEG/etc bytes into RGBA pixels
pub fn decode_image(data: &[u8]) -> AnnotationResult<RgbaImage> {
    Ok(image::load_from_memory(data)?.to_rgba8())
}

/// Decoded images keyed by content, with decodes running on the compute pool.
///
/// A lookup that misses starts a decode and returns `None`; the stroke is
/// simply not drawn until [`ImageCache::poll`] reports the key as ready.
/// Failed decodes are remembered and never retried.
#[derive(Default)]
pub struct ImageCache {
    decoded: HashMap<u64, Arc<RgbaImage>>,
    pending: HashMap<u64, Task<AnnotationResult<RgbaImage>>>,
    failed: HashSet<u64>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded image for these bytes, starting a decode on a miss
    pub fn get_or_decode(&mut self, data: &Arc<[u8]>) -> Option<Arc<RgbaImage>> {
        let key = content_key(data);
        if let Some(image) = self.decoded.get(&key) {
            return Some(Arc::clone(image));
        }
        if self.failed.contains(&key) || self.pending.contains_key(&key) {
            return None;
        }

        let bytes = Arc::clone(data);
        let task_pool = AsyncComputeTaskPool::get_or_init(TaskPool::new);
        let task = task_pool.spawn(async move { decode_image(&bytes) });
        self.pending.insert(key, task);
        None
    }

    /// Collect finished decodes. Returns the keys that became available.
    pub fn poll(&mut self) -> Vec<u64> {
        let mut ready = Vec::new();
        let decoded = &mut self.decoded;
        let failed = &mut self.failed;

        self.pending.retain(|key, task| {
            let Some(result) = future::block_on(future::poll_once(task)) else {
                return true;
            };
            match result {
                Ok(image) => {
                    decoded.insert(*key, Arc::new(image));
                    ready.push(*key);
                }
                Err(e) => {
                    warn!("Failed to decode image stroke: {}", e);
                    failed.insert(*key);
                }
            }
            false
        });
        ready
    }

    /// Store an already decoded image (used when the pixels are at hand)
    pub fn insert(&mut self, data: &[u8], image: RgbaImage) {
        let key = content_key(data);
        self.pending.remove(&key);
        self.failed.remove(&key);
        self.decoded.insert(key, Arc::new(image));
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn has_failed(&self, data: &[u8]) -> bool {
        self.failed.contains(&content_key(data))
    }

    pub fn is_decoded(&self, data: &[u8]) -> bool {
        self.decoded.contains_key(&content_key(data))
    }
}
