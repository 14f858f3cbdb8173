//! Scroll-position memory across navigate-away / navigate-back.
//!
//! One integer offset is kept in session-scoped storage under a fixed key.
//! Storage is best-effort: a failing backend (quota, storage disabled) turns
//! into "nothing to restore", never into an error for the caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Key the offset is stored under unless configured otherwise.
pub const DEFAULT_SCROLL_KEY: &str = "marketplace-scroll";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("session storage is unavailable: {0}")]
    Unavailable(String),
    #[error("session storage quota exceeded")]
    QuotaExceeded,
}

/// Session-scoped string key/value storage (survives navigation, not a full
/// restart).
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-lifetime session storage.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    items: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .items
            .read()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        items.remove(key);
        Ok(())
    }
}

/// The scrollable area the listing is rendered into.
pub trait Viewport: Send + Sync {
    /// Current vertical offset in pixels.
    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, y: u64);
}

/// Headless viewport holding an offset in memory.
#[derive(Debug, Default)]
pub struct VirtualViewport {
    y: AtomicU64,
}

impl VirtualViewport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Viewport for VirtualViewport {
    fn scroll_y(&self) -> f64 {
        self.y.load(Ordering::SeqCst) as f64
    }

    fn scroll_to(&self, y: u64) {
        self.y.store(y, Ordering::SeqCst);
    }
}

/// Saved scroll offset for the browsing view.
///
/// None of the operations can fail: storage errors are logged and mapped to
/// the neutral result (nothing saved, offset 0, nothing cleared).
pub struct ScrollMemory {
    storage: Arc<dyn SessionStorage>,
    viewport: Arc<dyn Viewport>,
    key: String,
}

impl ScrollMemory {
    pub fn new(storage: Arc<dyn SessionStorage>, viewport: Arc<dyn Viewport>) -> Self {
        Self::with_key(storage, viewport, DEFAULT_SCROLL_KEY)
    }

    pub fn with_key(
        storage: Arc<dyn SessionStorage>,
        viewport: Arc<dyn Viewport>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            viewport,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn viewport(&self) -> &dyn Viewport {
        self.viewport.as_ref()
    }

    /// Record the viewport's current offset.
    pub fn save(&self) {
        let offset = whole_pixels(self.viewport.scroll_y());
        best_effort("save", self.storage.set_item(&self.key, &offset.to_string()));
    }

    /// Saved offset, or 0 when absent or unreadable.
    pub fn saved(&self) -> u64 {
        best_effort("read", self.storage.get_item(&self.key))
            .map(|raw| parse_offset(&raw))
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        best_effort("clear", self.storage.remove_item(&self.key));
    }
}

impl core::fmt::Debug for ScrollMemory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollMemory")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn best_effort<T: Default>(op: &str, result: Result<T, StorageError>) -> T {
    result.unwrap_or_else(|err| {
        tracing::debug!(op, error = %err, "scroll memory storage failed; ignoring");
        T::default()
    })
}

fn whole_pixels(y: f64) -> u64 {
    if y.is_finite() && y > 0.0 { y as u64 } else { 0 }
}

/// Leading base-10 integer of `raw`, clamped at 0. Trailing junk (`"450px"`,
/// `"450.5"`) is ignored; no leading digits means 0.
pub fn parse_offset(raw: &str) -> u64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }
    digits[..end].parse().unwrap_or(u64::MAX)
}
