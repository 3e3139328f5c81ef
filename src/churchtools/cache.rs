//! Lazily populated reference data.
//!
//! Calendar metadata and the service catalog change rarely; they are fetched on
//! first use and kept for the lifetime of the process. Call sites only see
//! [`Memo::get_or_load`], so a refresh policy can be added here alone.

use std::future::Future;
use tokio::sync::OnceCell;

use crate::error::Result;

/// Write-once value filled by the first successful load.
///
/// Failed loads are not remembered; the next caller tries again.
#[derive(Debug)]
pub struct Memo<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    /// Create an empty memo; `name` is used in log lines.
    pub fn new(name: &'static str) -> Self {
        Self { name, cell: OnceCell::new() }
    }

    /// Return the cached value, running `load` if none is stored yet.
    ///
    /// Concurrent first callers wait for a single load.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<&T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.cell
            .get_or_try_init(|| async move {
                let value = load().await?;
                tracing::debug!("Populated {} cache", self.name);
                Ok(value)
            })
            .await
    }

    /// The cached value, if loaded.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}
