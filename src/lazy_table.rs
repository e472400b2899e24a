//! Load-once cell for datasets that are only needed by some callers.
//!
//! Reads after the first successful load go straight to the `OnceLock`.
//! The first load is serialized by a mutex and re-checked under the lock, so
//! concurrent first accesses run the loader once. A failed load leaves the
//! cell empty and the next access tries again.

use anyhow::Result;
use std::sync::{Mutex, OnceLock};

pub(crate) struct LazyTable<T> {
    value: OnceLock<T>,
    init: Mutex<()>,
}

impl<T> LazyTable<T> {
    pub(crate) const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self) -> Option<&T> {
        self.value.get()
    }

    pub(crate) fn get_or_try_init(&self, load: impl FnOnce() -> Result<T>) -> Result<&T> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.init.lock().unwrap_or_else(|err| err.into_inner());
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let loaded = load()?;
        Ok(self.value.get_or_init(|| loaded))
    }
}
