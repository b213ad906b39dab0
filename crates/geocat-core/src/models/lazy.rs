//! Deferred values computed on first access.

use std::fmt;
use std::sync::OnceLock;

use crate::error::Result;

type Thunk<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

/// A value produced by a thunk on first access and cached afterwards.
///
/// Failed evaluations are not cached: the error goes back to the caller and
/// the next access runs the thunk again.
pub struct Lazy<T> {
    init: Thunk<T>,
    cell: OnceLock<T>,
}

impl<T: Clone> Lazy<T> {
    /// Create a lazy value from a thunk
    pub fn new(init: impl Fn() -> Result<T> + Send + Sync + 'static) -> Self {
        Self { init: Box::new(init), cell: OnceLock::new() }
    }

    /// Create a lazy value that is already resolved
    pub fn ready(value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let cell = OnceLock::new();
        let _ = cell.set(value.clone());
        Self { init: Box::new(move || Ok(value.clone())), cell }
    }

    /// Get the value, running the thunk if it has not produced one yet
    pub fn get(&self) -> Result<T> {
        if let Some(value) = self.cell.get() {
            return Ok(value.clone());
        }
        let value = (self.init)()?;
        Ok(self.cell.get_or_init(|| value).clone())
    }

    /// Whether the thunk has already produced a value
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy").field("resolved", &self.cell.get().is_some()).finish()
    }
}
