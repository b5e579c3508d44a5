//! Scoped environment overrides for integration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the process environment lock and restores overridden variables
/// when dropped.
pub struct EnvVarGuard {
    previous: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes`, where `None` unsets the variable.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|(name, value)| {
                let saved = env::var(name).ok();
                apply(name, *value);
                ((*name).to_owned(), saved)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, value) in self.previous.drain(..).rev() {
            apply(&name, value.as_deref());
        }
    }
}

fn apply(name: &str, value: Option<&str>) {
    // SAFETY: ENV_MUTEX serializes every environment mutation in these tests.
    unsafe {
        match value {
            Some(new_value) => env::set_var(name, new_value),
            None => env::remove_var(name),
        }
    }
}
