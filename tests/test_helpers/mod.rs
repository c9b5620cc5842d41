//! Scoped environment overrides for configuration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Restores the overridden variables when dropped.
///
/// Holding the guard also holds a process-wide lock, so tests that touch the
/// environment run one at a time.
pub struct EnvVarGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `overrides`; `None` unsets the variable.
    pub fn apply(overrides: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let saved = overrides
            .iter()
            .map(|(name, value)| {
                let previous = env::var_os(name);
                write_var(name, value.map(OsString::from));
                (*name, previous)
            })
            .collect();

        Self { saved, _lock: lock }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, previous) in self.saved.drain(..).rev() {
            write_var(name, previous);
        }
    }
}

fn write_var(name: &str, value: Option<OsString>) {
    unsafe {
        // SAFETY: ENV_MUTEX serializes environment mutations in tests.
        match value {
            Some(value) => env::set_var(name, value),
            None => env::remove_var(name),
        }
    }
}
