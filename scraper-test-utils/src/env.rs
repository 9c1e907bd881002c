//! Environment variable management for testing
//!
//! Tests that touch process-wide environment variables hold an
//! [`EnvVarGuard`], which serializes them and restores the original value when
//! dropped.

use std::env;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Saves one environment variable and restores it on drop
pub struct EnvVarGuard {
  /// Name of the guarded variable
  name: String,
  /// The original value, if any
  original: Option<String>,
  _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
  /// Take the environment lock and remember the current value of `name`
  pub fn new(name: &str) -> Self {
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
      _lock: lock,
    }
  }

  /// Set the guarded variable for the lifetime of the guard
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the guarded variable for the lifetime of the guard
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const VAR: &str = "SCRAPER_TEST_UTILS_ENV_GUARD";

  #[test]
  fn test_guard_restores_missing_variable() {
    {
      let guard = EnvVarGuard::new(VAR);
      guard.set("temporary");
      assert_eq!(env::var(VAR).as_deref(), Ok("temporary"));
    }

    let _guard = EnvVarGuard::new(VAR);
    assert!(env::var(VAR).is_err());
  }
}
