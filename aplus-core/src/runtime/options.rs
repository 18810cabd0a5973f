use std::str::FromStr;

use crate::error::Error;

pub const NOTIFY_MODE_ENV: &str = "APLUS_NOTIFY_MODE";
pub const MAX_ADOPTION_DEPTH_ENV: &str = "APLUS_MAX_ADOPTION_DEPTH";

pub const DEFAULT_MAX_ADOPTION_DEPTH: usize = 256;

/// when continuations registered on a pending promise are notified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// every handler runs from the job queue, never inside `fulfill`/`reject`
    #[default]
    Deferred,
    /// handlers registered while pending run inside the settling call.
    /// handlers attached after settlement are still deferred.
    Synchronous,
}

impl FromStr for NotifyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" | "async" => Ok(Self::Deferred),
            "sync" | "synchronous" => Ok(Self::Synchronous),
            _ => Err(Error::InvalidOption {
                key: NOTIFY_MODE_ENV,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub notify_mode: NotifyMode,
    /// nested thenable adoptions allowed before the target is rejected
    pub max_adoption_depth: usize,
    /// upper bound on jobs run by one `run_until_idle` call
    pub max_jobs_per_drain: Option<usize>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            notify_mode: NotifyMode::Deferred,
            max_adoption_depth: DEFAULT_MAX_ADOPTION_DEPTH,
            max_jobs_per_drain: None,
        }
    }
}

impl RuntimeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notify_mode(mut self, mode: NotifyMode) -> Self {
        self.notify_mode = mode;
        self
    }

    pub fn with_max_adoption_depth(mut self, depth: usize) -> Self {
        self.max_adoption_depth = depth;
        self
    }

    pub fn with_max_jobs_per_drain(mut self, max: Option<usize>) -> Self {
        self.max_jobs_per_drain = max;
        self
    }

    /// defaults overridden by `APLUS_NOTIFY_MODE` and `APLUS_MAX_ADOPTION_DEPTH`
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(mode) = lookup(NOTIFY_MODE_ENV) {
            opts.notify_mode = mode.parse()?;
        }

        if let Some(depth) = lookup(MAX_ADOPTION_DEPTH_ENV) {
            opts.max_adoption_depth = depth
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|d| *d > 0)
                .ok_or(Error::InvalidOption {
                    key: MAX_ADOPTION_DEPTH_ENV,
                    value: depth.clone(),
                })?;
        }

        Ok(opts)
    }
}
