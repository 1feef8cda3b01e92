use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Polled between tiles. Never polled mid-tile, so a tile is always written whole.
pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Cancels once a wall-clock budget has been spent.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    #[must_use]
    pub fn at(at: Instant) -> Self {
        Self { at }
    }
}

impl CancelToken for Deadline {
    #[inline]
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.at
    }
}
