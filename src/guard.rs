use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
}

/// Allows a single outstanding request at a time. A second submission while
/// one is pending is rejected with [`AppError::Busy`].
#[derive(Debug, Default)]
pub struct RequestGuard {
    pending: AtomicBool,
}

/// Held for the duration of a request; returns the guard to idle on drop.
#[derive(Debug)]
pub struct PendingRequest<'a> {
    guard: &'a RequestGuard,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestState {
        if self.pending.load(Ordering::Acquire) {
            RequestState::Pending
        } else {
            RequestState::Idle
        }
    }

    pub fn try_begin(&self) -> Result<PendingRequest<'_>, AppError> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::Busy)?;
        Ok(PendingRequest { guard: self })
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        self.guard.pending.store(false, Ordering::Release);
    }
}
