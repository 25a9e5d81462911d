//! Error types for the scheduler
//!
//! Uses Rust's Result pattern for the immediate caller, plus a single
//! process-wide latch holding the most recent error code.

use portable_atomic::{AtomicU8, Ordering};

/// Scheduler error type
///
/// Discriminants are the numeric codes stored in the error latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SchedError {
    /// No free slot in the task table
    TooManyTasks = 1,
    /// Slot was already empty (or out of range)
    CannotDeleteTask = 2,
    /// `start` called before `init`
    NotInitialized = 3,
}

/// Result type alias for scheduler operations
pub type SchedResult<T> = Result<T, SchedError>;

/// Latch value meaning "no error recorded"
pub const ERROR_NONE: u8 = 0;

impl SchedError {
    /// Numeric error code
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(SchedError::TooManyTasks),
            2 => Some(SchedError::CannotDeleteTask),
            3 => Some(SchedError::NotInitialized),
            _ => None,
        }
    }
}

/// Most-recent-error latch
///
/// Not a queue: a later error overwrites an earlier unreported one.
pub struct ErrorLatch {
    code: AtomicU8,
}

impl ErrorLatch {
    pub const fn new() -> Self {
        Self {
            code: AtomicU8::new(ERROR_NONE),
        }
    }

    #[inline]
    pub fn set(&self, err: SchedError) {
        self.code.store(err.code(), Ordering::Release);
    }

    #[inline]
    pub fn clear(&self) {
        self.code.store(ERROR_NONE, Ordering::Release);
    }

    /// Raw latched code (`ERROR_NONE` if nothing was recorded)
    #[inline]
    pub fn code(&self) -> u8 {
        self.code.load(Ordering::Acquire)
    }

    #[inline]
    pub fn get(&self) -> Option<SchedError> {
        SchedError::from_code(self.code())
    }
}

impl Default for ErrorLatch {
    fn default() -> Self {
        Self::new()
    }
}
