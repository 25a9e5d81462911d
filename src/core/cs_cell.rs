//! Critical section protected cell
//!
//! Zero-overhead wrapper for data that must be accessed within critical sections.

use core::cell::UnsafeCell;

use crate::critical::CriticalSection;

/// A cell that can only be accessed within a critical section.
///
/// Callers must not hold the returned reference past the end of the
/// closure that produced the token, and must not call back into code that
/// borrows the same cell while holding it.
pub struct CsCell<T>(UnsafeCell<T>);

unsafe impl<T: Send> Sync for CsCell<T> {}

impl<T> CsCell<T> {
    /// Create a new CsCell
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self(UnsafeCell::new(value))
    }

    /// Get a mutable reference to the inner value
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub fn get<'cs>(&'cs self, _cs: CriticalSection<'cs>) -> &'cs mut T {
        unsafe { &mut *self.0.get() }
    }

    /// Run `f` on the inner value inside a fresh critical section
    #[inline]
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        crate::critical::critical_section(|cs| f(self.get(cs)))
    }
}
