//! Driver storage reachable from interrupt handlers.
//!
//! Built on `critical-section`, so it works on any target with a critical
//! section implementation. Only engine control goes through this cell; the
//! universe a driver borrows stays readable without it.
//!
//! ```ignore
//! static DMX_IN: IrqCell<DmxReceiver<'static, PioRx, DmaChannel>> = IrqCell::new();
//!
//! #[interrupt]
//! fn PIO1_IRQ_0() {
//!     DMX_IN.with(|rx| rx.on_frame_boundary());
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

/// Optional value guarded by a critical section.
pub struct IrqCell<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> IrqCell<T> {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store `value`, returning the previous occupant.
    pub fn install(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).replace(Some(value)))
    }

    /// Remove and return the stored value.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_some())
    }

    /// Run `f` on the stored value inside a critical section.
    ///
    /// Returns `None` if the cell is empty. Keep `f` short: interrupts are
    /// masked while it runs.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow(cs).borrow_mut();
            value.as_mut().map(f)
        })
    }
}

impl<T> Default for IrqCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
