//! Critical-section cell and waker slot

use core::cell::RefCell;
#[cfg(feature = "async")]
use core::task::Waker;

use critical_section::Mutex;

/// Interior mutability guarded by a critical section
pub(crate) struct CriticalSectionCell<T>(Mutex<RefCell<T>>);

impl<T> CriticalSectionCell<T> {
    pub(crate) const fn new(value: T) -> Self {
        Self(Mutex::new(RefCell::new(value)))
    }

    /// Run `f` on the value with interrupts masked
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut self.0.borrow_ref_mut(cs)))
    }
}

/// Single waker slot for one async receiver
#[cfg(feature = "async")]
pub(crate) struct WakerSlot(CriticalSectionCell<Option<Waker>>);

#[cfg(feature = "async")]
impl WakerSlot {
    pub(crate) const fn new() -> Self {
        Self(CriticalSectionCell::new(None))
    }

    /// Store `waker`, replacing a waker for another task
    pub(crate) fn register(&self, waker: &Waker) {
        self.0.with(|slot| match slot {
            Some(current) if current.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        });
    }

    /// Wake and clear the stored waker
    pub(crate) fn wake(&self) {
        // Wake outside the critical section
        if let Some(waker) = self.0.with(Option::take) {
            waker.wake();
        }
    }

    #[cfg(test)]
    pub(crate) fn is_registered(&self) -> bool {
        self.0.with(|slot| slot.is_some())
    }
}
