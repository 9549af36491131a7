//! ISR-safe event queue
//!
//! [`SharedEventQueue`] lets vendor event callbacks or interrupt handlers
//! push interface events that a task later drains, with every access
//! inside a critical section.

#[cfg(feature = "async")]
use core::task::Poll;

use super::primitives::CriticalSectionCell;
#[cfg(feature = "async")]
use super::primitives::WakerSlot;
use crate::error::{IoError, Result};
use crate::net::{EventQueue, EventSink, InterfaceEvent};

/// Bounded event FIFO usable from a `static`
///
/// `&SharedEventQueue` implements [`EventSink`], so it can be handed to a
/// [`Netif`](crate::netif::Netif) while the consumer keeps its own
/// reference.
///
/// # Example
///
/// ```ignore
/// static EVENTS: SharedEventQueue<8> = SharedEventQueue::new();
///
/// let mut netif = Netif::new(backend, &EVENTS);
/// netif.bring_up(&config)?;
///
/// while let Some(ev) = EVENTS.receive() {
///     log::info!("{:?}", ev.event);
/// }
/// ```
pub struct SharedEventQueue<const N: usize> {
    queue: CriticalSectionCell<EventQueue<N>>,
    #[cfg(feature = "async")]
    waker: WakerSlot,
}

impl<const N: usize> SharedEventQueue<N> {
    /// Create an empty queue (const, suitable for static initialization)
    pub const fn new() -> Self {
        Self {
            queue: CriticalSectionCell::new(EventQueue::new()),
            #[cfg(feature = "async")]
            waker: WakerSlot::new(),
        }
    }

    /// Append an event, waking a pending receiver
    pub fn push(&self, event: InterfaceEvent) -> core::result::Result<(), IoError> {
        self.queue.with(|q| q.push(event))?;
        #[cfg(feature = "async")]
        self.waker.wake();
        Ok(())
    }

    /// Take the oldest event, if any
    pub fn receive(&self) -> Option<InterfaceEvent> {
        self.queue.with(EventQueue::pop)
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.queue.with(|q| q.len())
    }

    /// True if no event is queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all queued events
    pub fn clear(&self) {
        self.queue.with(EventQueue::clear);
    }

    /// Wait for the next event
    #[cfg(feature = "async")]
    pub async fn receive_async(&self) -> InterfaceEvent {
        core::future::poll_fn(|cx| {
            if let Some(event) = self.receive() {
                return Poll::Ready(event);
            }
            self.waker.register(cx.waker());
            // A push may have landed between the check and the register
            match self.receive() {
                Some(event) => Poll::Ready(event),
                None => Poll::Pending,
            }
        })
        .await
    }
}

impl<const N: usize> Default for SharedEventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventSink for &SharedEventQueue<N> {
    fn emit(&mut self, event: InterfaceEvent) -> Result<()> {
        self.push(event)?;
        Ok(())
    }
}
