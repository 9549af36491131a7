//! Interrupt-safe sharing
//!
//! [`SharedEventQueue`] is an event FIFO shared between interrupt-context
//! producers and a task. Every access runs inside a critical section.
//!
//! # Feature Flags
//!
//! - `critical-section`: enables this module
//! - `async`: adds [`SharedEventQueue::receive_async`]

mod primitives;
mod shared;

pub use shared::SharedEventQueue;
