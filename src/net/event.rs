//! Link events and their ordering
//!
//! Platforms report link changes in whatever order their vendor stack
//! produces them. [`LinkEventGate`] turns that into one ordered stream per
//! interface before anything reaches an [`EventSink`]:
//!
//! ```text
//! Stopped --start--> Started --Connected--> Connected <--> Disconnected
//! ```
//!
//! - `Disconnected` is never delivered without a prior `Connected`.
//! - `IpAcquired` is only delivered while connected; one that arrives
//!   early is held and delivered right after the next `Connected`.
//! - A repeated `Connected` is dropped.

use crate::error::{Error, IoError, Result};

use super::ip::IpInfo;

// =============================================================================
// Interface Identity
// =============================================================================

/// Interface class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceKind {
    /// Wired Ethernet
    #[default]
    Ethernet,
}

/// Tag carried by every event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceId {
    /// Interface class
    pub kind: InterfaceKind,
    /// Instance number within the class
    pub instance: u8,
}

impl InterfaceId {
    /// Ethernet interface `instance`
    pub const fn ethernet(instance: u8) -> Self {
        Self {
            kind: InterfaceKind::Ethernet,
            instance,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Status change reported to the interface manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetEvent {
    /// Link is up
    Connected,
    /// Link is down
    Disconnected,
    /// An address was assigned
    IpAcquired(IpInfo),
}

/// Event tagged with the interface it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceEvent {
    /// Source interface
    pub id: InterfaceId,
    /// What happened
    pub event: NetEvent,
}

/// Interface lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceState {
    /// Not brought up
    #[default]
    Stopped,
    /// Driver started, no link yet
    Started,
    /// Link up
    Connected,
    /// Link lost after having been up
    Disconnected,
}

// =============================================================================
// Event Sink
// =============================================================================

/// Consumer of ordered interface events
pub trait EventSink {
    /// Deliver one event
    fn emit(&mut self, event: InterfaceEvent) -> Result<()>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: InterfaceEvent) -> Result<()> {
        (**self).emit(event)
    }
}

/// Bounded FIFO of interface events
///
/// Emitting into a full queue fails with [`IoError::QueueFull`] and the
/// event is not stored.
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    slots: [Option<InterfaceEvent>; N],
    head: usize,
    len: usize,
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            head: 0,
            len: 0,
        }
    }

    /// Queue capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of queued events
    pub const fn len(&self) -> usize {
        self.len
    }

    /// No queued events
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// No free slot
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Append an event
    pub fn push(&mut self, event: InterfaceEvent) -> core::result::Result<(), IoError> {
        if self.is_full() {
            return Err(IoError::QueueFull);
        }
        let tail = (self.head + self.len) % N;
        self.slots[tail] = Some(event);
        self.len += 1;
        Ok(())
    }

    /// Remove the oldest event
    pub fn pop(&mut self) -> Option<InterfaceEvent> {
        if self.is_empty() {
            return None;
        }
        let event = self.slots[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        event
    }

    /// Drop all queued events
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventSink for EventQueue<N> {
    fn emit(&mut self, event: InterfaceEvent) -> Result<()> {
        self.push(event).map_err(Error::from)
    }
}

// =============================================================================
// Ordering Gate
// =============================================================================

/// Per-interface event ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkEventGate {
    state: InterfaceState,
    pending_ip: Option<IpInfo>,
}

impl LinkEventGate {
    /// Gate for a stopped interface
    pub const fn new() -> Self {
        Self {
            state: InterfaceState::Stopped,
            pending_ip: None,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> InterfaceState {
        self.state
    }

    /// Address held back until the link comes up
    pub const fn pending_ip(&self) -> Option<IpInfo> {
        self.pending_ip
    }

    /// Driver started
    pub fn start(&mut self) {
        if self.state == InterfaceState::Stopped {
            self.state = InterfaceState::Started;
        }
    }

    /// Driver stopped; any held address is discarded
    pub fn stop(&mut self) {
        self.state = InterfaceState::Stopped;
        self.pending_ip = None;
    }

    /// Pass `event` through the ordering rules into `sink`
    ///
    /// State only advances once the sink has accepted the event, so a
    /// rejected event can be offered again. While connected, every admitted
    /// event first delivers a held address.
    pub fn admit<S: EventSink>(
        &mut self,
        id: InterfaceId,
        event: NetEvent,
        sink: &mut S,
    ) -> Result<()> {
        match (self.state, event) {
            (InterfaceState::Stopped, _) => {
                log::debug!("eth{}: {event:?} while stopped, dropped", id.instance);
            }
            (InterfaceState::Connected, NetEvent::Connected) => self.flush(id, sink)?,
            (_, NetEvent::Connected) => {
                sink.emit(InterfaceEvent { id, event })?;
                self.state = InterfaceState::Connected;
                self.flush(id, sink)?;
            }
            (InterfaceState::Connected, NetEvent::Disconnected) => {
                self.flush(id, sink)?;
                sink.emit(InterfaceEvent { id, event })?;
                self.state = InterfaceState::Disconnected;
            }
            (_, NetEvent::Disconnected) => {}
            (InterfaceState::Connected, NetEvent::IpAcquired(_)) => {
                // The newer address supersedes a held one
                sink.emit(InterfaceEvent { id, event })?;
                self.pending_ip = None;
            }
            (_, NetEvent::IpAcquired(info)) => {
                self.pending_ip = Some(info);
            }
        }
        Ok(())
    }

    /// Deliver a held address if the link is up
    ///
    /// The address stays held if `sink` rejects it.
    pub fn flush<S: EventSink>(&mut self, id: InterfaceId, sink: &mut S) -> Result<()> {
        if self.state != InterfaceState::Connected {
            return Ok(());
        }
        if let Some(info) = self.pending_ip {
            sink.emit(InterfaceEvent {
                id,
                event: NetEvent::IpAcquired(info),
            })?;
            self.pending_ip = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::net::Ipv4Addr;
    use std::vec::Vec;

    use super::*;

    const ID: InterfaceId = InterfaceId::ethernet(0);

    fn lease() -> IpInfo {
        IpInfo::new(
            Ipv4Addr::new(192, 0, 2, 5),
            Ipv4Addr::new(255, 255, 255, 0),
            Ipv4Addr::new(192, 0, 2, 1),
        )
    }

    fn drain<const N: usize>(queue: &mut EventQueue<N>) -> Vec<NetEvent> {
        core::iter::from_fn(|| queue.pop()).map(|e| e.event).collect()
    }

    fn started() -> LinkEventGate {
        let mut gate = LinkEventGate::new();
        gate.start();
        gate
    }

    #[test]
    fn queue_is_fifo_and_bounded() {
        let mut queue = EventQueue::<2>::new();
        queue.emit(InterfaceEvent { id: ID, event: NetEvent::Connected }).unwrap();
        queue.emit(InterfaceEvent { id: ID, event: NetEvent::Disconnected }).unwrap();

        assert!(queue.is_full());
        assert_eq!(
            queue.emit(InterfaceEvent { id: ID, event: NetEvent::Connected }),
            Err(Error::Io(IoError::QueueFull))
        );

        assert_eq!(queue.pop().map(|e| e.event), Some(NetEvent::Connected));
        queue.emit(InterfaceEvent { id: ID, event: NetEvent::IpAcquired(lease()) }).unwrap();
        assert_eq!(
            drain(&mut queue),
            std::vec![NetEvent::Disconnected, NetEvent::IpAcquired(lease())]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn events_carry_interface_id() {
        let mut queue = EventQueue::<4>::new();
        let mut gate = started();
        let id = InterfaceId::ethernet(3);

        gate.admit(id, NetEvent::Connected, &mut queue).unwrap();
        let event = queue.pop().unwrap();
        assert_eq!(event.id.kind, InterfaceKind::Ethernet);
        assert_eq!(event.id.instance, 3);
    }

    #[test]
    fn disconnected_requires_prior_connected() {
        let mut queue = EventQueue::<4>::new();
        let mut gate = started();

        gate.admit(ID, NetEvent::Disconnected, &mut queue).unwrap();
        assert!(queue.is_empty());
        assert_eq!(gate.state(), InterfaceState::Started);

        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();
        gate.admit(ID, NetEvent::Disconnected, &mut queue).unwrap();
        gate.admit(ID, NetEvent::Disconnected, &mut queue).unwrap();
        assert_eq!(
            drain(&mut queue),
            std::vec![NetEvent::Connected, NetEvent::Disconnected]
        );
        assert_eq!(gate.state(), InterfaceState::Disconnected);
    }

    #[test]
    fn early_ip_is_held_until_connected() {
        let mut queue = EventQueue::<4>::new();
        let mut gate = started();

        gate.admit(ID, NetEvent::IpAcquired(lease()), &mut queue).unwrap();
        assert!(queue.is_empty());
        assert_eq!(gate.pending_ip(), Some(lease()));

        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();
        assert_eq!(
            drain(&mut queue),
            std::vec![NetEvent::Connected, NetEvent::IpAcquired(lease())]
        );
        assert_eq!(gate.pending_ip(), None);
    }

    #[test]
    fn duplicate_connected_dropped() {
        let mut queue = EventQueue::<4>::new();
        let mut gate = started();

        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();
        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();
        gate.admit(ID, NetEvent::IpAcquired(lease()), &mut queue).unwrap();

        assert_eq!(
            drain(&mut queue),
            std::vec![NetEvent::Connected, NetEvent::IpAcquired(lease())]
        );
    }

    #[test]
    fn reconnect_after_disconnect() {
        let mut queue = EventQueue::<8>::new();
        let mut gate = started();

        for event in [NetEvent::Connected, NetEvent::Disconnected, NetEvent::Connected] {
            gate.admit(ID, event, &mut queue).unwrap();
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(gate.state(), InterfaceState::Connected);
    }

    #[test]
    fn stopped_interface_drops_everything() {
        let mut queue = EventQueue::<4>::new();
        let mut gate = LinkEventGate::new();

        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();
        gate.admit(ID, NetEvent::IpAcquired(lease()), &mut queue).unwrap();
        assert!(queue.is_empty());
        assert_eq!(gate.state(), InterfaceState::Stopped);
    }

    #[test]
    fn stop_discards_held_ip() {
        let mut queue = EventQueue::<4>::new();
        let mut gate = started();
        gate.admit(ID, NetEvent::IpAcquired(lease()), &mut queue).unwrap();

        gate.stop();
        gate.start();
        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();

        assert_eq!(drain(&mut queue), std::vec![NetEvent::Connected]);
    }

    #[test]
    fn rejected_connected_can_be_retried() {
        let mut queue = EventQueue::<1>::new();
        queue.emit(InterfaceEvent { id: ID, event: NetEvent::Disconnected }).unwrap();
        let mut gate = started();

        assert_eq!(
            gate.admit(ID, NetEvent::Connected, &mut queue),
            Err(Error::Io(IoError::QueueFull))
        );
        assert_eq!(gate.state(), InterfaceState::Started);

        queue.clear();
        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();
        assert_eq!(gate.state(), InterfaceState::Connected);
    }

    #[test]
    fn held_ip_survives_a_full_sink() {
        let mut queue = EventQueue::<1>::new();
        let mut gate = started();
        gate.admit(ID, NetEvent::IpAcquired(lease()), &mut queue).unwrap();

        // Connected fits, the held address does not
        assert_eq!(
            gate.admit(ID, NetEvent::Connected, &mut queue),
            Err(Error::Io(IoError::QueueFull))
        );
        assert_eq!(gate.state(), InterfaceState::Connected);
        assert_eq!(gate.pending_ip(), Some(lease()));
        assert_eq!(drain(&mut queue), std::vec![NetEvent::Connected]);

        // Offering Connected again delivers the address
        gate.admit(ID, NetEvent::Connected, &mut queue).unwrap();
        assert_eq!(drain(&mut queue), std::vec![NetEvent::IpAcquired(lease())]);
        assert_eq!(gate.pending_ip(), None);
    }

    #[test]
    fn flush_retries_held_ip() {
        let mut queue = EventQueue::<1>::new();
        let mut gate = started();
        gate.admit(ID, NetEvent::IpAcquired(lease()), &mut queue).unwrap();
        assert!(gate.admit(ID, NetEvent::Connected, &mut queue).is_err());
        queue.clear();

        gate.flush(ID, &mut queue).unwrap();
        assert_eq!(drain(&mut queue), std::vec![NetEvent::IpAcquired(lease())]);

        // Nothing left to deliver
        gate.flush(ID, &mut queue).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn flush_before_link_keeps_ip() {
        let mut queue = EventQueue::<2>::new();
        let mut gate = started();
        gate.admit(ID, NetEvent::IpAcquired(lease()), &mut queue).unwrap();

        gate.flush(ID, &mut queue).unwrap();
        assert!(queue.is_empty());
        assert_eq!(gate.pending_ip(), Some(lease()));
    }
}
