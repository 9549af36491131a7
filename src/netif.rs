//! Interface orchestrator
//!
//! [`Netif`] owns one platform backend and the sink its events go to. It
//! skips disabled interfaces, tags every event with the interface id and
//! routes it through a [`LinkEventGate`] so consumers see a well-ordered
//! stream regardless of how the platform reports changes.
//!
//! # Example
//!
//! ```ignore
//! let mut queue: EventQueue<8> = EventQueue::new();
//! let mut netif = Netif::new(EspBackend::new(mac, ip), &mut queue);
//!
//! netif.bring_up(&Wt32Eth01::eth_config())?;
//! netif.handle_esp_event(EspEventBase::Eth, event_id)?;
//! ```

use crate::backend::{
    EspBackend, EspEventBase, EspEventCode, InterfaceHandle, IpStack, MacDriver, NetifBackend,
};
use crate::config::EthConfig;
use crate::error::{ResolveResult, Result};
use crate::net::{EventSink, InterfaceId, InterfaceState, IpInfo, LinkEventGate, NetEvent};

/// One Ethernet interface bound to a platform backend
#[derive(Debug)]
pub struct Netif<B, S> {
    backend: B,
    sink: S,
    id: InterfaceId,
    gate: LinkEventGate,
    handle: Option<InterfaceHandle>,
}

impl<B: NetifBackend, S: EventSink> Netif<B, S> {
    /// Bind a backend to an event sink
    pub fn new(backend: B, sink: S) -> Self {
        Self {
            backend,
            sink,
            id: InterfaceId::ethernet(0),
            gate: LinkEventGate::new(),
            handle: None,
        }
    }

    /// Bring the interface up
    ///
    /// Returns `Ok(None)` without touching the backend when the
    /// configuration is disabled. On failure the interface stays stopped.
    pub fn bring_up(&mut self, config: &EthConfig<'_>) -> Result<Option<InterfaceHandle>> {
        if !config.enable {
            log::info!("Eth disabled, skipping bring-up");
            return Ok(None);
        }

        let handle = self.backend.bring_up(config)?;
        self.id = handle.id;
        self.handle = Some(handle);
        self.gate.start();
        Ok(Some(handle))
    }

    /// Feed one platform event through the ordering gate
    pub fn handle_event(&mut self, event: NetEvent) -> Result<()> {
        self.gate.admit(self.id, event, &mut self.sink)
    }

    /// Drain backend status changes into the sink
    ///
    /// Returns the number of changes the backend reported. A change the
    /// sink rejects stays with the backend and is offered again on the
    /// next call.
    pub fn poll(&mut self) -> Result<usize> {
        let mut count = 0;
        while let Some(event) = self.backend.poll()? {
            self.gate.admit(self.id, event, &mut self.sink)?;
            self.backend.commit(&event);
            count += 1;
        }
        Ok(count)
    }

    /// Current address of this interface
    pub fn ip_info(&mut self) -> ResolveResult<IpInfo> {
        self.backend.ip_info(self.id.instance)
    }

    /// Mark the interface stopped; later events are dropped
    pub fn stop(&mut self) {
        self.gate.stop();
    }

    /// Lifecycle state
    pub fn state(&self) -> InterfaceState {
        self.gate.state()
    }

    /// Interface id used to tag events
    pub fn id(&self) -> InterfaceId {
        self.id
    }

    /// Handle from the last successful bring-up
    pub fn handle(&self) -> Option<&InterfaceHandle> {
        self.handle.as_ref()
    }

    /// Platform backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable platform backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Event sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable event sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<M: MacDriver, I: IpStack, S: EventSink> Netif<EspBackend<M, I>, S> {
    /// Handle a raw event from the vendor dispatcher
    ///
    /// Ids that do not concern a wired interface are ignored.
    pub fn handle_esp_event(&mut self, base: EspEventBase, id: i32) -> Result<()> {
        let Some(code) = EspEventCode::from_raw(base, id) else {
            return Ok(());
        };

        match code {
            EspEventCode::Start => {
                self.gate.start();
                Ok(())
            }
            EspEventCode::Stop => {
                self.gate.stop();
                Ok(())
            }
            EspEventCode::Connected => self.handle_event(NetEvent::Connected),
            EspEventCode::Disconnected => self.handle_event(NetEvent::Disconnected),
            EspEventCode::GotIp => match self.backend.acquired() {
                Some(info) => self.handle_event(NetEvent::IpAcquired(info)),
                None => {
                    log::warn!("eth{}: got-IP event without an address", self.id.instance);
                    Ok(())
                }
            },
        }
    }
}
