//! Interface events and the dispatcher abstraction
//!
//! The vendor framework reports two event categories: link lifecycle
//! ([`EthEvent`]) and IP lifecycle ([`IpEvent`]). Anything that wants them
//! implements [`EventHandler`] and is subscribed per [`EventCategory`].
//!
//! [`EventDispatcher`] is a fixed-capacity registry that platform
//! implementations embed to fan events out to subscribed handlers:
//!
//! ```ignore
//! static STATE: ConnectionState = ConnectionState::new();
//!
//! let mut dispatcher: EventDispatcher<2> = EventDispatcher::new();
//! dispatcher.register(EventCategory::Link, &STATE)?;
//! dispatcher.register(EventCategory::Ip, &STATE)?;
//!
//! // From the vendor callback:
//! dispatcher.dispatch(&Event::Link(EthEvent::Disconnected));
//! ```

use crate::addr::{IpInfo, MacAddress};
use crate::error::DispatchError;

/// Event category a handler subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventCategory {
    /// Link lifecycle: started, stopped, link-up, link-down
    Link,
    /// IP lifecycle: address acquired or lost
    Ip,
}

/// Link lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EthEvent {
    /// Driver state machine started
    Started,
    /// Driver state machine stopped
    Stopped,
    /// Link up; carries the hardware address reported by the driver
    Connected {
        /// Hardware address read from the driver at link-up
        mac: MacAddress,
    },
    /// Link down
    Disconnected,
}

/// IP lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IpEvent {
    /// Address acquired (DHCP lease or static assignment)
    GotIp(IpInfo),
    /// Address lost (lease expired or interface deconfigured)
    LostIp,
}

/// Any interface event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Link lifecycle event
    Link(EthEvent),
    /// IP lifecycle event
    Ip(IpEvent),
}

impl Event {
    /// Category the event is delivered under
    pub const fn category(&self) -> EventCategory {
        match self {
            Event::Link(_) => EventCategory::Link,
            Event::Ip(_) => EventCategory::Ip,
        }
    }
}

impl From<EthEvent> for Event {
    fn from(event: EthEvent) -> Self {
        Event::Link(event)
    }
}

impl From<IpEvent> for Event {
    fn from(event: IpEvent) -> Self {
        Event::Ip(event)
    }
}

/// Receiver of interface events.
///
/// Called from the platform's event-dispatch context, which may be another
/// task, core or an interrupt, hence the `Sync` bound.
pub trait EventHandler: Sync {
    /// Handle one event
    fn notify(&self, event: &Event);
}

/// Handler reference as stored by dispatchers
pub type HandlerRef = &'static dyn EventHandler;

// =============================================================================
// Dispatcher
// =============================================================================

/// Fixed-capacity event registry.
///
/// Holds up to `N` `(category, handler)` subscriptions and delivers each event
/// to the handlers subscribed to its category, in registration order.
pub struct EventDispatcher<const N: usize> {
    slots: [Option<(EventCategory, HandlerRef)>; N],
}

impl<const N: usize> EventDispatcher<N> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Subscribe `handler` to `category`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Full`] if all `N` slots are taken.
    pub fn register(
        &mut self,
        category: EventCategory,
        handler: HandlerRef,
    ) -> Result<(), DispatchError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(DispatchError::Full)?;
        *slot = Some((category, handler));
        Ok(())
    }

    /// Remove the subscription of `handler` to `category`.
    ///
    /// Returns `false` if no such subscription exists.
    pub fn unregister(&mut self, category: EventCategory, handler: HandlerRef) -> bool {
        let found = self.slots.iter_mut().find(|slot| {
            matches!(slot, Some((c, h)) if *c == category && same_handler(*h, handler))
        });
        match found {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every handler subscribed to its category.
    ///
    /// Returns the number of handlers notified.
    pub fn dispatch(&self, event: &Event) -> usize {
        let category = event.category();
        let mut delivered = 0;
        for (c, handler) in self.slots.iter().flatten() {
            if *c == category {
                handler.notify(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of active subscriptions
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True if nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of subscriptions for `category`
    pub fn subscribed(&self, category: EventCategory) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|(c, _)| *c == category)
            .count()
    }
}

impl<const N: usize> Default for EventDispatcher<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn same_handler(a: HandlerRef, b: HandlerRef) -> bool {
    core::ptr::addr_eq(a as *const dyn EventHandler, b as *const dyn EventHandler)
}
