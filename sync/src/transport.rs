//! Transport seam between the sync adapter and whatever carries envelopes.
//!
//! The adapter is written against the [`Transport`] trait only. Production
//! clients wrap a websocket connection to the relay; tests and single-user
//! demos use [`LocalHub`], an in-memory fan-out with deterministic delivery
//! order and no I/O.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use events::Envelope;

/// Error returned by [`Transport::send`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The connection is closed; the envelope was not delivered.
    #[error("transport is closed")]
    Closed,
}

/// Carries envelopes between session peers.
pub trait Transport {
    /// Deliver an envelope to every other peer in the session.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Closed`] once the transport has been closed.
    fn send(&mut self, envelope: &Envelope) -> Result<(), SyncError>;

    /// Take every envelope delivered to this peer since the last drain, in
    /// arrival order.
    fn drain(&mut self) -> Vec<Envelope>;

    /// Close the connection. Further sends fail; queued envelopes remain
    /// drainable.
    fn close(&mut self);
}

struct HubInner {
    /// One inbox per connected peer, indexed by connection order.
    inboxes: Vec<VecDeque<Envelope>>,
}

/// In-memory session hub. Every transport it hands out delivers to all the
/// others, synchronously and in send order.
#[derive(Clone)]
pub struct LocalHub {
    inner: Rc<RefCell<HubInner>>,
}

impl LocalHub {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Rc::new(RefCell::new(HubInner { inboxes: Vec::new() })) }
    }

    /// Attach a new peer and return its transport.
    #[must_use]
    pub fn connect(&self) -> LocalTransport {
        let mut inner = self.inner.borrow_mut();
        inner.inboxes.push(VecDeque::new());
        LocalTransport {
            inner: Rc::clone(&self.inner),
            index: inner.inboxes.len() - 1,
            closed: false,
        }
    }
}

impl Default for LocalHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One peer's endpoint on a [`LocalHub`].
pub struct LocalTransport {
    inner: Rc<RefCell<HubInner>>,
    index: usize,
    closed: bool,
}

impl Transport for LocalTransport {
    fn send(&mut self, envelope: &Envelope) -> Result<(), SyncError> {
        if self.closed {
            return Err(SyncError::Closed);
        }
        let mut inner = self.inner.borrow_mut();
        for (i, inbox) in inner.inboxes.iter_mut().enumerate() {
            if i != self.index {
                inbox.push_back(envelope.clone());
            }
        }
        Ok(())
    }

    fn drain(&mut self) -> Vec<Envelope> {
        let mut inner = self.inner.borrow_mut();
        inner.inboxes[self.index].drain(..).collect()
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
