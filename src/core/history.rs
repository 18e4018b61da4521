use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use reqwest::Url;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel};

use crate::prelude::*;

type Listeners = RefCell<BTreeMap<u64, UnboundedSender<Url>>>;

/// Navigable address history.
///
/// Pushing does not notify anyone, moving back or forward notifies all the subscriptions.
pub struct History {
    entries: Vec<Url>,
    cursor: usize,
    listeners: Rc<Listeners>,
    next_listener_id: u64,
}

impl History {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            listeners: Rc::default(),
            next_listener_id: 0,
        }
    }

    pub fn current(&self) -> &Url {
        &self.entries[self.cursor]
    }

    /// Add a new entry after the current one, dropping the forward entries.
    ///
    /// Pushing the current address again is a no-op.
    pub fn push(&mut self, address: Url) {
        if *self.current() == address {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(address);
        self.cursor += 1;
        debug!(address = %self.current(), n_entries = self.entries.len(), "pushed");
    }

    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.notify();
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        self.notify();
        true
    }

    /// Start listening for back and forward navigation.
    pub fn subscribe(&mut self) -> Subscription {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        let (sender, receiver) = unbounded_channel();
        self.listeners.borrow_mut().insert(id, sender);
        Subscription { id, receiver, listeners: Rc::downgrade(&self.listeners) }
    }

    #[cfg(test)]
    pub fn n_entries(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn n_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        let address = self.current();
        debug!(%address, "navigated");
        for sender in self.listeners.borrow().values() {
            // Subscriptions unregister before their receivers close:
            let _ = sender.send(address.clone());
        }
    }
}

/// Listener handle, unregisters itself when dropped.
#[must_use]
pub struct Subscription {
    id: u64,
    receiver: UnboundedReceiver<Url>,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Next address navigated to, if any is pending.
    pub fn try_next(&mut self) -> Option<Url> {
        match self.receiver.try_recv() {
            Ok(address) => Some(address),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(&self.id);
        }
    }
}
