use stockroom_core::{ItemId, SessionId};
use stockroom_infra::{InMemorySessionStore, SessionSeed, SessionState, SessionStore};
use stockroom_inventory::{DeleteReport, Item, InventoryError, NewItem, Notice, RemovedItem, Selection};

use crate::view::{self, Page};

/// Operations the route handlers perform against a session's inventory.
///
/// Each method takes the session lock once, so a single interaction is
/// applied atomically.
#[derive(Debug)]
pub struct AppServices<S = InMemorySessionStore> {
    sessions: S,
}

impl AppServices<InMemorySessionStore> {
    pub fn in_memory(seed: SessionSeed) -> Self {
        Self::new(InMemorySessionStore::new(seed))
    }
}

impl<S: SessionStore> AppServices<S> {
    pub fn new(sessions: S) -> Self {
        Self { sessions }
    }

    /// Whether a client-supplied session id names a live session.
    pub fn has_session(&self, session_id: SessionId) -> bool {
        self.sessions.contains(session_id)
    }

    pub fn live_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Recompute the page from current state, consuming pending notices.
    pub fn page(&self, session_id: SessionId) -> Page {
        self.sessions.with_session(session_id, |s| {
            let notices = s.take_flash();
            view::render(&s.inventory, &notices)
        })
    }

    /// Snapshot of the items with their current positions.
    pub fn list(&self, session_id: SessionId) -> Vec<Item> {
        self.sessions
            .with_session(session_id, |s| s.inventory.items().to_vec())
    }

    /// Add an item and return it with its position.
    pub fn add_item(
        &self,
        session_id: SessionId,
        input: &NewItem,
    ) -> Result<(usize, Item), InventoryError> {
        self.sessions.with_session(session_id, |s| add(s, input))
    }

    /// Like [`AppServices::add_item`], recording the outcome as a flash notice.
    pub fn submit_add(
        &self,
        session_id: SessionId,
        input: &NewItem,
    ) -> Result<(usize, Item), InventoryError> {
        self.sessions.with_session(session_id, |s| {
            let result = add(s, input);
            let notice = match &result {
                Ok((_, item)) => Notice::added(item.name()),
                Err(e) => Notice::from(e),
            };
            s.flash.push(notice);
            result
        })
    }

    /// Apply a delete batch; also returns how many items remain.
    pub fn delete(&self, session_id: SessionId, selections: &[Selection]) -> (DeleteReport, usize) {
        self.sessions.with_session(session_id, |s| {
            let report = s.inventory.delete(selections);
            (report, s.inventory.len())
        })
    }

    /// Like [`AppServices::delete`], recording one flash notice per outcome.
    ///
    /// `malformed` counts selections that could not even be parsed; each
    /// gets the same error as an unknown row.
    pub fn submit_delete(
        &self,
        session_id: SessionId,
        selections: &[Selection],
        malformed: usize,
    ) -> DeleteReport {
        self.sessions.with_session(session_id, |s| {
            let report = s.inventory.delete(selections);
            s.flash
                .extend((0..malformed).map(|_| Notice::from(&InventoryError::InvalidIndex)));
            s.flash.extend(report.notices());
            report
        })
    }

    /// Remove one item; the result carries the position it held.
    pub fn remove(&self, session_id: SessionId, item_id: ItemId) -> Option<RemovedItem> {
        self.sessions
            .with_session(session_id, |s| s.inventory.remove(item_id))
    }

    /// Explicit teardown of a session's state.
    pub fn close(&self, session_id: SessionId) -> bool {
        self.sessions.close(session_id)
    }
}

fn add(state: &mut SessionState, input: &NewItem) -> Result<(usize, Item), InventoryError> {
    let item = state.inventory.add(input)?.clone();
    Ok((state.inventory.len() - 1, item))
}
