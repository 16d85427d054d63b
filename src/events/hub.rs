//! Event stream hub.
//!
//! The hub owns the set of live player connections and the primary
//! designation. All of it sits behind one mutex: connect, disconnect and
//! broadcast each take the lock once, so a broadcast is applied to the
//! canonical [`PlayerStateOwner`] and queued on every connection in the same
//! critical section. Two broadcasts can therefore never reach two
//! connections in different orders.
//!
//! The primary's own reports of its state only replace the canonical state
//! when no broadcast has been issued since the report was requested (or
//! since the canonical state was last known to match the primary). A report
//! that may predate a broadcast is returned to its caller but never written
//! back, so an event already applied cannot be undone by a stale snapshot.
//!
//! Outbound frames are serialized once and shared between connections as
//! `Arc<str>`. Each connection drains its own bounded queue; a full queue
//! drops the frame for that connection only.

use crate::error::HubError;
use crate::metrics;
use crate::player::PlayerStateOwner;
use jukebox_proto::{ClientFrame, EventData, PlayerState, ServerFrame};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Identifier of one event stream connection. Assigned in connect order.
pub type ConnectionId = u64;

/// A serialized server frame, shared between connection queues.
pub type OutboundFrame = Arc<str>;

/// What a freshly connected client gets back from [`Hub::connect`].
#[derive(Debug)]
pub struct Registration {
    pub id: ConnectionId,
    /// Whether this connection was made primary on arrival.
    pub primary: bool,
    pub outbound: mpsc::Receiver<OutboundFrame>,
}

struct PendingRequest {
    conn_id: ConnectionId,
    /// Broadcast sequence number when the request was queued.
    issued_at: u64,
    reply: oneshot::Sender<PlayerState>,
}

#[derive(Default)]
struct HubState {
    connections: BTreeMap<ConnectionId, mpsc::Sender<OutboundFrame>>,
    primary: Option<ConnectionId>,
    pending: HashMap<u64, PendingRequest>,
    /// Bumped by every successful broadcast.
    broadcast_seq: u64,
    /// Sequence at which the canonical state last matched the primary.
    synced_seq: Option<u64>,
}

impl HubState {
    fn in_sync(&self) -> bool {
        self.synced_seq == Some(self.broadcast_seq)
    }
}

pub struct Hub {
    state: Mutex<HubState>,
    next_conn_id: AtomicU64,
    next_ack: AtomicU64,
    owner: Arc<PlayerStateOwner>,
    outbound_queue: usize,
    state_request_timeout: Duration,
}

impl Hub {
    pub fn new(
        owner: Arc<PlayerStateOwner>,
        outbound_queue: usize,
        state_request_timeout: Duration,
    ) -> Self {
        Self {
            state: Mutex::new(HubState::default()),
            next_conn_id: AtomicU64::new(1),
            next_ack: AtomicU64::new(1),
            owner,
            outbound_queue: outbound_queue.max(1),
            state_request_timeout,
        }
    }

    pub fn owner(&self) -> &Arc<PlayerStateOwner> {
        &self.owner
    }

    /// Default deadline for [`Hub::request_state`].
    pub fn state_request_timeout(&self) -> Duration {
        self.state_request_timeout
    }

    /// Add a connection to the live set. It becomes primary if there is none.
    pub fn connect(&self) -> Registration {
        let id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.outbound_queue);

        let (primary, count) = {
            let mut state = self.state.lock();
            state.connections.insert(id, tx);
            let primary = state.primary.is_none();
            if primary {
                // Nothing has been sent to a brand new connection yet.
                state.primary = Some(id);
                state.synced_seq = Some(state.broadcast_seq);
            }
            (primary, state.connections.len())
        };

        metrics::set_connected_clients(count);
        info!(conn_id = id, primary, connections = count, "Player connected");

        Registration {
            id,
            primary,
            outbound: rx,
        }
    }

    /// Remove a connection. If it was primary, the oldest remaining
    /// connection takes over. Requests pending on it fail with
    /// [`HubError::Disconnected`].
    pub fn disconnect(&self, id: ConnectionId) {
        let (new_primary, count, was_present) = {
            let mut state = self.state.lock();
            let was_present = state.connections.remove(&id).is_some();
            let mut new_primary = None;
            if state.primary == Some(id) {
                state.primary = state.connections.keys().next().copied();
                // The new primary may still have broadcasts in flight.
                state.synced_seq = None;
                new_primary = state.primary;
            }
            // Dropping the reply senders wakes the waiters.
            state.pending.retain(|_, pending| pending.conn_id != id);
            (new_primary, state.connections.len(), was_present)
        };

        if !was_present {
            return;
        }

        metrics::set_connected_clients(count);
        info!(conn_id = id, connections = count, "Player disconnected");
        if let Some(primary) = new_primary {
            info!(conn_id = primary, "Primary role reassigned");
        }
    }

    pub fn primary(&self) -> Option<ConnectionId> {
        self.state.lock().primary
    }

    pub fn connection_count(&self) -> usize {
        self.state.lock().connections.len()
    }

    /// Deliver `event` to every live connection and apply it to the
    /// canonical state. Returns how many connections accepted the frame.
    ///
    /// Fails with [`HubError::NoPrimary`] when nobody is connected; in that
    /// case the canonical state is left untouched.
    pub fn broadcast(&self, event: EventData) -> Result<usize, HubError> {
        let frame = encode(&ServerFrame::event(event.clone()))?;

        let mut state = self.state.lock();
        if state.primary.is_none() {
            return Err(HubError::NoPrimary);
        }

        self.owner.apply_event(&event);
        state.broadcast_seq += 1;

        let mut delivered = 0;
        for (conn_id, tx) in &state.connections {
            if push(*conn_id, tx, &frame) {
                delivered += 1;
            }
        }
        drop(state);

        metrics::record_broadcast(event.tag());
        debug!(event = event.tag(), delivered, "Event broadcast");
        Ok(delivered)
    }

    /// Deliver `event` to one connection only, without touching canonical state.
    pub fn send_to(&self, id: ConnectionId, event: EventData) -> Result<(), HubError> {
        let frame = encode(&ServerFrame::event(event))?;
        let state = self.state.lock();
        match state.connections.get(&id) {
            Some(tx) if push(id, tx, &frame) => Ok(()),
            _ => Err(HubError::Disconnected),
        }
    }

    /// Ask the primary connection for its player state.
    ///
    /// Fails immediately with [`HubError::NoPrimary`] when there is no
    /// primary, with [`HubError::Timeout`] when no answer arrives within
    /// `timeout`, and with [`HubError::Disconnected`] when the primary goes
    /// away first. The answer replaces the canonical state only if no
    /// broadcast was issued while the request was outstanding.
    pub async fn request_state(&self, timeout: Duration) -> Result<PlayerState, HubError> {
        let ack = self.next_ack.fetch_add(1, Ordering::Relaxed);
        let frame = encode(&ServerFrame::request(EventData::PlayerStateRequest, ack))?;
        let (reply, answer) = oneshot::channel();

        let primary = {
            let mut state = self.state.lock();
            let primary = state.primary.ok_or(HubError::NoPrimary)?;
            let tx = state
                .connections
                .get(&primary)
                .ok_or(HubError::NoPrimary)?
                .clone();
            if !push(primary, &tx, &frame) {
                return Err(HubError::Disconnected);
            }
            let issued_at = state.broadcast_seq;
            state.pending.insert(
                ack,
                PendingRequest {
                    conn_id: primary,
                    issued_at,
                    reply,
                },
            );
            primary
        };

        match tokio::time::timeout(timeout, answer).await {
            Ok(Ok(player_state)) => Ok(player_state),
            Ok(Err(_)) => {
                debug!(conn_id = primary, ack, "Primary left before answering");
                Err(HubError::Disconnected)
            }
            Err(_) => {
                self.state.lock().pending.remove(&ack);
                warn!(conn_id = primary, ack, ?timeout, "State request timed out");
                Err(HubError::Timeout)
            }
        }
    }

    /// Complete a pending state request. Answers from a connection other
    /// than the one asked, or for unknown acks, are ignored.
    pub fn resolve_ack(&self, id: ConnectionId, ack: u64, player_state: PlayerState) -> bool {
        let pending = {
            let mut state = self.state.lock();
            let asked = state.pending.get(&ack).is_some_and(|p| p.conn_id == id);
            let pending = if asked { state.pending.remove(&ack) } else { None };
            if let Some(pending) = &pending {
                if pending.issued_at == state.broadcast_seq {
                    self.owner.replace(player_state.clone());
                    state.synced_seq = Some(state.broadcast_seq);
                } else {
                    debug!(
                        conn_id = id,
                        ack,
                        missed = state.broadcast_seq - pending.issued_at,
                        "State answer predates a broadcast, keeping canonical state"
                    );
                }
            }
            pending
        };

        match pending {
            Some(pending) => pending.reply.send(player_state).is_ok(),
            None => {
                debug!(conn_id = id, ack, "Ignoring unexpected ack");
                false
            }
        }
    }

    /// Handle one frame received from a connection.
    pub fn handle_client_frame(&self, id: ConnectionId, frame: ClientFrame) {
        match frame {
            ClientFrame::Ack { ack, state } => {
                self.resolve_ack(id, ack, state);
            }
            ClientFrame::Events {
                data: EventData::PlayerStateUpdate { state },
            } => {
                let hub = self.state.lock();
                if hub.primary != Some(id) {
                    debug!(conn_id = id, "Ignoring state update from non-primary");
                } else if hub.in_sync() {
                    self.owner.replace(state);
                } else {
                    debug!(conn_id = id, "Ignoring state update that may predate a broadcast");
                }
            }
            ClientFrame::Events { data } => {
                debug!(conn_id = id, event = data.tag(), "Ignoring client event");
            }
        }
    }
}

fn encode(frame: &ServerFrame) -> Result<OutboundFrame, HubError> {
    frame
        .to_text()
        .map(Arc::from)
        .map_err(|e| HubError::Encode(e.to_string()))
}

fn push(conn_id: ConnectionId, tx: &mpsc::Sender<OutboundFrame>, frame: &OutboundFrame) -> bool {
    match tx.try_send(Arc::clone(frame)) {
        Ok(()) => true,
        Err(mpsc::error::TrySendError::Full(_)) => {
            warn!(conn_id, "Outbound queue full, dropping frame");
            metrics::record_frame_dropped();
            false
        }
        // The connection task is shutting down and will disconnect itself.
        Err(mpsc::error::TrySendError::Closed(_)) => false,
    }
}
