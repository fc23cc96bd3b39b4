//! Server network layer: WebSocket gateway and the authoritative event loop
//!
//! All command handling, clock ticks, and broadcasts execute as discrete
//! turns of one event loop task that exclusively owns the scoreboard state.
//! Connection tasks only translate frames into events and drain outbound
//! queues; they never touch the state, so mutual exclusion is structural and
//! no locks are needed.

use crate::clock::GameClock;
use crate::scoreboard::ScoreboardState;
use crate::sessions::{Session, SessionRegistry, SESSION_CHANNEL_LEN};
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info};
use shared::{Command, ServerMessage};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

/// Production clock period: one decrement per real second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Events sent from connection tasks to the event loop.
#[derive(Debug)]
pub enum GatewayEvent {
    Connected {
        session_id: u32,
        addr: SocketAddr,
        sender: mpsc::Sender<Message>,
    },
    Command {
        session_id: u32,
        command: Command,
    },
    Disconnected {
        session_id: u32,
    },
}

/// The scoreboard server: owns the state, the clock, and the session
/// registry, and runs the event loop that serializes every mutation.
pub struct Server {
    listener: Arc<TcpListener>,
    state: ScoreboardState,
    clock: GameClock,
    registry: SessionRegistry,
    tick_period: Duration,

    events_tx: mpsc::UnboundedSender<GatewayEvent>,
    events_rx: mpsc::UnboundedReceiver<GatewayEvent>,
}

impl Server {
    /// Binds the listener immediately so callers can read the local address
    /// before the event loop starts (ephemeral ports in tests).
    pub async fn new(
        addr: &str,
        tick_period: Duration,
        match_duration_secs: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = Arc::new(TcpListener::bind(addr).await?);
        info!("Server listening on {}", listener.local_addr()?);

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Server {
            listener,
            state: ScoreboardState::new(match_duration_secs),
            clock: GameClock::new(),
            registry: SessionRegistry::new(),
            tick_period,
            events_tx,
            events_rx,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Spawns the accept loop. It owns the session id counter, so ids are
    /// assigned without any shared state.
    fn spawn_listener(&self) -> JoinHandle<()> {
        let listener = Arc::clone(&self.listener);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let mut next_session_id: u32 = 1;

            loop {
                match listener.accept().await {
                    Ok((stream, addr)) => {
                        let session_id = next_session_id;
                        next_session_id += 1;
                        debug!("New connection from {} as session {}", addr, session_id);

                        let events_tx = events_tx.clone();
                        tokio::spawn(async move {
                            if let Err(e) = session_task(stream, addr, session_id, events_tx).await
                            {
                                debug!("Session {} ended: {}", session_id, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Error accepting connection: {}", e);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                }
            }
        })
    }

    /// Main event loop coordinating commands, clock ticks, and broadcasts.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let listener_join = self.spawn_listener();

        info!("Scoreboard server started");

        loop {
            tokio::select! {
                event = self.events_rx.recv() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => break,
                    }
                }

                _ = self.clock.tick() => {
                    self.handle_tick();
                }
            }
        }

        listener_join.abort();
        Ok(())
    }

    fn handle_event(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::Connected {
                session_id,
                addr,
                sender,
            } => {
                self.registry.register(Session {
                    id: session_id,
                    addr,
                    sender,
                });

                // Late joiners get the current state, not a diff history.
                if let Some(message) = self.snapshot_message() {
                    self.registry.send_to(session_id, message);
                }
            }

            GatewayEvent::Command {
                session_id,
                command,
            } => {
                debug!("Session {} issued {:?}", session_id, command);
                self.state.apply(&command);
                self.sync_clock();
                self.broadcast();
            }

            GatewayEvent::Disconnected { session_id } => {
                self.registry.deregister(session_id);
            }
        }
    }

    /// One clock fire. The tick may have been scheduled before a stop was
    /// processed, so liveness is re-verified before any effect is applied.
    fn handle_tick(&mut self) {
        if !self.state.running() || self.state.remaining_seconds() == 0 {
            self.clock.detach();
            self.state.apply(&Command::StopTimer);
            self.broadcast();
            return;
        }

        self.state.tick_second();
        debug!(
            "Tick: {}s remaining, {} observers",
            self.state.remaining_seconds(),
            self.registry.len()
        );
        self.broadcast();
    }

    /// Keeps the clock attachment in lockstep with the running flag. Both
    /// transitions are idempotent, so repeated starts and stops are safe.
    fn sync_clock(&mut self) {
        if self.state.running() {
            self.clock.attach(self.tick_period);
        } else {
            self.clock.detach();
        }
    }

    /// The single publish point: every state change funnels through here as
    /// one full snapshot to every observer.
    fn broadcast(&mut self) {
        if self.registry.is_empty() {
            return;
        }

        if let Some(message) = self.snapshot_message() {
            self.registry.broadcast(&message);
        }
    }

    fn snapshot_message(&self) -> Option<Message> {
        match serde_json::to_string(&ServerMessage::StateSync(self.state.snapshot())) {
            Ok(json) => Some(Message::Text(json)),
            Err(e) => {
                error!("Failed to encode snapshot: {}", e);
                None
            }
        }
    }
}

/// Per-connection task: performs the WebSocket handshake, registers the
/// session, then shuttles frames until either side goes away. Inbound frames
/// that do not parse as commands are logged and dropped; the session stays
/// up.
async fn session_task(
    stream: TcpStream,
    addr: SocketAddr,
    session_id: u32,
    events_tx: mpsc::UnboundedSender<GatewayEvent>,
) -> Result<(), tokio_tungstenite::tungstenite::Error> {
    let websocket = tokio_tungstenite::accept_async(stream).await?;
    let (mut sink, mut stream) = websocket.split();

    let (sender, mut outbound) = mpsc::channel(SESSION_CHANNEL_LEN);

    if events_tx
        .send(GatewayEvent::Connected {
            session_id,
            addr,
            sender,
        })
        .is_err()
    {
        // Event loop already gone; nothing to serve.
        return Ok(());
    }

    loop {
        tokio::select! {
            queued = outbound.recv() => {
                match queued {
                    Some(message) => {
                        if sink.send(message).await.is_err() {
                            break;
                        }
                    }
                    // Deregistered by the event loop.
                    None => break,
                }
            }

            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<Command>(&text) {
                            Ok(command) => {
                                if events_tx
                                    .send(GatewayEvent::Command { session_id, command })
                                    .is_err()
                                {
                                    break;
                                }
                            }
                            Err(e) => {
                                debug!(
                                    "Dropping malformed command from session {}: {}",
                                    session_id, e
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // Binary, ping and pong frames carry no commands.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("Session {} transport error: {}", session_id, e);
                        break;
                    }
                }
            }
        }
    }

    let _ = events_tx.send(GatewayEvent::Disconnected { session_id });
    Ok(())
}
