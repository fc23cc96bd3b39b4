//! # Scoreboard Server Library
//!
//! This library implements the authoritative half of the shared live
//! scoreboard: one server process owns the timer, the scores, and the team
//! names, applies operator commands to them, and keeps every connected
//! observer consistent by broadcasting a full state snapshot after each
//! change.
//!
//! ## Architecture
//!
//! ### Single-Threaded Event Loop
//! Every mutation — an operator command or a clock tick — executes as one
//! complete, non-preemptible turn of a single event loop task that
//! exclusively owns the state. Connection tasks translate WebSocket frames
//! into events and drain per-session outbound queues; they never read or
//! write the state directly. Mutual exclusion is structural, so there are no
//! locks around the scoreboard.
//!
//! ### Broadcast Synchronization
//! There are no delta updates. Each turn ends with the complete post-mutation
//! snapshot pushed to every registered session, and a newly connected
//! observer is sent the current snapshot before anything else, so late
//! joiners and long-time watchers always converge on the same state.
//!
//! ## Module Organization
//!
//! - [`scoreboard`] — the single mutable record and the command processor,
//!   one handler per command kind, with clamp-at-zero no-op semantics for
//!   out-of-range mutations.
//! - [`clock`] — the match clock as an explicit attached/detached state, at
//!   most one interval per state, idempotent in both directions.
//! - [`sessions`] — observer registry and snapshot delivery; per-session
//!   bounded queues preserve per-observer ordering and isolate slow readers.
//! - [`network`] — the WebSocket gateway and the event loop that ties the
//!   other three together.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::{Server, TICK_PERIOD};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Bind the scoreboard server with a 7-minute match clock.
//!     let mut server = Server::new("127.0.0.1:8080", TICK_PERIOD, 420).await?;
//!
//!     // Runs the event loop: accepts observers, replays the current state
//!     // to each on connect, applies commands, ticks the clock while it is
//!     // attached, and broadcasts a full snapshot after every change.
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod network;
pub mod scoreboard;
pub mod sessions;
