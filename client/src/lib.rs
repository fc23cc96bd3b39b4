//! # Scoreboard Client Library
//!
//! Terminal observer for the shared live scoreboard. The client never owns
//! any scoreboard state of its own: it renders whatever full snapshot the
//! server last broadcast, so every connected terminal shows the same thing
//! regardless of when it joined.
//!
//! Two modes share one connection type:
//!
//! - **Viewer** — passively follows the snapshot stream and prints one
//!   status line per update.
//! - **Operator** — additionally reads console commands from stdin and
//!   translates them into protocol commands (scores, clock, team names).
//!
//! ## Module Organization
//!
//! - [`network`] — the WebSocket connection: inbound snapshot stream and
//!   outbound command sink.
//! - [`input`] — parsing of operator console lines into actions.
//! - [`view`] — text rendering of snapshots (MM:SS clock, status line).
//! - [`history`] — REST client for the match-history store; used by the
//!   operator's `finish` action, entirely outside the live state machine.

pub mod history;
pub mod input;
pub mod network;
pub mod view;
