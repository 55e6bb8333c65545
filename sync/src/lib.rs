//! Client-side sync: transport seam, session roster, and the adapter that
//! bridges a [`scene::engine::SceneEngine`] onto the event wire.
//!
//! The engine itself never talks to a socket. Local mutations produce
//! [`scene::engine::Action`] values which the adapter publishes; inbound
//! envelopes are pumped back through the engine's `apply_remote_*` methods,
//! so a peer edit and a local edit take the identical code path.

pub mod adapter;
pub mod roster;
pub mod transport;

pub use adapter::SyncAdapter;
pub use roster::Roster;
pub use transport::{LocalHub, LocalTransport, SyncError, Transport};
