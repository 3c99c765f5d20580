//! Presence-based workstation auto-lock.
//!
//! Watches a camera feed for a human face and fires an external lock
//! command after a configurable stretch of sustained absence. The heart of
//! the crate is [`monitor::presence_monitor::PresenceMonitor`], a debounce
//! state machine fed one detection result per poll tick, and
//! [`monitor::session_controller::SessionController`], which owns the
//! capture resource for exactly the lifetime of a session.

pub mod capture;
pub mod detection;
pub mod lock;
pub mod monitor;
pub mod shared;
