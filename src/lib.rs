//! Wait until PostgreSQL databases accept connections, then report their
//! version and size.
//!
//! The reusable piece is [`probe::Prober`]: it polls any
//! [`probe::LivenessCheck`] at a fixed rate until it succeeds or a deadline
//! elapses, on an injectable [`clock::Clock`].

pub mod cli;
pub mod clock;
pub mod error;
pub mod metadata;
pub mod probe;
pub mod report;
pub mod target;
pub mod tls;

pub use error::Error;
