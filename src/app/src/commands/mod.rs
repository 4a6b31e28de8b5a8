//! Shell operations the core requests besides HTTP and rendering.
//!
//! Each module defines an [`Operation`](crux_core::capability::Operation)
//! and a command builder over it, so handlers return plain
//! [`Command`](crux_core::Command)s.

pub mod centrifugo;
pub mod redirect;
pub mod timer;

pub use centrifugo::{CentrifugoOperation, CentrifugoOutput};
pub use redirect::RedirectOperation;
pub use timer::{TimerId, TimerOperation};
