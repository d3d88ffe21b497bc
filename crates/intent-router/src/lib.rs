//! intent-router: intent validation and dispatch
//!
//! Receives what the language service produced for one operator utterance,
//! validates navigation intents into a closed [`Command`] set, runs them
//! through the dispatch loop, and maps results and errors to response text.

mod error;
pub use error::{Result, RouterError};

mod intent;
pub use intent::Command;

mod router;
pub use router::IntentRouter;
