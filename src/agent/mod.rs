//! AI-player wrapper around the UCT search.
//!
//! `UctAgent` follows the usual host lifecycle: `init_ai` when seated,
//! `select_action` once per turn, `close_ai` when the match ends.

mod uct;

pub use uct::UctAgent;
