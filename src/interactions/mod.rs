//! Helpers for answering application command interactions.
//!
//! Command handlers only produce reply text; delivering it (chunking, follow-ups,
//! the generic failure reply) lives here.

pub mod util;
