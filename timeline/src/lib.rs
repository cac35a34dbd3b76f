//! Timeline of events with portrait cards
//!
//! Events are laid out along a horizontal line with cards alternating above
//! and below it. Portraits that fail to load fall back to a placeholder.

pub mod equations;
pub mod events;
pub mod layout;
pub mod portrait;
