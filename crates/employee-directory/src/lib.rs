//! Employee directory core.
//!
//! Reads weakly typed employee list items from a record source, reconciles
//! them into one canonical [`domain::Employee`] shape and derives what a
//! roster view needs: display name, initials, avatar colour and search
//! matches.

pub mod config;
pub mod domain;
pub mod outbound;
