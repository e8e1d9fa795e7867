//! Feature slices
//!
//! Each slice owns one vertical of domain state, reduces the actions it cares
//! about and exposes the operations (thunks) that talk to the backend.

pub mod auth;
pub mod tasks;
pub mod todolists;
