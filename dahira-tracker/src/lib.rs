//! Membership dues tracker for a Dahira association.
//!
//! The `backend` module holds everything but the user interface; the
//! serializable types shared with a presentation layer live in the
//! `shared` crate.

pub mod backend;
