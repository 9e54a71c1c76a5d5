//! Field role resolution.
//!
//! Records address their fields by opaque identifiers that differ between
//! record system installations. This crate inspects the labels of a small
//! record sample once per run and produces a [`roster_model::FieldMap`].

#![deny(unsafe_code)]

mod resolver;

pub use resolver::{
    FieldResolver, JOIN_TOKEN, MEMBERSHIP_TOKEN, NAME_TOKENS, STATUS_TOKEN, classify_label,
    resolve_fields,
};
