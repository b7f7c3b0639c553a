//! Typed representations of authorization headers.

pub mod authorization;
