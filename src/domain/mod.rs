//! Domain layer: the records the rest of the crate is built around.

pub mod entities;
