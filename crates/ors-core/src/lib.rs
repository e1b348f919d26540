// File: `crates/ors-core/src/lib.rs`
pub mod id;
pub mod index;
pub mod overlay;
pub mod record;
pub mod slice;
pub mod state;

#[cfg(test)]
mod sample;
