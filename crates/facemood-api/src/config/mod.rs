//! Config module

mod constants;
mod env;

pub use constants::{
  DEFAULT_BIND_ADDR, DEFAULT_LOG_FILTER, DEFAULT_VARIANT, GENERIC_INTERNAL_MESSAGE,
  MULTIPART_OVERHEAD_BYTES,
};
pub use env::{Config, Variant};
