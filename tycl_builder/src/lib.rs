//! Builder module for `tycl`.
//! See the `tycl` crate root for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{ConfigError, GeneralParser, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
