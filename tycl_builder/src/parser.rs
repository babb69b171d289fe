mod base;
mod interface;
mod middleware;

pub(crate) use self::base::*;
pub use self::base::{ConfigError, ParseError};
pub(crate) use self::interface::*;
pub use self::middleware::GeneralParser;
