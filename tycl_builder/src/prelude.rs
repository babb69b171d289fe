//! Traits which, typically, may be imported without concern: `use tycl::prelude::*`.
//!
//! Import these in order to implement a custom field.
//!
//! ### Example
//! ```
//! # use tycl_builder as tycl;
//! use tycl::prelude::*;
//! use tycl::{CommandLineParser, Parameter};
//!
//! // A field which captures a comma separated list.
//! struct Csv {}
//!
//! impl<'a> GenericCapturable<'a, Vec<String>> for Csv {
//!     fn matched(&self) -> Option<Vec<String>> {
//!         None
//!     }
//!
//!     fn capture(&self, token: &str) -> Result<Option<Vec<String>>, InvalidCapture> {
//!         Ok(Some(token.split(',').map(|s| s.to_string()).collect()))
//!     }
//!
//!     fn kind(&self) -> OptionKind {
//!         OptionKind::Valued
//!     }
//! }
//!
//! let parser = CommandLineParser::new("program")
//!     .add(Parameter::option(Csv {}, "items"))
//!     .build_parser()
//!     .unwrap();
//! let result = parser.parse_tokens(&["--items=a,b"]).unwrap();
//! assert_eq!(result.value::<Vec<String>>("items"), Some(&vec!["a".to_string(), "b".to_string()]));
//! ```

pub use crate::api::{GenericCapturable, InvalidCapture};
pub use crate::model::OptionKind;
