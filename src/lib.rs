//! `tycl` is a declarative command line option parser for Rust.
//!
//! Declare the options your program accepts, and `tycl` resolves the command line into a typed value for every option plus the ordered positional arguments.
//! Specifically, `tycl` attempts to prioritize the following design concerns:
//! * *Declarative configuration*:
//! The user describes each option once (name, short alias, field, default, required) and never walks the tokens directly.
//! * *Typed results*:
//! Option values are converted by their field, either via [`std::str::FromStr`] ([`Scalar`]) or a user supplied function ([`Parse`]).
//! * *Conventional syntax*:
//! Long options, short options, short option clusters, inline `=` values, and the `--` end of options marker all behave as they do in common Unix tools.
//! * *Validated up front*:
//! A malformed configuration (ex: a two character short alias) is rejected when the parser is built, never at parse time.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! Which generates the following Cli program:
//! ```console
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer --scale 2 1 2 3
//! Sum: 12
//!
//! $ summer --scale=x 1
//! Parse error: Invalid value 'x' for option 'scale' (expected u32).
//! --scale=x 1
//!         ^
//! ```
//!
//! # Builder Api
//! Configure `tycl` by starting with a [`CommandLineParser`] and `add`ing [`Parameter::option`]s.
//! Each option takes a *field* which specifies the type `T` of its value, and whether it takes a value at all:
//! * [`Switch`]: a `bool` option which takes no value; `true` when referenced, otherwise `false`.
//! * [`Scalar<T>`]: an option which takes precisely one value, converted via [`std::str::FromStr`].
//! * [`Parse<T>`]: an option which takes precisely one value, converted via a user supplied `Fn(&str) -> Option<T>`.
//!
//! Custom fields may be introduced by implementing the traits in the [`prelude`].
//!
//! Once configured, build the parser with [`CommandLineParser::build_parser`] (or [`CommandLineParser::build`]).
//! The built [`GeneralParser`] is reusable: parse any number of token lists via [`GeneralParser::parse_tokens`], or the program arguments via [`GeneralParser::parse`].
//!
//! ```
//! use tycl::{CommandLineParser, Parameter, Parse, Scalar, Switch};
//!
//! let parser = CommandLineParser::new("program")
//!     .add(Parameter::option(Switch::new(), "yes").short("y"))
//!     .add(Parameter::option(Scalar::<String>::new(), "opt2"))
//!     .add(Parameter::option(Parse::new(|s| s.parse::<i32>().ok()), "opt1").default_value(5))
//!     .build_parser()
//!     .unwrap();
//!
//! let result = parser.parse_tokens(&["--opt1", "12", "--opt2=hi", "a", "--", "-y"]).unwrap();
//! assert_eq!(result.value::<i32>("opt1"), Some(&12));
//! assert_eq!(result.value::<String>("opt2"), Some(&"hi".to_string()));
//! assert_eq!(result.value::<bool>("yes"), Some(&false));
//! assert_eq!(result.arguments(), &["a".to_string(), "-y".to_string()]);
//! ```
//!
//! ### Cli Syntax
//! ```console
//! Token            | Meaning
//! -------------------------------------------------------------------------------------
//! --NAME           | reference option NAME; a valued option takes the next token
//! --NAME=VALUE     | reference option NAME with VALUE (split at the first '=')
//! -N               | reference the option with short alias N
//! -N=VALUE         | reference the option with short alias N, with VALUE
//! -ABC             | cluster: A and B must be switches; C may take a value
//! --               | end of options; every later token is positional
//! -                | positional
//! anything else    | positional
//! ```
//!
//! ### Resolution
//! Every declared option is present in the [`ParseResult`], resolved as follows:
//! ```console
//! Field       | Referenced with value    | Referenced without value     | Never referenced
//! ---------------------------------------------------------------------------------------------
//! Switch      | error                    | true                         | default, else false
//! Scalar<T>   | T::from_str(value)       | default, else error          | default, else None
//! Parse<T>    | parse_fn(value)          | default, else error          | default, else None
//! ```
//!
//! A value-bearing option takes the next token verbatim, even when it looks like an option (ex: `--count -5`).
//! When an option is referenced more than once, the final reference wins.
//! A [`Parse`] function returning `None` is final: the default does not step in.
//! A [`Parameter::required`] option that is never referenced is an error.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while matching and materializing options.
pub use tycl_builder::*;
