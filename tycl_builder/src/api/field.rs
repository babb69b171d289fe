use std::marker::PhantomData;
use std::str::FromStr;

use crate::api::capture::*;
use crate::model::OptionKind;

/// A presence-only option parameter, which is `true` when referenced and `false` otherwise.
///
/// ### Example
/// ```
/// # use tycl_builder as tycl;
/// use tycl::{CommandLineParser, Parameter, Switch};
///
/// let parser = CommandLineParser::new("program")
///     .add(Parameter::option(Switch::new(), "verbose").short("v"))
///     .build_parser()
///     .unwrap();
/// let result = parser.parse_tokens(&["-v"]).unwrap();
/// assert_eq!(result.value::<bool>("verbose"), Some(&true));
/// ```
#[derive(Debug, Default)]
pub struct Switch {}

impl Switch {
    /// Create a switch parameter.
    pub fn new() -> Self {
        Self {}
    }
}

impl<'a> GenericCapturable<'a, bool> for Switch {
    fn matched(&self) -> Option<bool> {
        Some(true)
    }

    fn capture(&self, _token: &str) -> Result<Option<bool>, InvalidCapture> {
        unreachable!("internal error - must not capture on a Switch");
    }

    fn initial(&self) -> Option<bool> {
        Some(false)
    }

    fn kind(&self) -> OptionKind {
        OptionKind::Switch
    }
}

/// A value-bearing option parameter, converted via [`FromStr`].
///
/// ### Example
/// ```
/// # use tycl_builder as tycl;
/// use tycl::{CommandLineParser, Parameter, Scalar};
///
/// let parser = CommandLineParser::new("program")
///     .add(Parameter::option(Scalar::<u32>::new(), "port"))
///     .build_parser()
///     .unwrap();
/// let result = parser.parse_tokens(&["--port=8080"]).unwrap();
/// assert_eq!(result.value::<u32>("port"), Some(&8080));
/// ```
#[derive(Debug)]
pub struct Scalar<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Scalar<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scalar<T> {
    /// Create a scalar parameter.
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Scalar<T>
where
    T: FromStr,
{
    fn matched(&self) -> Option<T> {
        None
    }

    fn capture(&self, token: &str) -> Result<Option<T>, InvalidCapture> {
        T::from_str(token)
            .map(Some)
            .map_err(|_| InvalidCapture::InvalidConversion {
                token: token.to_string(),
                type_name: std::any::type_name::<T>(),
            })
    }

    fn kind(&self) -> OptionKind {
        OptionKind::Valued
    }
}

/// A value-bearing option parameter, converted via a user supplied function.
///
/// The function produces `None` to declare the option has no value.
/// This is not an error, and the option's default does *not* step in.
///
/// ### Example
/// ```
/// # use tycl_builder as tycl;
/// use tycl::{CommandLineParser, Parameter, Parse};
///
/// let parser = CommandLineParser::new("program")
///     .add(Parameter::option(Parse::new(|s| s.parse::<i32>().ok()), "level").default_value(5))
///     .build_parser()
///     .unwrap();
/// let result = parser.parse_tokens(&["--level", "x"]).unwrap();
/// assert_eq!(result.value::<i32>("level"), None);
/// ```
pub struct Parse<'a, T> {
    parse_fn: Box<dyn Fn(&str) -> Option<T> + 'a>,
}

impl<'a, T> Parse<'a, T> {
    /// Create a parse parameter.
    pub fn new(parse_fn: impl Fn(&str) -> Option<T> + 'a) -> Self {
        Self {
            parse_fn: Box::new(parse_fn),
        }
    }
}

impl<'a, T> std::fmt::Debug for Parse<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse[{t}]", t = std::any::type_name::<T>())
    }
}

impl<'a, T> GenericCapturable<'a, T> for Parse<'a, T> {
    fn matched(&self) -> Option<T> {
        None
    }

    fn capture(&self, token: &str) -> Result<Option<T>, InvalidCapture> {
        Ok((self.parse_fn)(token))
    }

    fn kind(&self) -> OptionKind {
        OptionKind::Valued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn switch() {
        let switch = Switch::new();
        assert_eq!(switch.matched(), Some(true));
        assert_eq!(switch.initial(), Some(false));
        assert_eq!(switch.kind(), OptionKind::Switch);
    }

    #[test]
    #[should_panic]
    fn switch_capture() {
        let switch = Switch::new();
        let _ = switch.capture("5");
    }

    #[rstest]
    #[case("0", 0)]
    #[case("17", 17)]
    #[case("-3", -3)]
    fn scalar_capture(#[case] token: &str, #[case] expected: i32) {
        let scalar: Scalar<i32> = Scalar::new();
        assert_eq!(scalar.capture(token).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("x")]
    #[case("1.5")]
    fn scalar_capture_invalid(#[case] token: &str) {
        let scalar: Scalar<i32> = Scalar::new();
        assert_eq!(
            scalar.capture(token).unwrap_err(),
            InvalidCapture::InvalidConversion {
                token: token.to_string(),
                type_name: "i32",
            }
        );
    }

    #[test]
    fn scalar_string() {
        let scalar: Scalar<String> = Scalar::new();
        assert_eq!(scalar.capture("").unwrap(), Some("".to_string()));
        assert_eq!(scalar.capture("a b").unwrap(), Some("a b".to_string()));
        assert_eq!(scalar.matched(), None);
        assert_eq!(scalar.initial(), None);
        assert_eq!(scalar.kind(), OptionKind::Valued);
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("42", Some(42))]
    #[case("a", None)]
    #[case("", None)]
    fn parse_capture(#[case] token: &str, #[case] expected: Option<u8>) {
        let parse = Parse::new(|s| s.parse::<u8>().ok());
        assert_eq!(parse.capture(token).unwrap(), expected);
        assert_eq!(parse.matched(), None);
        assert_eq!(parse.initial(), None);
        assert_eq!(parse.kind(), OptionKind::Valued);
    }

    #[test]
    fn parse_borrows() {
        let suffix = String::from("!");
        let parse = Parse::new(|s| Some(format!("{s}{suffix}")));
        assert_eq!(parse.capture("hi").unwrap(), Some("hi!".to_string()));
    }
}
