use std::any::Any;
use std::collections::HashMap;

/// Whether an option takes a value on the Cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// `--NAME`: No value; presence alone sets the option.
    Switch,
    /// `--NAME VALUE` or `--NAME=VALUE`: Precisely one value.
    Valued,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The outcome of a successful parse: a value (or no value) for every declared option, plus the positional arguments.
///
/// Option values are retrieved by their long name and type.
/// The type must be precisely the `T` of the option's field.
///
/// ### Example
/// ```
/// # use tycl_builder as tycl;
/// use tycl::{CommandLineParser, Parameter, Scalar, Switch};
///
/// let parser = CommandLineParser::new("program")
///     .add(Parameter::option(Switch::new(), "yes").short("y"))
///     .add(Parameter::option(Scalar::<u32>::new(), "count"))
///     .build_parser()
///     .unwrap();
/// let mut result = parser.parse_tokens(&["-y", "input.txt"]).unwrap();
///
/// assert_eq!(result.value::<bool>("yes"), Some(&true));
/// assert!(result.contains("count"));
/// assert!(!result.is_set("count"));
/// assert_eq!(result.arguments(), &["input.txt".to_string()]);
/// assert_eq!(result.take::<bool>("yes"), Some(true));
/// ```
pub struct ParseResult {
    options: HashMap<String, Option<Box<dyn Any>>>,
    arguments: Vec<String>,
}

impl ParseResult {
    pub(crate) fn new(options: HashMap<String, Option<Box<dyn Any>>>, arguments: Vec<String>) -> Self {
        Self { options, arguments }
    }

    /// Whether `name` is a declared option.
    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Whether `name` is a declared option which resolved to a value.
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.options.get(name), Some(Some(_)))
    }

    /// Borrow the value of option `name`.
    ///
    /// `None` when the option has no value, is not declared, or is not of type `T`.
    pub fn value<T: 'static>(&self, name: &str) -> Option<&T> {
        self.options.get(name)?.as_ref()?.downcast_ref::<T>()
    }

    /// Move the value of option `name` out of this result, leaving the option without a value.
    ///
    /// `None` when the option has no value, is not declared, or is not of type `T`.
    /// In the latter case, the value is left in place.
    pub fn take<T: 'static>(&mut self, name: &str) -> Option<T> {
        let slot = self.options.get_mut(name)?;

        match slot.take()?.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(value) => {
                slot.replace(value);
                None
            }
        }
    }

    /// The positional arguments, in the order they appeared.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Consume this result into its positional arguments.
    pub fn into_arguments(self) -> Vec<String> {
        self.arguments
    }
}

impl std::fmt::Debug for ParseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.options.keys().collect();
        names.sort();
        let options: Vec<String> = names
            .into_iter()
            .map(|name| match &self.options[name] {
                Some(_) => format!("{name}=.."),
                None => format!("{name}=None"),
            })
            .collect();

        f.debug_struct("ParseResult")
            .field("options", &options)
            .field("arguments", &self.arguments)
            .finish()
    }
}
