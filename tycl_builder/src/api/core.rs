use crate::api::Parameter;
use crate::parser::{
    ConfigError, ConsoleInterface, GeneralParser, OptionCapture, Parser, UserInterface,
};

/// The base command line parser.
///
/// ### Example
/// ```
/// # use tycl_builder as tycl;
/// use tycl::CommandLineParser;
///
/// let parser = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add.
///     .build();
/// let result = parser.parse_tokens(&[]).unwrap();
/// assert!(result.arguments().is_empty());
/// ```
pub struct CommandLineParser<'a> {
    program: String,
    option_captures: Vec<OptionCapture<'a>>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser.
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::CommandLineParser;
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["a"].as_slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            option_captures: Vec::default(),
        }
    }

    /// Add an option parameter to the command line parser.
    ///
    /// The order of invocation to `add` determines the order in which options are materialized.
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::{CommandLineParser, Parameter, Parse, Scalar, Switch};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Switch::new(), "yes").short("y"))
    ///     .add(Parameter::option(Scalar::<String>::new(), "opt2"))
    ///     .add(Parameter::option(Parse::new(|s| s.parse::<i32>().ok()), "opt1").default_value(5))
    ///     .build();
    ///
    /// let result = parser.parse_tokens(vec!["-y", "--opt2", "x", "arg"].as_slice()).unwrap();
    ///
    /// assert_eq!(result.value::<bool>("yes"), Some(&true));
    /// assert_eq!(result.value::<String>("opt2"), Some(&"x".to_string()));
    /// assert_eq!(result.value::<i32>("opt1"), Some(&5));
    /// assert_eq!(result.arguments(), &["arg".to_string()]);
    /// ```
    pub fn add<T: 'static>(mut self, parameter: Parameter<'a, T>) -> Self {
        let inner = parameter.consume();
        self.option_captures.push(OptionCapture::from(inner));
        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<'a>, ConfigError> {
        let parser = Parser::new(self.option_captures)?;
        Ok(GeneralParser::new(self.program, parser, user_interface))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name, or a malformed short alias).
    pub fn build_parser(self) -> Result<GeneralParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name, or a malformed short alias).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser<'a> {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
