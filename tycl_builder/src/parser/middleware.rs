use std::env;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::ParseResult;
use crate::parser::base::*;
use crate::parser::interface::{ErrorContext, UserInterface};

/// The configured command line parser.
/// Built via `CommandLineParser::build_parser` or `CommandLineParser::build`.
///
/// The parser may be invoked any number of times; each invocation is independent.
pub struct GeneralParser<'ap> {
    program: String,
    parser: Parser<'ap>,
    user_interface: Box<dyn UserInterface>,
}

impl<'ap> std::fmt::Debug for GeneralParser<'ap> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("program", &self.program)
            .field("parser", &self.parser)
            .finish()
    }
}

impl<'ap> GeneralParser<'ap> {
    pub(crate) fn new(
        program: impl Into<String>,
        parser: Parser<'ap>,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            parser,
            user_interface,
        }
    }

    /// The program name this parser was configured with.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// The declared option names, in the order they were added.
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::{CommandLineParser, Parameter, Scalar, Switch};
    ///
    /// // Function under test.
    /// // We want to make sure the setup_fn declares every option.
    /// pub fn setup_fn(clp: CommandLineParser) -> CommandLineParser {
    ///     clp.add(Parameter::option(Switch::new(), "verbose"))
    ///         .add(Parameter::option(Scalar::<u32>::new(), "port"))
    /// }
    ///
    /// let parser = setup_fn(CommandLineParser::new("program")).build_parser().unwrap();
    /// assert_eq!(parser.option_names(), vec!["verbose", "port"]);
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn option_names(&self) -> Vec<&str> {
        self.parser.option_names()
    }

    fn invoke(
        &self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<ParseResult, i32> {
        match self.parser.consume(tokens) {
            Ok(parse_result) => Ok(parse_result),
            Err((offset, parse_error)) => {
                user_interface.print_error(parse_error);
                user_interface.print_error_context(ErrorContext::new(offset, tokens));
                Err(1)
            }
        }
    }

    /// Run the command line parser against the input tokens.
    ///
    /// The parser will process the input tokens based off the `CommandLineParser` configuration.
    /// Parsing happens in two phases:
    /// 1. Token matching aligns the tokens to options and positional arguments.
    /// All tokens must be matched successfully in order to proceed to the next phase.
    /// 2. Materialization converts the matched tokens by their respective fields, producing a value for every declared option.
    ///
    /// If at any point the parser encounters an error (ex: un-matched token, un-capturable token, etc), it returns the error.
    /// No partial result is produced.
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::{CommandLineParser, Parameter, ParseError, Switch};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Switch::new(), "yes").short("y"))
    ///     .build_parser()
    ///     .unwrap();
    ///
    /// let result = parser.parse_tokens(&["a", "--", "--yes"]).unwrap();
    /// assert_eq!(result.value::<bool>("yes"), Some(&false));
    /// assert_eq!(result.arguments(), &["a".to_string(), "--yes".to_string()]);
    ///
    /// let error = parser.parse_tokens(&["--no"]).unwrap_err();
    /// assert_eq!(error, ParseError::UnknownOption("--no".to_string()));
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<ParseResult, ParseError> {
        self.parser.consume(tokens).map_err(|(_, error)| error)
    }

    /// Run the command line parser against the Cli [`env::args`], skipping the executable path.
    ///
    /// See [`GeneralParser::parse_tokens`] for the parse semantics.
    ///
    /// If the parser encounters an error, it will display the error and exit with error code `1` (via `std::process::exit`).
    pub fn parse(&self) -> ParseResult {
        let command_input: Vec<String> = env::args().skip(1).collect();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsing '{}' with {command_input:?}.", self.program);
        }

        match self.invoke(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
            &*self.user_interface,
        ) {
            Ok(parse_result) => parse_result,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}
