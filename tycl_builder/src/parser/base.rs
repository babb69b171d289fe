use std::any::Any;
use std::collections::HashMap;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::InvalidCapture;
use crate::matcher::*;
use crate::model::ParseResult;

pub(crate) type Value = Box<dyn Any>;

// We need a (dyn .. [ignoring T] ..) here in order to put all the fields of varying types T under one collection.
// In other words, we want the bottom of the object graph to include the types T, but up here we want to work across all T.
pub(crate) type OptionCapture<'ap> = (OptionConfig, Box<(dyn AnonymousCapturable + 'ap)>);

/// The error when the command line parser configuration is invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An option name which is empty, or contains the `=` value delimiter.
    #[error("Config error: Option name '{0}' must be non-empty, and cannot contain '='.")]
    MalformedOptionName(String),

    /// A short alias which isn't precisely one character, or is one of `-` and `=`.
    #[error("Config error: Short option '{alias}' for '{name}' must be precisely one character (other than '-' or '=').")]
    MalformedShortAlias {
        /// The declared alias.
        alias: String,
        /// The option declaring the alias.
        name: String,
    },

    /// Two options declaring the same short alias.
    #[error("Config error: Cannot duplicate the short option '{alias}' (declared by '{first}' and '{second}').")]
    DuplicateShortAlias {
        /// The duplicated alias.
        alias: char,
        /// The option declaring the alias first.
        first: String,
        /// The option declaring the alias second.
        second: String,
    },

    /// Two options sharing the same name.
    #[error("Config error: Cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    /// A switch declared as required.
    #[error("Config error: Switch '{0}' cannot be required.")]
    RequiredSwitch(String),

    /// An option declared as required, and with a default.
    #[error("Config error: Option '{0}' cannot be both required and have a default.")]
    RequiredWithDefault(String),
}

impl From<LookupError> for ConfigError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::MalformedOptionName(name) => ConfigError::MalformedOptionName(name),
            LookupError::DuplicateOption(name) => ConfigError::DuplicateOption(name),
            LookupError::DuplicateShortAlias {
                alias,
                first,
                second,
            } => ConfigError::DuplicateShortAlias {
                alias,
                first,
                second,
            },
            LookupError::MalformedShortAlias { alias, name } => {
                ConfigError::MalformedShortAlias { alias, name }
            }
            LookupError::RequiredSwitch(name) => ConfigError::RequiredSwitch(name),
            LookupError::RequiredWithDefault(name) => ConfigError::RequiredWithDefault(name),
        }
    }
}

/// The error when the command line tokens cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A reference to an undeclared option, carrying the literal token.
    #[error("Parse error: Unknown option '{0}'.")]
    UnknownOption(String),

    /// A switch referenced with an inline `=value`.
    #[error("Parse error: Switch '{0}' does not accept a value.")]
    UnexpectedValueForSwitch(String),

    /// A value-bearing option without a value, nor a default.
    #[error("Parse error: Missing value for option '{0}'.")]
    MissingValueForOption(String),

    /// A value-bearing option in a non-final position of a short option cluster.
    #[error("Parse error: Missing argument for clustered option '{0}'.")]
    MissingClusteredArgument(String),

    /// A required option which was never referenced.
    #[error("Parse error: Missing required option '{0}'.")]
    MissingRequiredOption(String),

    /// A value which cannot be converted to the option's type.
    #[error("Parse error: Invalid value '{token}' for option '{name}' (expected {type_name}).")]
    InvalidValue {
        /// The option name.
        name: String,
        /// The raw value.
        token: String,
        /// The name of the option's type.
        type_name: &'static str,
    },
}

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::UnknownOption(token) => ParseError::UnknownOption(token),
            MatchError::UnexpectedValueForSwitch(name) => ParseError::UnexpectedValueForSwitch(name),
            MatchError::MissingValueForOption(name) => ParseError::MissingValueForOption(name),
            MatchError::MissingClusteredArgument(name) => {
                ParseError::MissingClusteredArgument(name)
            }
        }
    }
}

impl ParseError {
    fn invalid_value(name: impl Into<String>, error: InvalidCapture) -> Self {
        match error {
            InvalidCapture::InvalidConversion { token, type_name } => ParseError::InvalidValue {
                name: name.into(),
                token,
                type_name,
            },
        }
    }
}

/// Behaviour to capture an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the command line parser object graph so that different types may all be 'captured' in a single parser.
pub(crate) trait AnonymousCapturable {
    /// The value when the parameter has been matched without a token.
    fn matched(&self) -> Option<Value>;

    /// Capture a value anonymously for this parameter.
    fn capture(&self, value: &str) -> Result<Option<Value>, InvalidCapture>;

    /// The value when the parameter is never matched.
    fn initial(&self) -> Option<Value>;
}


pub(crate) struct Parser<'ap> {
    lookup: OptionLookup,
    captures: Vec<OptionCapture<'ap>>,
}

impl<'ap> std::fmt::Debug for Parser<'ap> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'ap> Parser<'ap> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default()).unwrap()
    }

    pub(crate) fn new(options: Vec<OptionCapture<'ap>>) -> Result<Self, ConfigError> {
        let lookup = OptionLookup::new(
            options
                .iter()
                .map(|(option_config, _)| option_config.clone())
                .collect(),
        )?;

        Ok(Self {
            lookup,
            captures: options,
        })
    }

    /// The declared option names, in declaration order.
    #[cfg(any(test, feature = "unit_test"))]
    pub(crate) fn option_names(&self) -> Vec<&str> {
        self.captures
            .iter()
            .map(|(option_config, _)| option_config.name())
            .collect()
    }

    pub(crate) fn consume(&self, tokens: &[&str]) -> Result<ParseResult, (usize, ParseError)> {
        let mut token_matcher = TokenMatcher::new(&self.lookup);
        // 1. Feed the raw token strings to the matcher.
        let mut fed = 0;

        for token in tokens {
            token_matcher
                .feed(token)
                .map_err(|e| (fed, ParseError::from(e)))?;
            fed += token.len();
        }

        // 2. Get the matching between tokens-options, still as raw strings.
        let matches = token_matcher
            .close()
            .map_err(|(offset, e)| (offset, ParseError::from(e)))?;
        let mut options: HashMap<String, Option<Value>> = HashMap::default();

        // 3. Materialize every option, in declaration order.
        for (option_config, box_capture) in &self.captures {
            let name = option_config.name();
            let value = match matches.latest(name) {
                // 4a. Convert the raw value string into the capture type.
                Some(MatchTokens {
                    value: Some((offset, raw)),
                    ..
                }) => box_capture
                    .capture(raw)
                    .map_err(|error| (*offset, ParseError::invalid_value(name, error)))?,
                // 4b. Matched without a value (ex: a switch, or a value-bearing option falling back to its default).
                Some(MatchTokens { value: None, .. }) => box_capture.matched(),
                None => {
                    if option_config.required() {
                        return Err((fed, ParseError::MissingRequiredOption(name.to_string())));
                    }

                    box_capture.initial()
                }
            };

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Materialized '{name}' ({kind}): has value {has_value}.",
                    kind = option_config.kind(),
                    has_value = value.is_some()
                );
            }

            options.insert(name.to_string(), value);
        }

        Ok(ParseResult::new(options, matches.arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnonymousCapture, Parse, Scalar, Switch};
    use crate::model::OptionKind;
    use crate::parser::base::test::Length;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn scalar_u32(name: &str, short: Option<&str>) -> OptionCapture<'static> {
        (
            OptionConfig::new(
                name,
                short.map(|s| s.to_string()),
                OptionKind::Valued,
                false,
                false,
            ),
            Box::new(AnonymousCapture::bind(Scalar::<u32>::new())),
        )
    }

    fn switch(name: &str, short: Option<&str>) -> OptionCapture<'static> {
        (
            OptionConfig::new(
                name,
                short.map(|s| s.to_string()),
                OptionKind::Switch,
                false,
                false,
            ),
            Box::new(AnonymousCapture::bind(Switch::new())),
        )
    }

    #[test]
    fn parser_empty() {
        // Setup
        let parser = Parser::empty();

        // Execute
        let result = parser.consume(&[]).unwrap();

        // Verify
        assert!(result.arguments().is_empty());
        assert!(parser.option_names().is_empty());
    }

    #[test]
    fn parser_arguments_only() {
        // Setup
        let parser = Parser::empty();
        let tokens: Vec<String> = (0..thread_rng().gen_range(1..8))
            .map(|i| format!("arg{i}"))
            .collect();
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

        // Execute
        let result = parser.consume(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(result.into_arguments(), tokens);
    }

    #[rstest]
    #[case(vec!["--variable", "1"])]
    #[case(vec!["--variable", "01"])]
    #[case(vec!["--variable=1"])]
    #[case(vec!["-v", "1"])]
    #[case(vec!["-v", "01"])]
    #[case(vec!["-v=1"])]
    #[case(vec!["-v=01"])]
    #[case(vec!["--variable", "7", "-v", "1"])]
    fn parser_option(#[case] tokens: Vec<&str>) {
        // Setup
        let parser = Parser::new(vec![scalar_u32("variable", Some("v"))]).unwrap();

        // Execute
        let result = parser.consume(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(result.value::<u32>("variable"), Some(&1));
        assert!(result.arguments().is_empty());
    }

    #[rstest]
    #[case(vec![], false)]
    #[case(vec!["--flag"], true)]
    #[case(vec!["-f"], true)]
    #[case(vec!["-f", "-f"], true)]
    #[case(vec!["--", "--flag"], false)]
    fn parser_switch(#[case] tokens: Vec<&str>, #[case] expected: bool) {
        // Setup
        let parser = Parser::new(vec![switch("flag", Some("f"))]).unwrap();

        // Execute
        let result = parser.consume(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(result.value::<bool>("flag"), Some(&expected));
    }

    #[test]
    fn parser_materializes_every_option() {
        // Setup
        let parser = Parser::new(vec![
            switch("flag", None),
            scalar_u32("variable", None),
            (
                OptionConfig::new("length", None, OptionKind::Valued, false, false),
                Box::new(Length::default()),
            ),
        ])
        .unwrap();

        // Execute
        let result = parser.consume(&["--length", "abcd", "x"]).unwrap();

        // Verify
        assert_eq!(result.value::<bool>("flag"), Some(&false));
        assert!(result.contains("variable"));
        assert!(!result.is_set("variable"));
        assert_eq!(result.value::<usize>("length"), Some(&4));
        assert_eq!(result.arguments(), &["x".to_string()]);
        assert_eq!(parser.option_names(), vec!["flag", "variable", "length"]);
    }

    #[test]
    fn parser_reusable() {
        // Setup
        let parser = Parser::new(vec![scalar_u32("variable", Some("v"))]).unwrap();

        // Execute
        let first = parser.consume(&["-v", "1"]).unwrap();
        let second = parser.consume(&["a"]).unwrap();

        // Verify
        assert_eq!(first.value::<u32>("variable"), Some(&1));
        assert_eq!(second.value::<u32>("variable"), None);
        assert_eq!(second.arguments(), &["a".to_string()]);
    }

    #[test]
    fn parser_parse_applied_once() {
        // Setup
        let calls = std::cell::Cell::new(0);
        let parser = Parser::new(vec![(
            OptionConfig::new("level", None, OptionKind::Valued, true, false),
            Box::new(AnonymousCapture::bind(Parse::new(|s| {
                calls.set(calls.get() + 1);
                s.parse::<i32>().ok()
            }))),
        )])
        .unwrap();

        // Execute
        let result = parser.consume(&["--level", "x"]).unwrap();

        // Verify
        assert_eq!(calls.get(), 1);
        assert!(result.contains("level"));
        assert_eq!(result.value::<i32>("level"), None);
    }

    #[rstest]
    #[case(vec!["--variable", "x"], 10, "x")]
    #[case(vec!["--variable=-1"], 11, "-1")]
    #[case(vec!["a", "-v", ""], 3, "")]
    #[case(vec!["-v=1.5"], 3, "1.5")]
    fn parser_option_inconvertable(
        #[case] tokens: Vec<&str>,
        #[case] offset: usize,
        #[case] token: &str,
    ) {
        // Setup
        let parser = Parser::new(vec![scalar_u32("variable", Some("v"))]).unwrap();

        // Execute
        let (error_offset, error) = parser.consume(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_offset, offset);
        assert_eq!(
            error,
            ParseError::InvalidValue {
                name: "variable".to_string(),
                token: token.to_string(),
                type_name: "u32",
            }
        );
    }

    #[rstest]
    #[case(vec!["--other"], 0, ParseError::UnknownOption("--other".to_string()))]
    #[case(vec!["a", "-x"], 1, ParseError::UnknownOption("-x".to_string()))]
    #[case(vec!["--flag=1"], 0, ParseError::UnexpectedValueForSwitch("flag".to_string()))]
    #[case(vec!["-vf"], 0, ParseError::MissingClusteredArgument("variable".to_string()))]
    #[case(vec!["abc", "--variable"], 13, ParseError::MissingValueForOption("variable".to_string()))]
    fn parser_match_error(
        #[case] tokens: Vec<&str>,
        #[case] offset: usize,
        #[case] expected: ParseError,
    ) {
        // Setup
        let parser =
            Parser::new(vec![switch("flag", Some("f")), scalar_u32("variable", Some("v"))])
                .unwrap();

        // Execute
        let (error_offset, error) = parser.consume(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_offset, offset);
        assert_eq!(error, expected);
    }

    #[rstest]
    #[case(vec![], 0)]
    #[case(vec!["abc"], 3)]
    #[case(vec!["--", "--variable", "1"], 13)]
    fn parser_missing_required(#[case] tokens: Vec<&str>, #[case] offset: usize) {
        // Setup
        let parser = Parser::new(vec![(
            OptionConfig::new("variable", None, OptionKind::Valued, false, true),
            Box::new(AnonymousCapture::bind(Scalar::<u32>::new())),
        )])
        .unwrap();

        // Execute
        let (error_offset, error) = parser.consume(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_offset, offset);
        assert_eq!(
            error,
            ParseError::MissingRequiredOption("variable".to_string())
        );
    }

    #[test]
    fn parser_duplicate_option() {
        let result = Parser::new(vec![switch("flag", None), scalar_u32("flag", None)]);
        assert_matches!(result, Err(ConfigError::DuplicateOption(name)) if name == "flag");
    }

    #[test]
    fn parser_duplicate_option_short() {
        let result = Parser::new(vec![switch("flagA", Some("f")), switch("flagB", Some("f"))]);
        assert_matches!(
            result,
            Err(ConfigError::DuplicateShortAlias { alias: 'f', first, second }) if first == "flagA" && second == "flagB"
        );
    }

    #[test]
    fn parser_malformed_short() {
        let result = Parser::new(vec![switch("flag", Some("fl"))]);
        assert_matches!(
            result,
            Err(ConfigError::MalformedShortAlias { alias, name }) if alias == "fl" && name == "flag"
        );
    }

    #[rstest]
    #[case(LookupError::MalformedOptionName("a=b".to_string()), ConfigError::MalformedOptionName("a=b".to_string()))]
    #[case(LookupError::DuplicateOption("a".to_string()), ConfigError::DuplicateOption("a".to_string()))]
    #[case(LookupError::RequiredSwitch("a".to_string()), ConfigError::RequiredSwitch("a".to_string()))]
    #[case(LookupError::RequiredWithDefault("a".to_string()), ConfigError::RequiredWithDefault("a".to_string()))]
    fn config_error_from(#[case] error: LookupError, #[case] expected: ConfigError) {
        let config_error = ConfigError::from(error);
        assert!(config_error.to_string().starts_with("Config error: "));
        assert_eq!(config_error, expected);
    }
}
