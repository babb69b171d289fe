use std::collections::HashMap;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::*;
use crate::matcher::api::*;
use crate::matcher::model::*;
use crate::model::OptionKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LookupError {
    #[error("Cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    #[error("Cannot duplicate the short option '{alias}' (declared by '{first}' and '{second}').")]
    DuplicateShortAlias {
        alias: char,
        first: String,
        second: String,
    },

    #[error("Option name '{0}' must be non-empty, and cannot contain '='.")]
    MalformedOptionName(String),

    #[error("Short option '{alias}' for '{name}' must be precisely one character (other than '-' or '=').")]
    MalformedShortAlias { alias: String, name: String },

    #[error("Switch '{0}' cannot be required.")]
    RequiredSwitch(String),

    #[error("Option '{0}' cannot be both required and have a default.")]
    RequiredWithDefault(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Unknown option '{0}'.")]
    UnknownOption(String),

    #[error("Switch '{0}' does not accept a value.")]
    UnexpectedValueForSwitch(String),

    #[error("Missing value for option '{0}'.")]
    MissingValueForOption(String),

    #[error("Missing argument for clustered option '{0}'.")]
    MissingClusteredArgument(String),
}

impl From<CloseError> for MatchError {
    fn from(error: CloseError) -> Self {
        match error {
            CloseError::MissingValue { name } => MatchError::MissingValueForOption(name),
        }
    }
}

/// The compiled form of the option configurations.
/// Resolves `--NAME` and `-N` forms to their option, and is never mutated after construction.
#[derive(Debug)]
pub(crate) struct OptionLookup {
    options: HashMap<String, OptionConfig>,
    short_options: HashMap<char, String>,
}

impl OptionLookup {
    pub(crate) fn new(option_configs: Vec<OptionConfig>) -> Result<Self, LookupError> {
        let mut options: HashMap<String, OptionConfig> = HashMap::default();
        let mut short_options: HashMap<char, String> = HashMap::default();

        for option_config in option_configs.into_iter() {
            let name = option_config.name().to_string();

            if name.is_empty() || name.contains(VALUE_DELIMITER) {
                return Err(LookupError::MalformedOptionName(name));
            }

            if options.contains_key(&name) {
                return Err(LookupError::DuplicateOption(name));
            }

            if option_config.required() {
                if option_config.kind() == OptionKind::Switch {
                    return Err(LookupError::RequiredSwitch(name));
                } else if option_config.has_default() {
                    return Err(LookupError::RequiredWithDefault(name));
                }
            }

            if let Some(alias) = option_config.short() {
                let mut chars = alias.chars();
                let single = match (chars.next(), chars.next()) {
                    (Some(single), None)
                        if single != VALUE_DELIMITER && !SHORT_PREFIX.starts_with(single) =>
                    {
                        single
                    }
                    _ => {
                        return Err(LookupError::MalformedShortAlias {
                            alias: alias.clone(),
                            name,
                        });
                    }
                };

                if let Some(first) = short_options.insert(single, name.clone()) {
                    return Err(LookupError::DuplicateShortAlias {
                        alias: single,
                        first,
                        second: name,
                    });
                }
            }

            options.insert(name, option_config);
        }

        Ok(Self {
            options,
            short_options,
        })
    }

    pub(crate) fn option(&self, name: &str) -> Option<&OptionConfig> {
        self.options.get(name)
    }

    pub(crate) fn short_option(&self, short: char) -> Option<&OptionConfig> {
        self.short_options
            .get(&short)
            .map(|name| {
                self.options
                    .get(name)
                    .expect("internal error - short option must align with an option")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ParsingOptions,
    PositionalsOnly,
}

/// Aligns the tokens of a single parse against the `OptionLookup`.
#[derive(Debug)]
pub(crate) struct TokenMatcher<'l> {
    lookup: &'l OptionLookup,
    state: State,
    fed: usize,
    matches: Vec<MatchTokens>,
    arguments: Vec<String>,
    buffer: Option<MatchBuffer>,
}

impl<'l> TokenMatcher<'l> {
    pub(crate) fn new(lookup: &'l OptionLookup) -> Self {
        Self {
            lookup,
            state: State::ParsingOptions,
            fed: 0,
            matches: Vec::default(),
            arguments: Vec::default(),
            buffer: None,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<(), MatchError> {
        let token_length = token.len();
        // 1. Give the token to a pending value-bearing option, verbatim:
        //  --initial -5
        //  --initial --
        // 2. After the end of options '--', every token is a positional.
        // 3. Find a 'long' option, such as:
        //  --initial
        //  --initial=..
        // 4. Find 'short' option(s), such as (both -i and -v are example short options):
        //  -i
        //  -i=..
        //  -vi
        //  -vi=..
        // 5. Match as a positional.
        let result = match self.buffer.take() {
            Some(mut match_buffer) => {
                match_buffer.push(self.fed, token.to_string());
                self.close_buffer(match_buffer)
            }
            None => match self.state {
                State::PositionalsOnly => {
                    self.match_argument(token);
                    Ok(())
                }
                State::ParsingOptions => {
                    if token == END_OF_OPTIONS {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("End of options at offset {}.", self.fed);
                        }

                        self.state = State::PositionalsOnly;
                        Ok(())
                    } else if let Some(body) = token.strip_prefix(LONG_PREFIX) {
                        self.match_option(token, split_value_delimiter(body))
                    } else if let Some(body) = token
                        .strip_prefix(SHORT_PREFIX)
                        .filter(|body| !body.is_empty())
                    {
                        self.match_option_short(token, split_value_delimiter(body))
                    } else {
                        self.match_argument(token);
                        Ok(())
                    }
                }
            },
        };

        self.fed += token_length;
        result
    }

    fn match_argument(&mut self, token: &str) {
        self.arguments.push(token.to_string());
    }

    fn match_option(
        &mut self,
        token: &str,
        (option_name, single_argument): (&str, Option<&str>),
    ) -> Result<(), MatchError> {
        let lookup = self.lookup;
        let option_config = lookup
            .option(option_name)
            .ok_or_else(|| MatchError::UnknownOption(token.to_string()))?;
        // The offset skips the option specifier '--', the name, and the delimiter '='.
        let value_offset = self.fed + LONG_PREFIX.len() + option_name.len() + 1;
        self.resolve(
            option_config,
            single_argument.map(|value| (value_offset, value)),
        )
    }

    fn match_option_short(
        &mut self,
        token: &str,
        (short_option_name, single_argument): (&str, Option<&str>),
    ) -> Result<(), MatchError> {
        if short_option_name.is_empty() {
            return Err(MatchError::UnknownOption(token.to_string()));
        }

        let lookup = self.lookup;
        let final_index = short_option_name.chars().count() - 1;

        for (index, single) in short_option_name.chars().enumerate() {
            let option_config = lookup
                .short_option(single)
                .ok_or_else(|| MatchError::UnknownOption(token.to_string()))?;

            if index == final_index {
                // Only the final option may accept a value.
                // The offset skips the short option specifier '-', the cluster, and the delimiter '='.
                let value_offset = self.fed + SHORT_PREFIX.len() + short_option_name.len() + 1;
                self.resolve(
                    option_config,
                    single_argument.map(|value| (value_offset, value)),
                )?;
            } else if option_config.kind() == OptionKind::Switch {
                self.matches.push(MatchTokens {
                    name: option_config.name().to_string(),
                    value: None,
                });
            } else {
                // All characters in the head of the cluster must be switches.
                return Err(MatchError::MissingClusteredArgument(
                    option_config.name().to_string(),
                ));
            }
        }

        Ok(())
    }

    fn resolve(
        &mut self,
        option_config: &OptionConfig,
        single_argument: Option<(usize, &str)>,
    ) -> Result<(), MatchError> {
        let name = option_config.name();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Matched {kind} option '{name}' at offset {fed}.",
                kind = option_config.kind(),
                fed = self.fed
            );
        }

        match (option_config.kind(), single_argument) {
            (OptionKind::Switch, Some(_)) => {
                Err(MatchError::UnexpectedValueForSwitch(name.to_string()))
            }
            (OptionKind::Switch, None) => {
                self.matches.push(MatchTokens {
                    name: name.to_string(),
                    value: None,
                });
                Ok(())
            }
            (OptionKind::Valued, Some((offset, value))) => {
                let mut match_buffer = MatchBuffer::new(name, option_config.has_default());
                match_buffer.push(offset, value.to_string());
                self.close_buffer(match_buffer)
            }
            (OptionKind::Valued, None) => {
                // No equals delimited value was specified, so the value is the subsequent token.
                if self
                    .buffer
                    .replace(MatchBuffer::new(name, option_config.has_default()))
                    .is_some()
                {
                    unreachable!("internal error - the buffer is expected to be None");
                }

                Ok(())
            }
        }
    }

    fn close_buffer(&mut self, match_buffer: MatchBuffer) -> Result<(), MatchError> {
        let match_tokens = match_buffer.close()?;
        self.matches.push(match_tokens);
        Ok(())
    }

    pub(crate) fn close(mut self) -> Result<Matches, (usize, MatchError)> {
        if let Some(match_buffer) = self.buffer.take() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Input exhausted with a pending option {match_buffer:?}.");
            }

            let fed = self.fed;
            self.close_buffer(match_buffer)
                .map_err(|error| (fed, error))?;
        }

        Ok(Matches {
            values: self.matches,
            arguments: self.arguments,
        })
    }
}

fn split_value_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once(VALUE_DELIMITER) {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}
