use crate::matcher::MatchTokens;
use crate::model::OptionKind;

/// A raw value paired with its byte offset into the fed tokens.
pub(crate) type OffsetValue = (usize, String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct OptionConfig {
    name: String,
    short: Option<String>,
    kind: OptionKind,
    has_default: bool,
    required: bool,
}

impl OptionConfig {
    pub(crate) fn new(
        name: impl Into<String>,
        short: Option<String>,
        kind: OptionKind,
        has_default: bool,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            short,
            kind,
            has_default,
            required,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// The short alias as declared (not yet validated).
    pub(crate) fn short(&self) -> &Option<String> {
        &self.short
    }

    pub(crate) fn kind(&self) -> OptionKind {
        self.kind
    }

    pub(crate) fn has_default(&self) -> bool {
        self.has_default
    }

    pub(crate) fn required(&self) -> bool {
        self.required
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Matches {
    pub values: Vec<MatchTokens>,
    pub arguments: Vec<String>,
}

impl Matches {
    /// The final reference to the option `name`, if any.
    /// Repeated references overwrite one another, so only the last one counts.
    pub(crate) fn latest(&self, name: &str) -> Option<&MatchTokens> {
        self.values.iter().rev().find(|mt| mt.name == name)
    }
}
