use crate::api::{GenericCapturable, InvalidCapture};
use crate::matcher::OptionConfig;
use crate::model::OptionKind;
use crate::parser::{AnonymousCapturable, OptionCapture, Value};

pub(crate) struct AnonymousCapture<'a, T: 'a> {
    field: Box<dyn GenericCapturable<'a, T> + 'a>,
    default: Option<Box<dyn Fn() -> T + 'a>>,
}

impl<'a, T> AnonymousCapture<'a, T> {
    pub(crate) fn bind(field: impl GenericCapturable<'a, T> + 'a) -> Self {
        Self {
            field: Box::new(field),
            default: None,
        }
    }

    fn default(&self) -> Option<T> {
        self.default.as_ref().map(|default_fn| default_fn())
    }
}

impl<'a, T: 'static> AnonymousCapturable for AnonymousCapture<'a, T> {
    fn matched(&self) -> Option<Value> {
        self.field
            .matched()
            .or_else(|| self.default())
            .map(|value| Box::new(value) as Value)
    }

    fn capture(&self, token: &str) -> Result<Option<Value>, InvalidCapture> {
        self.field
            .capture(token)
            .map(|value| value.map(|v| Box::new(v) as Value))
    }

    fn initial(&self) -> Option<Value> {
        self.default()
            .or_else(|| self.field.initial())
            .map(|value| Box::new(value) as Value)
    }
}

pub(super) struct ParameterInner<'a, T> {
    field: AnonymousCapture<'a, T>,
    kind: OptionKind,
    name: String,
    short: Option<String>,
    required: bool,
}

impl<'a, T> std::fmt::Debug for ParameterInner<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let short = match &self.short {
            Some(s) => format!(" -{s},"),
            None => "".to_string(),
        };
        let default = if self.field.default.is_some() {
            ", default"
        } else {
            ""
        };
        let required = if self.required { ", required" } else { "" };

        write!(
            f,
            "Opt[{t}, {kind}, --{name},{short}{default}{required}]",
            t = std::any::type_name::<T>(),
            kind = self.kind,
            name = self.name,
        )
    }
}

impl<'a, T> From<&ParameterInner<'a, T>> for OptionConfig {
    fn from(value: &ParameterInner<'a, T>) -> Self {
        OptionConfig::new(
            value.name.clone(),
            value.short.clone(),
            value.kind,
            value.field.default.is_some(),
            value.required,
        )
    }
}

impl<'a, T: 'static> From<ParameterInner<'a, T>> for OptionCapture<'a> {
    fn from(value: ParameterInner<'a, T>) -> Self {
        let config = OptionConfig::from(&value);
        let ParameterInner { field, .. } = value;
        (config, Box::new(field))
    }
}

/// An option parameter for the command line parser.
/// Used with [`CommandLineParser::add`](./struct.CommandLineParser.html#method.add).
///
/// The option is referenced on the command line as `--NAME`, and as `-N` when it has a short alias.
pub struct Parameter<'a, T>(ParameterInner<'a, T>);

impl<'a, T> Parameter<'a, T> {
    /// Create an option parameter.
    ///
    /// The name must be non-empty and cannot contain `=`, which is validated when the parser is built.
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::{Parameter, Scalar, Switch};
    ///
    /// Parameter::option(Switch::new(), "verbose");
    /// Parameter::option(Scalar::<String>::new(), "output");
    /// ```
    pub fn option(field: impl GenericCapturable<'a, T> + 'a, name: impl Into<String>) -> Self {
        let kind = field.kind();
        Self(ParameterInner {
            field: AnonymousCapture::bind(field),
            kind,
            name: name.into(),
            short: None,
            required: false,
        })
    }

    /// Declare the short alias for this option, referenced on the command line as `-N`.
    /// If repeated, only the final alias will apply to the parameter.
    ///
    /// The alias must be precisely one character (other than `-` or `=`), which is validated when the parser is built.
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::{Parameter, Switch};
    ///
    /// Parameter::option(Switch::new(), "verbose").short("v");
    /// ```
    pub fn short(self, alias: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.short = Some(alias.into());
        Self(inner)
    }

    /// Declare the default value for this option.
    /// If repeated, only the final default will apply to the parameter.
    ///
    /// The default applies when the option is never referenced, as well as when a value-bearing option is referenced without a value.
    /// It never replaces a value which the field itself converted to "no value".
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::{Parameter, Scalar};
    ///
    /// Parameter::option(Scalar::<u32>::new(), "retries").default_value(3);
    /// ```
    pub fn default_value(self, value: T) -> Self
    where
        T: Clone + 'a,
    {
        let mut inner = self.0;
        inner.field.default = Some(Box::new(move || value.clone()));
        Self(inner)
    }

    /// Declare this option must be referenced on the command line.
    ///
    /// A required option may neither be a switch nor have a default, which is validated when the parser is built.
    ///
    /// ### Example
    /// ```
    /// # use tycl_builder as tycl;
    /// use tycl::{Parameter, Scalar};
    ///
    /// Parameter::option(Scalar::<String>::new(), "input").required();
    /// ```
    pub fn required(self) -> Self {
        let mut inner = self.0;
        inner.required = true;
        Self(inner)
    }

    pub(super) fn consume(self) -> ParameterInner<'a, T> {
        self.0
    }
}
