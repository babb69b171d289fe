use std::str::FromStr;
use std::time::Duration;
use tycl::{CommandLineParser, Parameter, Parse, Scalar, Switch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Head,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "head" => Ok(Method::Head),
            _ => Err(format!("unknown: {}", value)),
        }
    }
}

// Accepts '500ms' or '3s'; anything else means "no timeout".
fn timeout(value: &str) -> Option<Duration> {
    if let Some(millis) = value.strip_suffix("ms") {
        millis.parse().ok().map(Duration::from_millis)
    } else if let Some(seconds) = value.strip_suffix('s') {
        seconds.parse().ok().map(Duration::from_secs)
    } else {
        None
    }
}

fn main() {
    let parser = CommandLineParser::new("fetch")
        .add(Parameter::option(Switch::new(), "verbose").short("v"))
        .add(Parameter::option(Switch::new(), "insecure").short("k"))
        .add(
            Parameter::option(Scalar::<Method>::new(), "method")
                .short("X")
                .default_value(Method::Get),
        )
        .add(
            Parameter::option(Parse::new(timeout), "timeout")
                .short("t")
                .default_value(Duration::from_secs(30)),
        )
        .add(Parameter::option(Scalar::<String>::new(), "output").short("o"))
        .add(Parameter::option(Scalar::<u8>::new(), "retries").required())
        .build();

    // Ex: fetch -vkX head --retries=3 -t 500ms https://example.com -- -not-an-option
    let result = parser.parse();
    let verbose = result.value::<bool>("verbose").copied().unwrap_or_default();

    if verbose {
        println!("{result:?}");
    }

    println!(
        "method={:?} insecure={:?} timeout={:?} output={:?} retries={:?}",
        result.value::<Method>("method"),
        result.value::<bool>("insecure"),
        result.value::<Duration>("timeout"),
        result.value::<String>("output"),
        result.value::<u8>("retries"),
    );

    for url in result.arguments() {
        println!("fetching {url}");
    }
}
