use tycl::{CommandLineParser, Parameter, Scalar};

fn main() {
    let parser = CommandLineParser::new("summer")
        .add(
            Parameter::option(Scalar::<u32>::new(), "scale")
                .short("s")
                .default_value(1),
        )
        .build();

    let mut result = parser.parse();
    let scale = result.take::<u32>("scale").unwrap_or(1);
    let mut sum: u32 = 0;

    for item in result.arguments() {
        let value = match item.parse::<u32>() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("Not a u32: '{item}'.");
                std::process::exit(1);
            }
        };

        sum = match sum.checked_add(value) {
            Some(sum) => sum,
            None => {
                eprintln!("Sum overflows a u32 at '{item}'.");
                std::process::exit(1);
            }
        };
    }

    match sum.checked_mul(scale) {
        Some(total) => println!("Sum: {total}"),
        None => {
            eprintln!("Sum {sum} scaled by {scale} overflows a u32.");
            std::process::exit(1);
        }
    }
}
