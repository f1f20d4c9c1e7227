extern crate hello_triangle;

use hello_triangle::logging::{init_logging, LoggingConfig};
use hello_triangle::{exit_code, run, Config};

fn main() {
    init_logging(LoggingConfig::default());

    let result = run(Config::default());
    if let Err(err) = &result {
        log::error!("{}", err);
    }
    std::process::exit(exit_code(&result));
}
