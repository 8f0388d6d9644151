#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::io;

use chess_rules::repl::repl;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
    repl()
}
