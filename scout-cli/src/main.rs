//! Entry point for the `smoothie-scout` command-line interface.
#![forbid(unsafe_code)]

use scout_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on the terminal"
)]
fn main() {
    if let Err(err) = scout_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("smoothie-scout: {err}");
        std::process::exit(1);
    }
}
