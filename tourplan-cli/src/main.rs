//! Entry point for the `tourplan` command.
#![forbid(unsafe_code)]

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn main() {
    if let Err(err) = tourplan_cli::run() {
        eprintln!("tourplan: {err}");
        std::process::exit(1);
    }
}
