//! Entry point for the `dropline` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = dropline_cli::run() {
        eprintln!("dropline: {err}");
        std::process::exit(1);
    }
}
