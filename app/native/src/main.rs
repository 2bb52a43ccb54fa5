//! Lumen - viewport-reactive page controller.
//!
//! The binary hosts the controller against a simulated page (`lumen simulate`)
//! and exposes the helper commands.

fn main() {
    if let Err(err) = lumen_lib::cli::run() {
        eprintln!("lumen: {err}");
        std::process::exit(1);
    }
}
