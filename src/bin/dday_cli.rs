use dday_core::cli::{output, run_cli};

fn main() {
    dday_core::init();

    if let Err(err) = run_cli() {
        output::error(format!("Fatal: {err}"));
        std::process::exit(1);
    }
}
