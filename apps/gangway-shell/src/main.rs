//! Gangway desktop shell entry point.

mod shell;

fn main() {
    env_logger::init();

    if let Err(error) = shell::run() {
        eprintln!("Gangway startup error: {error}");
        std::process::exit(1);
    }
}
