fn main() {
    if let Err(e) = dexview::app::run_cli() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
