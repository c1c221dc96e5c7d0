fn main() {
    request_wizard::init();
    if let Err(err) = request_wizard::cli::run_cli() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
