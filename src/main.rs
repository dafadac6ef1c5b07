fn main() {
    if let Err(err) = dimballoon::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
