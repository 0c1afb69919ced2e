fn main() {
    if let Err(e) = vaidya::run() {
        eprintln!("vaidya: {e}");
        std::process::exit(1);
    }
}
