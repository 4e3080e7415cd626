fn main() {
    if let Err(err) = datavail::run() {
        eprintln!("{}", datavail::format_error(&err));
        std::process::exit(1);
    }
}
