fn main() {
    if let Err(err) = zeno_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
