fn main() {
    if let Err(err) = geometry_overlay_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
