use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr so they never interleave with the game on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = inkflow_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
