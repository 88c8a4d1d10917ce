use envconfig::Envconfig;
use loggate::config::Config;

#[tokio::main]
async fn main() {
  // Minimal CLI: support --version/-V
  let mut args = std::env::args().skip(1);
  if let Some(arg) = args.next() {
    if arg == "--version" || arg == "-V" {
      println!("loggate {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    if arg == "--help" || arg == "-h" {
      eprintln!("Usage: loggate [--version]");
      eprintln!();
      eprintln!("Configured through the environment: LOGGATE_ADDR, OPENSEARCH_SCHEME,");
      eprintln!("OPENSEARCH_HOST, OPENSEARCH_PORT, OPENSEARCH_USER, OPENSEARCH_PASS,");
      eprintln!("OPENSEARCH_TIMEOUT_MS, RUST_LOG.");
      return;
    }
  }

  let config = match Config::init_from_env() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("error: invalid configuration: {e}");
      std::process::exit(1);
    }
  };

  if let Err(e) = loggate::app::run(config).await {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}
