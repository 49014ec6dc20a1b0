use std::io;
use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bitcalc::config::Args;
use bitcalc::display::Canvas;
use bitcalc::Session;

fn main() {
  // Logs go to stderr so they never interleave with the frames on stdout.
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bitcalc=warn".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  #[cfg(feature = "trace_computation")]
  println!("Computation Tracing ENABLED");

  let args = Args::parse();

  let display = match args.display() {
    Ok(display) => display,
    Err(e) => {
      error!(%e, "invalid display configuration");
      eprintln!("Error: {}", e);
      process::exit(2);
    }
  };

  let canvas = Canvas::with_config(display, io::stdout());
  let stdin = io::stdin();
  let mut session = Session::new(stdin.lock(), io::stdout(), canvas).quiet(args.quiet);

  if let Err(e) = session.run() {
    error!(%e, "session failed");
    eprintln!("Error: {}", e);
    process::exit(1);
  }
}
