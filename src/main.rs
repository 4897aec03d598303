use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::{debug, Level};

use setfilt::core::DEFAULT_LOCALE;
use setfilt::util::format_edges;
use setfilt::{normalize_edges, ControlConfig, ControlContext, McastTransport};

/// Set a receiver's predetection filter edges
#[derive(Parser, Debug)]
#[command(name = "setfilt", version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Radio control channel, host[:port]
    #[arg(short, long, env = "RADIO")]
    radio: Option<String>,

    /// Locale for number formatting
    #[arg(short, long, env = "LANG", default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Give up after this many seconds without an acknowledgement
    #[arg(short, long)]
    timeout: Option<f64>,

    /// Lower edge in Hz; a leading m means minus
    low: Option<String>,

    /// Upper edge in Hz; a leading m means minus
    high: Option<String>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(radio) = cli.radio else {
        eprintln!("--radio not specified and $RADIO not set");
        return ExitCode::FAILURE;
    };

    let deadline = match cli.timeout.map(Duration::try_from_secs_f64) {
        None => None,
        Some(Ok(limit)) => Some(limit),
        Some(Err(e)) => {
            eprintln!("invalid --timeout: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = ControlConfig {
        radio,
        deadline,
        locale: cli.locale,
        ..Default::default()
    };
    debug!(?config, "starting");

    let transport = match McastTransport::open(&config).await {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Both edges are needed to send a command; otherwise just report status
    let request = match (&cli.low, &cli.high) {
        (Some(low), Some(high)) => Some(normalize_edges(low, high)),
        _ => None,
    };

    let mut ctx = ControlContext::new(config, transport);
    match ctx.run(request).await {
        Ok(edges) => {
            println!("{}", format_edges(&edges, &ctx.config().locale));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
