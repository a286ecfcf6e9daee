use crate::{config, protocol::parser, protocol::renderer, session};
use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{DeferredNow, Logger, Record, TS_DASHES_BLANK_COLONS_DOT_BLANK};
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CLIArgs {
    /// TOML configuration file
    #[clap(short, long)]
    pub config: Option<String>,

    /// Read commands from this file instead of stdin
    #[clap(short, long)]
    pub input: Option<String>,

    /// Overrides logging.level from the configuration file
    #[clap(long)]
    pub log_level: Option<String>,
}

fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] {} [{}:{}] {}",
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        &record.args()
    )
}

fn load_config(path: Option<&str>) -> Result<config::Config> {
    let Some(path) = path else {
        return Ok(config::Config::default());
    };
    let config = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {path}"))?;
    toml::from_str(&config).context("Config is invalid")
}

pub async fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let config = load_config(cli_args.config.as_deref())?;

    let log_spec = cli_args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.level);
    // Logs go to stderr, stdout is reserved for the report.
    let _logger = Logger::try_with_str(log_spec)
        .with_context(|| format!("Invalid logging level {log_spec:?}"))?
        .format(log_format)
        .start()
        .context("Failed to start logger")?;

    info!("Scoreboard version {}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {:?}", config);

    let input: Box<dyn AsyncRead + Unpin> = match cli_args.input {
        Some(ref path) => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open command stream {path}"))?,
        ),
        None => Box::new(tokio::io::stdin()),
    };

    let session = session::Session::new(config.scoring.wrong_attempt_penalty);
    run(session, BufReader::new(input), tokio::io::stdout()).await
}

/// Feeds every command line of `input` to the session and writes the report to `output`, until
/// END or the end of the stream.
pub async fn run(
    mut session: session::Session,
    input: impl AsyncBufRead + Unpin,
    output: impl AsyncWrite + Unpin,
) -> Result<()> {
    let parser = parser::CommandParser::new()?;
    let mut lines = input.lines();
    let mut output = tokio::io::BufWriter::new(output);
    let mut line_number = 0;

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command stream")?
    {
        line_number += 1;
        let command = match parser.parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping line {line_number}: {e:#}");
                continue;
            }
        };

        let action = command.action();
        let result = session.handle_command(command);
        if let Err(ref e) = result {
            warn!("{action} on line {line_number} rejected: {e}");
        }

        output
            .write_all(renderer::render(action, &result).as_bytes())
            .await
            .context("Failed to write report")?;

        if session.is_ended() {
            break;
        }
    }

    output.flush().await.context("Failed to write report")?;
    Ok(())
}
