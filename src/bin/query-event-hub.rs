use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use hub_reader::{BoundedReader, HubSource, LineSink, QueryErr, ReadOutcome, ReaderConfig};
use std::io::Write;

#[derive(Debug, Parser)]
#[clap(
    name = "query-event-hub",
    about = "Print events of an event hub until enough have been read or the timeout elapses",
    disable_help_flag = true
)]
struct Args {
    #[clap(
        short = 'c',
        long = "connString",
        help = "Connection string of the namespace or hub, i.e. `Endpoint=sb://...` or `stdio://`",
        env = "EVENTHUB_CONNECTION_STRING",
        hide_env_values = true
    )]
    connection_string: Option<String>,
    #[clap(
        short = 'n',
        long = "name",
        help = "Name of the event hub, if the connection string has no EntityPath",
        env = "EVENTHUB_NAME"
    )]
    name: Option<String>,
    #[clap(
        short = 't',
        long = "timeout",
        help = "Seconds to wait for events, at least 5",
        env = "EVENTHUB_READ_TIMEOUT"
    )]
    timeout: Option<u64>,
    #[clap(
        short = 'm',
        long = "max-events",
        help = "Stop after this many events [default: 100]"
    )]
    max_events: Option<usize>,
    #[clap(
        short = 'h',
        long = "help",
        short_alias = '?',
        help = "Print help",
        action = ArgAction::Help
    )]
    help: Option<bool>,
}

impl Args {
    fn into_config(self) -> ReaderConfig {
        ReaderConfig {
            connection_string: self.connection_string,
            hub_name: self.name,
            timeout_secs: self.timeout,
            max_events: self.max_events,
        }
    }
}

/// Print how the run ended and pick the exit code. Transport failures are returned as is.
fn report<E, O, W>(
    result: Result<ReadOutcome, QueryErr<E>>,
    out: &mut O,
    err: &mut W,
) -> Result<i32>
where
    E: std::error::Error + Send + Sync + 'static,
    O: Write,
    W: Write,
{
    match result {
        Ok(outcome) => {
            writeln!(out, "{}", outcome.status)?;
            Ok(0)
        }
        Err(QueryErr::Config(e)) => {
            writeln!(err, "{e}")?;
            writeln!(err)?;
            write!(err, "{}", Args::command().render_help())?;
            Ok(1)
        }
        Err(QueryErr::Hub(e)) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Args::parse().into_config();
    let reader = BoundedReader::new(HubSource::new());
    let result = reader.run_config(&config, &mut LineSink::stdout()).await;
    let code = report(result, &mut std::io::stdout(), &mut std::io::stderr())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::error::ErrorKind;
    use hub_reader::{BackendErr, ConfigErr, HubErr, ReadStatus};

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let config = Args::try_parse_from([
            "query-event-hub",
            "--connString",
            "stdio://",
            "-n",
            "telemetry",
            "-t",
            "3",
            "-m",
            "7",
        ])
        .unwrap()
        .into_config();
        assert_eq!(config.connection_string.as_deref(), Some("stdio://"));
        assert_eq!(config.hub_name.as_deref(), Some("telemetry"));
        assert_eq!(config.timeout_secs, Some(3));
        assert_eq!(config.max_events, Some(7));
    }

    #[test]
    fn test_help_flags() {
        for flag in ["-h", "-?", "--help"] {
            let err = Args::try_parse_from(["query-event-hub", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
            assert_eq!(err.exit_code(), 0);
            assert!(err.to_string().contains("--connString"));
        }
    }

    #[tokio::test]
    async fn test_missing_connection_string() {
        let config = Args::try_parse_from(["query-event-hub", "-c", "", "-t", "10"])
            .unwrap()
            .into_config();
        let result = BoundedReader::new(HubSource::new())
            .run_config(&config, &mut LineSink::new(Vec::new()))
            .await;

        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(report(result, &mut out, &mut err).unwrap(), 1);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("Configuration error: A connection string is required"));
        assert!(err.contains("Usage:"));
        assert!(err.contains("--connString"));
    }

    #[test]
    fn test_status_exit_code() {
        for status in [ReadStatus::Processed, ReadStatus::Canceled] {
            let outcome = ReadOutcome {
                status,
                events_read: 0,
            };
            let (mut out, mut err) = (Vec::new(), Vec::new());
            assert_eq!(
                report::<BackendErr, _, _>(Ok(outcome), &mut out, &mut err).unwrap(),
                0
            );
            assert_eq!(String::from_utf8(out).unwrap(), format!("{status}\n"));
            assert!(err.is_empty());
        }

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = Err(QueryErr::Config(ConfigErr::ZeroMaxEvents));
        assert_eq!(
            report::<BackendErr, _, _>(result, &mut out, &mut err).unwrap(),
            1
        );

        let result = Err(QueryErr::Hub(HubErr::<BackendErr>::SessionClosed));
        assert!(report(result, &mut out, &mut err).is_err());
    }
}
