use std::{fmt::Display, time::Duration};
use thiserror::Error;

use futures::{pin_mut, select_biased, FutureExt};
use hub_reader_runtime::sleep;
use hub_reader_types::{
    EventSource, HubErr, HubResult, Session, SessionParams, TIMESTAMP_FORMAT,
};

use crate::{ConfigErr, EventSink, ReaderConfig};

/// Events read per run unless configured otherwise.
pub const DEFAULT_MAX_EVENTS: usize = 100;

/// No run reads for less than this.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Time budget of a run unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = MIN_TIMEOUT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Limits of one run. Whichever is reached first ends the run.
pub struct ReaderOptions {
    timeout: Duration,
    max_events: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a run ended.
pub enum ReadStatus {
    /// The event limit was reached, or the stream ended.
    Processed,
    /// The time budget ran out.
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    pub status: ReadStatus,
    pub events_read: usize,
}

#[derive(Error, Debug)]
/// Errors of [`BoundedReader::run_config`].
pub enum QueryErr<E: std::error::Error> {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigErr),
    #[error(transparent)]
    Hub(#[from] HubErr<E>),
}

#[derive(Debug)]
/// Reads from a source for a bounded time and a bounded number of events.
///
/// A run goes `Idle -> SessionOpen -> Reading -> Closing -> Done`, and the session
/// is closed no matter how `Reading` ended.
pub struct BoundedReader<S> {
    source: S,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

impl ReaderOptions {
    /// Values below [`MIN_TIMEOUT`] are raised to it.
    pub fn set_timeout(&mut self, v: Duration) -> &mut Self {
        if v < MIN_TIMEOUT {
            log::debug!("timeout of {v:?} raised to {MIN_TIMEOUT:?}");
        }
        self.timeout = v.max(MIN_TIMEOUT);
        self
    }
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_max_events(&mut self, v: usize) -> &mut Self {
        self.max_events = v;
        self
    }
    pub fn max_events(&self) -> usize {
        self.max_events
    }
}

impl ReadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "Processed",
            Self::Canceled => "Canceled",
        }
    }
}

impl Display for ReadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<S: EventSource> BoundedReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validate `config` and run once. Invalid settings are reported before the source is touched.
    pub async fn run_config<K: EventSink>(
        &self,
        config: &ReaderConfig,
        sink: &mut K,
    ) -> Result<ReadOutcome, QueryErr<S::Error>> {
        let (params, options) = config.resolve()?;
        Ok(self.run(&params, &options, sink).await?)
    }

    /// Open a session, read until a limit is hit or the stream ends, then close the session.
    ///
    /// If reading fails, the session is still closed before the error is returned.
    pub async fn run<K: EventSink>(
        &self,
        params: &SessionParams,
        options: &ReaderOptions,
        sink: &mut K,
    ) -> HubResult<ReadOutcome, S::Error> {
        let mut session = self.source.open(params).await?;
        log::debug!(
            "session open on {}, reading for {:?} or {} events",
            params.connection(),
            options.timeout(),
            options.max_events()
        );

        let read = read_until_done(&mut session, options, sink).await;

        log::debug!("closing session");
        let closed = session.close().await;
        match (read, closed) {
            (Ok(outcome), Ok(())) => {
                log::debug!(
                    "done: {} after {} events",
                    outcome.status,
                    outcome.events_read
                );
                Ok(outcome)
            }
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                log::warn!("failed to close session: {close_err}");
                Err(err)
            }
        }
    }
}

/// The `Reading` state. Races the countdown against the next event; the countdown wins ties.
async fn read_until_done<T: Session, K: EventSink>(
    session: &mut T,
    options: &ReaderOptions,
    sink: &mut K,
) -> HubResult<ReadOutcome, T::Error> {
    let mut events_read = 0;
    let countdown = sleep(options.timeout()).fuse();
    pin_mut!(countdown);

    let status = loop {
        if events_read >= options.max_events() {
            break ReadStatus::Processed;
        }
        let next = session.next().fuse();
        pin_mut!(next);
        select_biased! {
            _ = countdown => break ReadStatus::Canceled,
            res = next => match res? {
                Some(event) => {
                    log::debug!(
                        "event #{} of {} bytes from partition {} (enqueued {})",
                        event.sequence().map_or_else(|| "?".to_owned(), |s| s.to_string()),
                        event.size(),
                        event.partition(),
                        event
                            .enqueued_time()
                            .and_then(|t| t.format(TIMESTAMP_FORMAT).ok())
                            .unwrap_or_default(),
                    );
                    sink.emit(&event).map_err(HubErr::<T::Error>::Io)?;
                    events_read += 1;
                }
                None => {
                    log::debug!("stream ended");
                    break ReadStatus::Processed;
                }
            },
        }
    };

    Ok(ReadOutcome {
        status,
        events_read,
    })
}
