use flume::{unbounded, Receiver, Sender};
use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Read},
    sync::Mutex,
};

use hub_reader_types::{
    export::async_trait, EventSource, HubErr, PartitionEvent, PartitionId, SeqNo, Session,
    SessionParams, Timestamp,
};

use crate::{parse_line, StdioErr, StdioResult};

/// Opens sessions over stdin, or over any reader given to [`StdioSource::from_reader`].
///
/// The input can only be consumed by one session.
pub struct StdioSource {
    input: Mutex<Input>,
}

enum Input {
    Stdin,
    Reader(Box<dyn Read + Send>),
    Taken,
}

#[derive(Debug)]
pub struct StdioSession {
    receiver: Option<Receiver<Frame>>,
}

type Frame = Result<PartitionEvent, StdioErr>;

impl StdioSource {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(Input::Stdin),
        }
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            input: Mutex::new(Input::Reader(Box::new(reader))),
        }
    }

    fn take_input(&self) -> StdioResult<Box<dyn Read + Send>> {
        let mut input = self
            .input
            .lock()
            .map_err(|_| HubErr::<StdioErr>::Connect("StdioSource lock poisoned".to_owned()))?;
        match std::mem::replace(&mut *input, Input::Taken) {
            Input::Stdin => Ok(Box::new(std::io::stdin())),
            Input::Reader(reader) => Ok(reader),
            Input::Taken => Err(HubErr::Connect(
                "input has already been consumed by another session".to_owned(),
            )),
        }
    }
}

impl Default for StdioSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StdioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdioSource").finish()
    }
}

#[async_trait]
impl EventSource for StdioSource {
    type Error = StdioErr;
    type Session = StdioSession;

    /// The hub name, if any, is ignored: every line belongs to the one stream.
    async fn open(&self, params: &SessionParams) -> StdioResult<StdioSession> {
        let input = self.take_input()?;
        let (sender, receiver) = unbounded();
        std::thread::Builder::new()
            .name("hub-reader-stdio".into())
            .spawn(move || relay_lines(input, sender))
            .map_err(|e| HubErr::<StdioErr>::Connect(e.to_string()))?;
        log::debug!(
            "stdio session opened (hub {:?}, group {})",
            params.hub().map(|h| h.name()),
            params.consumer_group()
        );
        Ok(StdioSession {
            receiver: Some(receiver),
        })
    }
}

/// Runs on its own thread until the input ends or the session is closed.
/// A closed session is only noticed after the next line arrives, as reading may block forever.
fn relay_lines(input: Box<dyn Read + Send>, sender: Sender<Frame>) {
    let mut sequences: HashMap<PartitionId, SeqNo> = HashMap::new();
    let mut reader = BufReader::new(input);
    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break, // input is closed
            Ok(_) => {}
            Err(e) => {
                sender.send(Err(StdioErr::IoError(e))).ok();
                break;
            }
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        let (meta, payload) = parse_line(&line);
        let partition = meta.partition.unwrap_or_default();
        let next = sequences.entry(partition.clone()).or_default();
        let sequence = match meta.sequence {
            Some(sequence) => sequence,
            None => *next,
        };
        *next = sequence + 1;
        let event = PartitionEvent::new(partition, payload.to_vec())
            .with_sequence(sequence)
            .with_enqueued_time(meta.timestamp.unwrap_or_else(Timestamp::now_utc));
        if sender.send(Ok(event)).is_err() {
            break; // session closed
        }
    }
    log::debug!("stdio reader thread exit");
}

#[async_trait]
impl Session for StdioSession {
    type Error = StdioErr;

    async fn next(&mut self) -> StdioResult<Option<PartitionEvent>> {
        let receiver = self
            .receiver
            .as_ref()
            .ok_or(HubErr::<StdioErr>::SessionClosed)?;
        match receiver.recv_async().await {
            Ok(Ok(event)) => Ok(Some(event)),
            Ok(Err(e)) => Err(HubErr::Backend(e)),
            // the sender is gone once the input reaches EOF
            Err(_) => Ok(None),
        }
    }

    async fn close(&mut self) -> StdioResult<()> {
        if self.receiver.take().is_some() {
            log::debug!("stdio session closed");
        }
        Ok(())
    }
}
