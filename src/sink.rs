use std::io::{Stdout, Write};

use hub_reader_types::PartitionEvent;

/// Where the events of a run go, in the order they were read.
pub trait EventSink {
    fn emit(&mut self, event: &PartitionEvent) -> std::io::Result<()>;
}

#[derive(Debug)]
/// Writes one line per event, as `\tReceived event: <text>`.
///
/// Bodies that are not valid UTF-8 are printed lossily.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl LineSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> EventSink for LineSink<W> {
    fn emit(&mut self, event: &PartitionEvent) -> std::io::Result<()> {
        writeln!(self.writer, "\tReceived event: {}", event.text())?;
        // lines should show up as they arrive, not when the run ends
        self.writer.flush()
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &PartitionEvent) -> std::io::Result<()> {
        (**self).emit(event)
    }
}
