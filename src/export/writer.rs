use std::io::{self, ErrorKind, Write};

/// Wrapper around a Write that ignores broken pipe errors (EPIPE).
/// This allows graceful handling when stdout is piped to a command that exits early.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

fn ignore_broken_pipe<T>(result: io::Result<T>, fallback: T) -> io::Result<T> {
    match result {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(fallback),
        other => other,
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ignore_broken_pipe(self.inner.write(buf), buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        ignore_broken_pipe(self.inner.flush(), ())
    }
}
