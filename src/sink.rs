use bytes::{BufMut, BytesMut};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::record::{Approach, itoa_hex, native, std_format, write_macro};
use crate::Result;

/// Buffer size for the buffered strategies.
pub const CHUNK_CAPACITY: usize = 128 * 1024;

#[cfg(not(windows))]
pub const NULL_DEVICE: &str = "/dev/null";
#[cfg(windows)]
pub const NULL_DEVICE: &str = "NUL";

/// Open the discard device for writing.
pub fn open_null_device() -> Result<File> {
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(NULL_DEVICE)?;
    Ok(file)
}

/// Accumulates newline-terminated records and writes them out in chunks.
///
/// A record that would overflow the chunk flushes what is pending first.
/// A record that cannot fit in an empty chunk (with its newline) is
/// written straight through, followed by its newline.
pub struct ChunkedWriter<W: Write> {
    inner: W,
    buf: BytesMut,
    capacity: usize,
}

impl<W: Write> ChunkedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_capacity(inner, CHUNK_CAPACITY)
    }

    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push_record(&mut self, record: &[u8]) -> io::Result<()> {
        if self.buf.len() + record.len() + 1 > self.capacity {
            self.flush_pending()?;
            if record.len() + 1 > self.capacity {
                self.inner.write_all(record)?;
                self.inner.write_all(b"\n")?;
                return Ok(());
            }
        }
        self.buf.put_slice(record);
        self.buf.put_u8(b'\n');
        Ok(())
    }

    /// Bytes buffered but not yet written.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Write out any partial chunk and hand back the destination.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush_pending()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

/// How records reach the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// [`ChunkedWriter`] with a 128 KiB chunk
    Chunked,
    /// One write for the record and one for its newline
    Direct,
    /// `std::io::BufWriter` with a 128 KiB buffer
    StdBuffered,
}

impl WriteStrategy {
    pub const ALL: [WriteStrategy; 3] = [
        WriteStrategy::Chunked,
        WriteStrategy::Direct,
        WriteStrategy::StdBuffered,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WriteStrategy::Chunked => "chunked(128K)",
            WriteStrategy::Direct => "direct",
            WriteStrategy::StdBuffered => "bufwriter(128K)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteResult {
    /// Record bytes written, newlines excluded
    pub total_size: usize,
    pub elapsed: Duration,
}

/// Render `iterations` records and write each one followed by `\n`.
///
/// Returns the destination (flushed) and the summed record length.
pub fn write_records<W, F, R>(
    writer: W,
    strategy: WriteStrategy,
    iterations: u32,
    mut render: F,
) -> io::Result<(W, usize)>
where
    W: Write,
    F: FnMut(u32) -> R,
    R: AsRef<[u8]>,
{
    let mut total_size = 0usize;
    match strategy {
        WriteStrategy::Chunked => {
            let mut chunked = ChunkedWriter::new(writer);
            for i in 0..iterations {
                let record = render(i);
                let record = record.as_ref();
                total_size += record.len();
                chunked.push_record(record)?;
            }
            Ok((chunked.finish()?, total_size))
        }
        WriteStrategy::Direct => {
            let mut writer = writer;
            for i in 0..iterations {
                let record = render(i);
                let record = record.as_ref();
                total_size += record.len();
                writer.write_all(record)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
            Ok((writer, total_size))
        }
        WriteStrategy::StdBuffered => {
            let mut buffered = BufWriter::with_capacity(CHUNK_CAPACITY, writer);
            for i in 0..iterations {
                let record = render(i);
                let record = record.as_ref();
                total_size += record.len();
                buffered.write_all(record)?;
                buffered.write_all(b"\n")?;
            }
            let writer = buffered.into_inner().map_err(|e| e.into_error())?;
            Ok((writer, total_size))
        }
    }
}

/// Time one pass of formatting plus writing to the null device, open to close.
pub fn run_write_bench(
    approach: Approach,
    strategy: WriteStrategy,
    iterations: u32,
) -> Result<WriteResult> {
    let start = Instant::now();
    let total_size = {
        let file = open_null_device()?;
        let (_file, total_size) = match approach {
            Approach::Native => write_records(file, strategy, iterations, native::make_record)?,
            Approach::StdFormat => {
                write_records(file, strategy, iterations, std_format::make_record)?
            }
            Approach::ItoaHex => write_records(file, strategy, iterations, itoa_hex::make_record)?,
            Approach::WriteMacro => {
                write_records(file, strategy, iterations, write_macro::make_record)?
            }
        };
        total_size
    };
    let elapsed = start.elapsed();
    debug!(
        approach = approach.label(),
        strategy = strategy.label(),
        total_size,
        elapsed_ns = elapsed.as_nanos() as u64,
        "write benchmark finished"
    );
    Ok(WriteResult {
        total_size,
        elapsed,
    })
}
