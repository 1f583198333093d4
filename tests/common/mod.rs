use std::io::{self, Write};

/// Captures everything written and remembers the size of each write call.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub bytes: Vec<u8>,
    pub writes: Vec<usize>,
    pub flushes: usize,
}

impl Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        self.writes.push(buf.len());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// `record + "\n"` for every index, concatenated.
#[allow(dead_code)]
pub fn expected_stream<F, R>(iterations: u32, mut render: F) -> Vec<u8>
where
    F: FnMut(u32) -> R,
    R: AsRef<[u8]>,
{
    let mut out = Vec::new();
    for i in 0..iterations {
        out.extend_from_slice(render(i).as_ref());
        out.push(b'\n');
    }
    out
}
