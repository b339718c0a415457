//! I/O handling
//!
//! Input delivers one byte per request and latches end-of-stream: once the
//! source runs dry every later read yields the all-ones sentinel without
//! touching the source again. Output writes single bytes and optionally
//! flushes after each one.

use std::io::{self, Cursor, Read, Write};
use um_spec::{Word, EOF_SENTINEL};

#[derive(Debug)]
pub struct IOHandler<R = Cursor<Vec<u8>>, W = Vec<u8>> {
    input: R,
    output: W,
    eof: bool,
    flush: bool,
    bytes_read: u64,
    bytes_written: u64,
}

impl IOHandler {
    /// Buffered handler over an in-memory input; output is collected
    pub fn new(inputs: Vec<u8>) -> Self {
        IOHandler::with_streams(Cursor::new(inputs), Vec::new())
    }

    pub fn outputs(&self) -> &[u8] {
        &self.output
    }

    pub fn take_outputs(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

impl<R: Read, W: Write> IOHandler<R, W> {
    pub fn with_streams(input: R, output: W) -> Self {
        IOHandler {
            input,
            output,
            eof: false,
            flush: true,
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    /// Flush the sink after every byte (default: on)
    pub fn set_flush(&mut self, flush: bool) {
        self.flush = flush;
    }

    /// Next input byte, or [`EOF_SENTINEL`] once the source is exhausted
    pub fn read_byte(&mut self) -> io::Result<Word> {
        if self.eof {
            return Ok(EOF_SENTINEL);
        }

        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(EOF_SENTINEL);
                }
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(buf[0] as Word);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])?;
        if self.flush {
            self.output.flush()?;
        }
        self.bytes_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    pub fn at_eof(&self) -> bool {
        self.eof
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
