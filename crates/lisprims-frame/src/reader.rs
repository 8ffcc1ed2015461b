use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};

use crate::codec::FrameConfig;
use crate::error::{FrameError, Result};
use crate::scan::scan_frames;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Something pulled off the wire by a [`FrameReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamItem {
    /// A complete raw frame (`STX .. ETX cc`), checksum not yet verified.
    Frame(Bytes),
    /// The peer closed its session with EOT.
    SessionEnd,
}

/// Splits a buffer into stream items, leaving incomplete data in place.
#[derive(Debug, Default)]
pub(crate) struct FrameSplitter {
    pending: VecDeque<StreamItem>,
}

impl FrameSplitter {
    pub(crate) fn next_item(&mut self, buf: &mut BytesMut, config: &FrameConfig) -> Result<Option<StreamItem>> {
        if let Some(item) = self.pending.pop_front() {
            return Ok(Some(item));
        }

        let outcome = scan_frames(buf, config.scan);
        if outcome.consumed > 0 {
            let consumed = buf.split_to(outcome.consumed).freeze();
            for range in outcome.frames {
                self.pending.push_back(StreamItem::Frame(consumed.slice(range)));
            }
            if outcome.session_ended {
                self.pending.push_back(StreamItem::SessionEnd);
            }
        }

        if self.pending.is_empty() && buf.len() > config.max_buffered {
            return Err(FrameError::BufferOverflow {
                size: buf.len(),
                max: config.max_buffered,
            });
        }

        Ok(self.pending.pop_front())
    }
}

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete frames.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    splitter: FrameSplitter,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            splitter: FrameSplitter::default(),
            config,
        }
    }

    /// Read the next frame or session marker (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_item(&mut self) -> Result<StreamItem> {
        loop {
            if let Some(item) = self.splitter.next_item(&mut self.buf, &self.config)? {
                return Ok(item);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read the next complete frame, stepping over session-end markers.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        loop {
            if let StreamItem::Frame(frame) = self.read_item()? {
                return Ok(frame);
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
