//! `tokio-util` codec for framed transports.
//!
//! Decoding yields raw frames (and session ends) exactly like
//! [`FrameReader`](crate::FrameReader); checksum verification stays with the
//! protocol layer so lenient and strict policies can be applied there.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::codec::FrameConfig;
use crate::error::FrameError;
use crate::reader::{FrameSplitter, StreamItem};

/// Frame decoder for use with `tokio_util::codec::FramedRead`.
///
/// Outbound transmissions come from `Protocol::serialize` and are written
/// as-is, so there is no encoder half.
#[derive(Debug, Default)]
pub struct LisFrameCodec {
    config: FrameConfig,
    splitter: FrameSplitter,
}

impl LisFrameCodec {
    pub fn new(config: FrameConfig) -> Self {
        Self {
            config,
            splitter: FrameSplitter::default(),
        }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Decoder for LisFrameCodec {
    type Item = StreamItem;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        self.splitter.next_item(src, &self.config)
    }
}
