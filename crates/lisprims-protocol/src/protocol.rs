use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use chrono::NaiveDateTime;
use lisprims_frame::markers::{frame_number_for, ENQ, EOT};
use lisprims_frame::{
    checksum_for, decode_frame, encode_frame, scan_frames, unwrap_frame, wrap_frame,
    ChecksumStrategy, DeviceProfile, FrameConfig, FrameError, Unwrapped,
};
use lisprims_record::Record;
use lisprims_validate::{validate_records, ValidationResult};
use tokio_util::sync::CancellationToken;

use crate::config::{ChecksumPolicy, Policy, ProtocolConfig, ProtocolVariant};
use crate::error::{ProtocolError, Result};

/// A configured protocol variant.
///
/// Immutable once built; clones share the checksum strategy and may be used
/// from any number of threads at once.
#[derive(Debug, Clone)]
pub struct Protocol {
    config: ProtocolConfig,
    policy: Policy,
    checksum: Arc<dyn ChecksumStrategy>,
}

impl Protocol {
    /// Build a protocol using the checksum strategy of `config.device`.
    pub fn new(config: ProtocolConfig) -> Self {
        let checksum = checksum_for(config.device);
        Self::from_parts(config, checksum)
    }

    /// Build a protocol with an explicit checksum strategy.
    pub fn with_checksum_strategy(
        config: ProtocolConfig,
        checksum: Option<Arc<dyn ChecksumStrategy>>,
    ) -> Result<Self> {
        let checksum = checksum.ok_or(ProtocolError::MissingChecksumStrategy)?;
        Ok(Self::from_parts(config, checksum))
    }

    pub fn builder() -> ProtocolBuilder {
        ProtocolBuilder::default()
    }

    fn from_parts(config: ProtocolConfig, checksum: Arc<dyn ChecksumStrategy>) -> Self {
        let policy = config.policy();
        Self {
            config,
            policy,
            checksum,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.config.variant
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn checksum_strategy(&self) -> &Arc<dyn ChecksumStrategy> {
        &self.checksum
    }

    /// Frame reader settings for feeding [`parse_frame`](Self::parse_frame)
    /// from a stream.
    pub fn frame_config(&self) -> FrameConfig {
        self.config.frame_config()
    }

    /// Parse a raw transmission into records.
    pub fn parse(&self, raw: &[u8]) -> Result<Vec<Record>> {
        self.parse_with_cancel(raw, &CancellationToken::new())
    }

    pub fn parse_str(&self, raw: &str) -> Result<Vec<Record>> {
        self.parse(raw.as_bytes())
    }

    /// Parse a raw transmission, checking `cancel` before each frame.
    ///
    /// Malformed frames and unknown record kinds are dropped. A bad checksum
    /// either aborts with no records or drops the frame, per the variant.
    pub fn parse_with_cancel(&self, raw: &[u8], cancel: &CancellationToken) -> Result<Vec<Record>> {
        let outcome = scan_frames(raw, self.policy.scan);
        let mut records = Vec::with_capacity(outcome.frames.len());

        for (frame_index, frame) in outcome.slices(raw).enumerate() {
            if cancel.is_cancelled() {
                tracing::debug!(frame_index, "parse cancelled");
                return Err(ProtocolError::Cancelled);
            }
            if let Some(record) = self.decode(frame_index, frame)? {
                records.push(record);
            }
        }

        if outcome.consumed < raw.len() {
            tracing::debug!(
                consumed = outcome.consumed,
                len = raw.len(),
                "trailing bytes left unparsed"
            );
        }
        tracing::debug!(
            variant = %self.config.variant,
            frames = outcome.frames.len(),
            records = records.len(),
            "parsed transmission"
        );
        Ok(records)
    }

    /// Decode one complete frame, e.g. from a [`FrameReader`](lisprims_frame::FrameReader).
    ///
    /// Returns `Ok(None)` when the frame is dropped. Checksum errors report
    /// frame index 0.
    pub fn parse_frame(&self, frame: &[u8]) -> Result<Option<Record>> {
        self.decode(0, frame)
    }

    fn decode(&self, frame_index: usize, frame: &[u8]) -> Result<Option<Record>> {
        match decode_frame(frame, self.checksum.as_ref()) {
            Ok(decoded) => Ok(Record::parse(&decoded.body)),
            Err(err @ FrameError::ChecksumMismatch { .. }) => match self.policy.checksum {
                ChecksumPolicy::Abort => Err(ProtocolError::Checksum {
                    frame_index,
                    source: err,
                }),
                ChecksumPolicy::SkipFrame => {
                    tracing::warn!(frame_index, error = %err, "skipping frame with bad checksum");
                    Ok(None)
                }
            },
            Err(err) => {
                tracing::debug!(frame_index, error = %err, "dropping malformed frame");
                Ok(None)
            }
        }
    }

    /// Serialize records into a raw transmission.
    pub fn serialize(&self, records: &[Record]) -> Result<Bytes> {
        self.serialize_with_cancel(records, &CancellationToken::new())
    }

    pub fn serialize_to_string(&self, records: &[Record]) -> Result<String> {
        let bytes = self.serialize(records)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Serialize records, checking `cancel` before each record.
    ///
    /// Frames are numbered `1..=7` cyclically and joined by the line
    /// terminator. With session markers the output is wrapped in
    /// `ENQ <terminator> .. EOT`, with nothing after EOT.
    pub fn serialize_with_cancel(
        &self,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        let terminator = &self.config.line_terminator;
        let session = self.policy.scan.session_markers;
        let mut dst = BytesMut::new();

        if session {
            dst.put_u8(ENQ);
            dst.put_slice(terminator);
        }
        for (index, record) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::debug!(record_index = index, "serialize cancelled");
                return Err(ProtocolError::Cancelled);
            }
            if index > 0 {
                dst.put_slice(terminator);
            }
            encode_frame(
                &record.serialize(),
                frame_number_for(index),
                self.checksum.as_ref(),
                &mut dst,
            )?;
        }
        if session {
            dst.put_u8(EOT);
        }

        tracing::debug!(
            variant = %self.config.variant,
            records = records.len(),
            bytes = dst.len(),
            "serialized transmission"
        );
        Ok(dst.freeze())
    }

    /// Validate a record sequence under this variant's rules.
    pub fn validate(&self, records: &[Record]) -> ValidationResult {
        validate_records(records, &self.policy.rules, self.reference_time())
    }

    fn reference_time(&self) -> NaiveDateTime {
        self.config
            .reference_time
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    /// Wrap record text into a single frame.
    pub fn wrap(&self, text: &str, frame_number: u8) -> Result<Bytes> {
        Ok(wrap_frame(text, frame_number, self.checksum.as_ref())?)
    }

    /// Unwrap a single frame into its text and a validity flag.
    pub fn unwrap(&self, frame: &[u8]) -> Unwrapped {
        unwrap_frame(frame, self.checksum.as_ref())
    }

    /// Checksum of `text` as two uppercase hex characters.
    pub fn checksum(&self, text: &str) -> String {
        self.checksum.calculate(text.as_bytes())
    }
}

impl Default for Protocol {
    fn default() -> Self {
        Self::new(ProtocolConfig::default())
    }
}

/// Builder for [`Protocol`].
#[derive(Debug, Clone, Default)]
pub struct ProtocolBuilder {
    config: ProtocolConfig,
    checksum: Option<Arc<dyn ChecksumStrategy>>,
}

impl ProtocolBuilder {
    pub fn variant(mut self, variant: ProtocolVariant) -> Self {
        self.config.variant = variant;
        self
    }

    /// Errors (`true`) or warnings (`false`) for session rule violations.
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn device(mut self, device: DeviceProfile) -> Self {
        self.config.device = device;
        self
    }

    pub fn line_terminator(mut self, terminator: impl Into<Bytes>) -> Self {
        self.config.line_terminator = terminator.into();
        self
    }

    /// Judge record dates against a fixed instant instead of the local clock.
    pub fn reference_time(mut self, reference: NaiveDateTime) -> Self {
        self.config.reference_time = Some(reference);
        self
    }

    /// Override the device's checksum strategy.
    pub fn checksum_strategy(mut self, checksum: Arc<dyn ChecksumStrategy>) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn build(self) -> Protocol {
        match self.checksum {
            Some(checksum) => Protocol::from_parts(self.config, checksum),
            None => Protocol::new(self.config),
        }
    }
}
