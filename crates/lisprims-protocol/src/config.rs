use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use chrono::NaiveDateTime;
use lisprims_frame::markers::CRLF;
use lisprims_frame::{DeviceProfile, FrameConfig, ScanOptions};
use lisprims_validate::ValidationRules;
use serde::{Deserialize, Serialize};

/// Protocol dialects. They share one algorithm and differ only in policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolVariant {
    /// No ordering, relationship or sequence checks; bad checksums abort.
    #[default]
    Base,
    /// Out-of-order records are warned about; bad checksums abort.
    Ordered,
    /// ENQ/EOT session markers and full checks, strict or lenient.
    Session,
}

impl ProtocolVariant {
    pub const ALL: [ProtocolVariant; 3] = [
        ProtocolVariant::Base,
        ProtocolVariant::Ordered,
        ProtocolVariant::Session,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProtocolVariant::Base => "base",
            ProtocolVariant::Ordered => "ordered",
            ProtocolVariant::Session => "session",
        }
    }

    /// Look up a variant by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProtocolVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown protocol variant '{s}'"))
    }
}

/// What happens to a frame whose checksum does not verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumPolicy {
    /// Fail the whole parse; no records are returned.
    Abort,
    /// Drop the frame and keep going.
    SkipFrame,
}

/// Everything a variant decides, resolved from a [`ProtocolConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub checksum: ChecksumPolicy,
    pub scan: ScanOptions,
    pub rules: ValidationRules,
}

/// Configuration for a [`Protocol`](crate::Protocol).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub variant: ProtocolVariant,
    /// Only read by [`ProtocolVariant::Session`]; the other variants always
    /// abort on checksum failure.
    pub strict: bool,
    /// Selects the checksum strategy.
    pub device: DeviceProfile,
    /// Written between frames and after ENQ. Default: CR LF.
    pub line_terminator: Bytes,
    /// Instant that date checks are judged against. `None` reads the local
    /// clock at validation time.
    pub reference_time: Option<NaiveDateTime>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            variant: ProtocolVariant::Base,
            strict: true,
            device: DeviceProfile::Generic,
            line_terminator: Bytes::from_static(CRLF),
            reference_time: None,
        }
    }
}

impl ProtocolConfig {
    pub fn new(variant: ProtocolVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Resolve the variant's checksum, scanning and validation policy.
    pub fn policy(&self) -> Policy {
        match self.variant {
            ProtocolVariant::Base => Policy {
                checksum: ChecksumPolicy::Abort,
                scan: ScanOptions::default(),
                rules: ValidationRules::base(),
            },
            ProtocolVariant::Ordered => Policy {
                checksum: ChecksumPolicy::Abort,
                scan: ScanOptions {
                    skip_line_terminator: true,
                    session_markers: false,
                },
                rules: ValidationRules::ordered(),
            },
            ProtocolVariant::Session => Policy {
                checksum: if self.strict {
                    ChecksumPolicy::Abort
                } else {
                    ChecksumPolicy::SkipFrame
                },
                scan: ScanOptions {
                    skip_line_terminator: true,
                    session_markers: true,
                },
                rules: ValidationRules::session(self.strict),
            },
        }
    }

    /// Frame reader settings matching this variant's scanning rules.
    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            scan: self.policy().scan,
            ..FrameConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use lisprims_validate::Severity;

    use super::*;

    #[test]
    fn default_config() {
        let config = ProtocolConfig::default();
        assert_eq!(config.variant, ProtocolVariant::Base);
        assert!(config.strict);
        assert_eq!(config.device, DeviceProfile::Generic);
        assert_eq!(&config.line_terminator[..], b"\r\n");
        assert!(config.reference_time.is_none());
    }

    #[test]
    fn variant_names() {
        for variant in ProtocolVariant::ALL {
            assert_eq!(ProtocolVariant::from_name(variant.name()), Some(variant));
        }
        assert_eq!("SESSION".parse::<ProtocolVariant>(), Ok(ProtocolVariant::Session));
        assert!("variant-z".parse::<ProtocolVariant>().is_err());
    }

    #[test]
    fn base_policy() {
        let policy = ProtocolConfig::new(ProtocolVariant::Base).policy();
        assert_eq!(policy.checksum, ChecksumPolicy::Abort);
        assert!(!policy.scan.skip_line_terminator);
        assert!(!policy.scan.session_markers);
        assert_eq!(policy.rules.ordering, None);
    }

    #[test]
    fn ordered_policy_ignores_strictness() {
        let config = ProtocolConfig {
            strict: false,
            ..ProtocolConfig::new(ProtocolVariant::Ordered)
        };
        let policy = config.policy();
        assert_eq!(policy.checksum, ChecksumPolicy::Abort);
        assert!(policy.scan.skip_line_terminator);
        assert_eq!(policy.rules.ordering, Some(Severity::Warning));
        assert_eq!(policy.rules.sequence, None);
    }

    #[test]
    fn session_policy_follows_strictness() {
        let strict = ProtocolConfig::new(ProtocolVariant::Session).policy();
        assert_eq!(strict.checksum, ChecksumPolicy::Abort);
        assert!(strict.scan.session_markers);
        assert_eq!(strict.rules.relationships, Some(Severity::Error));

        let lenient = ProtocolConfig {
            strict: false,
            ..ProtocolConfig::new(ProtocolVariant::Session)
        }
        .policy();
        assert_eq!(lenient.checksum, ChecksumPolicy::SkipFrame);
        assert_eq!(lenient.rules.sequence, Some(Severity::Warning));
    }

    #[test]
    fn frame_config_uses_variant_scanning() {
        let config = ProtocolConfig::new(ProtocolVariant::Session).frame_config();
        assert!(config.scan.session_markers);
        assert_eq!(config.max_buffered, lisprims_frame::DEFAULT_MAX_BUFFERED);
    }
}
