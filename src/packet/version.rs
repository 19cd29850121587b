//! 协议版本标签以及按版本选择ACK编解码器。
//! Protocol version tags and per-version ACK codec selection.

use super::codec::{AckCodec, IetfAckCodec};
use crate::config::Config;
use crate::error::{Error, Result};
use std::fmt;
use tracing::debug;

/// A protocol version number as carried in long headers.
/// 长头中携带的协议版本号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(pub u32);

impl Version {
    /// QUIC version 1.
    pub const V1: Version = Version(0x0000_0001);
    /// IETF draft 13, the first draft using the gap/length ACK layout.
    pub const DRAFT_13: Version = Version(0xff00_000d);
    /// Google QUIC 43, which uses the legacy frame layout.
    pub const GQUIC_43: Version = Version(u32::from_be_bytes(*b"Q043"));

    /// Legacy versions are tagged with an ASCII `Q` in the top byte.
    /// 旧版本在最高字节以 ASCII `Q` 标记。
    pub fn uses_ietf_frame_format(self) -> bool {
        self.0.to_be_bytes()[0] != b'Q'
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0.to_be_bytes();
        if !self.uses_ietf_frame_format() && bytes.iter().all(u8::is_ascii_alphanumeric) {
            // Displays as e.g. "Q043".
            write!(f, "{}", String::from_utf8_lossy(&bytes))
        } else {
            write!(f, "{:#010x}", self.0)
        }
    }
}

/// Selects the ACK codec implementing `version`'s frame layout.
///
/// Only the IETF layout lives in this crate; legacy versions are answered with
/// [`Error::UnsupportedVersion`] so the caller can route them to its own codec.
///
/// 选择实现 `version` 帧布局的ACK编解码器。本库只包含IETF布局，
/// 旧版本返回 [`Error::UnsupportedVersion`]，由调用方交给其自己的编解码器处理。
pub fn select_codec(version: Version, config: &Config) -> Result<Box<dyn AckCodec>> {
    if !version.uses_ietf_frame_format() {
        debug!(%version, "No ACK codec for legacy frame format");
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(Box::new(IetfAckCodec::new(config.clone())?))
}
