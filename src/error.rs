//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use crate::packet::version::Version;
use thiserror::Error;

/// The primary error type for the ACK codec library.
/// ACK 编解码库的主要错误类型。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The cursor ran out of bytes in the middle of a field.
    /// 光标在读取字段的过程中耗尽了字节。
    #[error("truncated input")]
    TruncatedInput,

    /// The first ACK range is longer than the largest acknowledged packet number.
    /// 第一个ACK范围的长度超过了最大确认包号。
    #[error("invalid first ACK range")]
    InvalidFirstRange,

    /// A gap or range length would underflow, or the assembled ranges are
    /// not strictly descending with a gap between them.
    ///
    /// 间隔或范围长度会下溢，或者组装后的范围没有严格降序且互不相邻。
    #[error("invalid ACK ranges")]
    InvalidAckRanges,

    /// The value does not fit into a variable-length integer (2^62 - 1).
    /// 该值无法用变长整数表示（最大 2^62 - 1）。
    #[error("value {0} exceeds the varint range")]
    VarIntOutOfRange(u64),

    /// The output buffer has no room for the next field.
    /// 输出缓冲区没有空间容纳下一个字段。
    #[error("buffer too small, need {needed} bytes")]
    BufferTooSmall { needed: usize },

    /// No ACK codec in this crate handles the given version's frame format.
    /// 本库没有处理该版本帧格式的ACK编解码器。
    #[error("unsupported frame format for version {0}")]
    UnsupportedVersion(Version),

    /// A configuration value is outside of its permitted range.
    /// 配置值超出允许范围。
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl Error {
    /// Whether the error was caused by malformed bytes from the peer.
    /// A connection receiving one of these should treat it as a protocol violation.
    ///
    /// 该错误是否由对端发送的畸形字节引起。
    /// 收到此类错误的连接应将其视为协议违规。
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Error::TruncatedInput | Error::InvalidFirstRange | Error::InvalidAckRanges
        )
    }
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;
        let kind = match err {
            Error::TruncatedInput => ErrorKind::UnexpectedEof,
            Error::InvalidFirstRange | Error::InvalidAckRanges => ErrorKind::InvalidData,
            Error::BufferTooSmall { .. } => ErrorKind::WriteZero,
            Error::VarIntOutOfRange(_) | Error::UnsupportedVersion(_) | Error::InvalidConfig(_) => {
                ErrorKind::InvalidInput
            }
        };
        std::io::Error::new(kind, err)
    }
}
