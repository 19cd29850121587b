//! 定义了ACK编解码的可配置参数。
//! Defines configurable parameters for ACK encoding and decoding.

use crate::error::{Error, Result};

/// The ACK delay exponent used when the peer has not announced one.
/// 对端未声明时使用的ACK延迟指数。
pub const DEFAULT_ACK_DELAY_EXPONENT: u8 = 3;

/// Values above 20 are a transport parameter error.
/// 超过20的值属于传输参数错误。
pub const MAX_ACK_DELAY_EXPONENT: u8 = 20;

/// A structure containing all configurable parameters of the ACK codec.
///
/// 包含ACK编解码器所有可配置参数的结构体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The exponent used to scale the ACK delay on the wire. The real delay is
    /// `raw * 2^ack_delay_exponent` microseconds. Negotiated out-of-band; this
    /// crate only consumes the value.
    ///
    /// 用于缩放线上ACK延迟的指数。实际延迟为 `raw * 2^ack_delay_exponent` 微秒。
    /// 该值在带外协商，本库只负责使用。
    pub ack_delay_exponent: u8,
}

impl Config {
    /// Checks that every parameter is within its permitted range.
    /// 检查每个参数是否都在允许范围内。
    pub fn validate(&self) -> Result<()> {
        if self.ack_delay_exponent > MAX_ACK_DELAY_EXPONENT {
            return Err(Error::InvalidConfig("ack_delay_exponent must not exceed 20"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ack_delay_exponent: DEFAULT_ACK_DELAY_EXPONENT,
        }
    }
}
