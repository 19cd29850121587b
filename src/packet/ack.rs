//! 定义了ACK帧的内存模型、范围校验与成员查询。
//! Defines the in-memory ACK frame, its range validator and the membership query.
//!
//! An [`AckFrame`] always holds a non-empty, strictly descending list of
//! non-adjacent ranges. The only ways to obtain one are [`AckFrame::new`] and
//! the decoders, and both run [`validate_ack_ranges`].

use super::codec::AckCodec;
use super::range::AckRange;
use super::varint::MAX_VARINT;
use super::version::{self, Version};
use crate::config::Config;
use crate::error::{Error, Result};
use bytes::{Buf, BufMut};
use std::time::Duration;
use tokio::time::Instant;

/// Checks that a list of ranges is well formed.
///
/// - the list is not empty
/// - every range has `smallest <= largest`
/// - for every adjacent pair `(prev, cur)`: `prev.smallest > cur.smallest`
///   and `prev.smallest > cur.largest + 1`
///
/// 检查范围列表是否格式正确：非空；每个范围 `smallest <= largest`；
/// 相邻范围之间至少隔着一个未确认的包。
pub fn validate_ack_ranges(ranges: &[AckRange]) -> bool {
    if ranges.is_empty() {
        return false;
    }

    if ranges.iter().any(|range| range.smallest > range.largest) {
        return false;
    }

    for pair in ranges.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if prev.smallest <= cur.smallest {
            return false;
        }
        // `cur.largest + 1` may only overflow when cur.largest == u64::MAX, in
        // which case prev cannot lie above it anyway.
        match cur.largest.checked_add(1) {
            Some(bound) if prev.smallest > bound => {}
            _ => return false,
        }
    }

    true
}

/// Converts a raw wire delay into a duration: `raw * 2^exponent` microseconds.
/// Saturates instead of wrapping on overflow.
///
/// 将线上的原始延迟值转换为时长：`raw * 2^exponent` 微秒。溢出时饱和而非回绕。
pub fn decode_ack_delay(raw: u64, exponent: u8) -> Duration {
    let scale = 1u64.checked_shl(u32::from(exponent)).unwrap_or(u64::MAX);
    Duration::from_micros(raw.saturating_mul(scale))
}

/// Converts a duration into its raw wire value, truncating toward zero to the
/// `2^exponent` microsecond granularity. Clamped to the varint range.
///
/// 将时长转换为线上原始值，按 `2^exponent` 微秒粒度向零截断，并限制在变长整数范围内。
pub fn encode_ack_delay(delay: Duration, exponent: u8) -> u64 {
    let unit = 1000u128.checked_shl(u32::from(exponent)).unwrap_or(u128::MAX);
    let raw = delay.as_nanos() / unit;
    u64::try_from(raw).unwrap_or(u64::MAX).min(MAX_VARINT)
}

/// An ACK frame: the acknowledged ranges plus the reported ACK delay.
/// ACK帧：已确认的范围以及上报的ACK延迟。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckFrame {
    /// Strictly descending; the largest range comes first.
    ranges: Vec<AckRange>,
    /// Time between receiving the largest acknowledged packet and sending this frame.
    delay: Duration,
    /// When the packet carrying this frame arrived. Never set by the codec.
    received_time: Option<Instant>,
}

impl AckFrame {
    /// Creates a frame from programmatically assembled ranges.
    /// Fails with [`Error::InvalidAckRanges`] if the list does not validate.
    ///
    /// 从程序组装的范围创建帧。若列表未通过校验，返回 [`Error::InvalidAckRanges`]。
    pub fn new(ranges: Vec<AckRange>, delay: Duration) -> Result<Self> {
        if !validate_ack_ranges(&ranges) {
            return Err(Error::InvalidAckRanges);
        }
        Ok(Self::from_validated(ranges, delay))
    }

    /// Creates a frame acknowledging exactly one packet.
    /// 创建只确认一个包的帧。
    pub fn single(packet_number: u64, delay: Duration) -> Self {
        Self::from_validated(vec![AckRange::single(packet_number)], delay)
    }

    pub(crate) fn from_validated(ranges: Vec<AckRange>, delay: Duration) -> Self {
        debug_assert!(validate_ack_ranges(&ranges));
        Self {
            ranges,
            delay,
            received_time: None,
        }
    }

    /// Records the arrival time of the packet that carried this frame.
    /// 记录携带此帧的包的到达时间。
    pub fn with_received_time(mut self, received_time: Instant) -> Self {
        self.received_time = Some(received_time);
        self
    }

    /// See [`with_received_time`](Self::with_received_time).
    pub fn set_received_time(&mut self, received_time: Instant) {
        self.received_time = Some(received_time);
    }

    /// The acknowledged ranges, largest first.
    /// 已确认的范围，最大的在前。
    pub fn ranges(&self) -> &[AckRange] {
        &self.ranges
    }

    /// The ACK delay reported by the receiver.
    /// 接收方上报的ACK延迟。
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arrival time of the carrying packet, if the caller recorded one.
    /// 携带此帧的包的到达时间（若调用方已记录）。
    pub fn received_time(&self) -> Option<Instant> {
        self.received_time
    }

    /// The largest acknowledged packet number.
    /// 最大的已确认包号。
    pub fn largest_acked(&self) -> u64 {
        self.ranges[0].largest
    }

    /// The lowest acknowledged packet number.
    /// 最小的已确认包号。
    pub fn lowest_acked(&self) -> u64 {
        self.ranges[self.ranges.len() - 1].smallest
    }

    /// Whether the frame reports any missing packets between its extremes.
    /// 帧是否报告了最大与最小确认包号之间缺失的包。
    pub fn has_missing_ranges(&self) -> bool {
        self.ranges.len() > 1
    }

    /// Determines whether `packet_number` is acknowledged by this frame.
    /// Runs in O(log R) for R ranges.
    ///
    /// 判断此帧是否确认了 `packet_number`。对 R 个范围的复杂度为 O(log R)。
    pub fn acks_packet(&self, packet_number: u64) -> bool {
        if packet_number < self.lowest_acked() || packet_number > self.largest_acked() {
            return false;
        }

        // Ranges descend by `smallest`, so `smallest > packet_number` holds for a prefix.
        let index = self
            .ranges
            .partition_point(|range| range.smallest > packet_number);
        // index < len, since packet_number >= lowest_acked.
        self.ranges
            .get(index)
            .is_some_and(|range| packet_number <= range.largest)
    }

    /// Iterates over every acknowledged packet number, from largest to lowest.
    /// 从大到小遍历所有已确认的包号。
    pub fn acked_packets(&self) -> impl Iterator<Item = u64> + '_ {
        self.ranges
            .iter()
            .flat_map(|range| (range.smallest..=range.largest).rev())
    }

    // --- Version-dispatching wrappers ---
    // Each call selects a codec for the version. Callers encoding or decoding
    // many frames should select once with `select_codec`, or hold an
    // `IetfAckCodec`, and call it directly.
    // 每次调用都会为版本选择编解码器。批量处理时应只选择一次并直接复用。

    /// Decodes a frame with the default configuration.
    /// 使用默认配置解码帧。
    pub fn decode<B: Buf>(buf: &mut B, version: Version) -> Result<Self> {
        Self::decode_with_config(buf, version, &Config::default())
    }

    /// Decodes a frame using the codec selected for `version`.
    /// 使用为 `version` 选择的编解码器解码帧。
    pub fn decode_with_config<B: Buf>(buf: &mut B, version: Version, config: &Config) -> Result<Self> {
        version::select_codec(version, config)?.decode(buf)
    }

    /// Encodes the frame with the default configuration.
    /// 使用默认配置编码帧。
    pub fn encode<B: BufMut>(&self, buf: &mut B, version: Version) -> Result<()> {
        self.encode_with_config(buf, version, &Config::default())
    }

    /// Encodes the frame using the codec selected for `version`.
    /// 使用为 `version` 选择的编解码器编码帧。
    pub fn encode_with_config<B: BufMut>(&self, buf: &mut B, version: Version, config: &Config) -> Result<()> {
        version::select_codec(version, config)?.encode(self, buf)
    }

    /// The exact number of bytes [`encode`](Self::encode) writes for `version`.
    /// [`encode`](Self::encode) 针对 `version` 写入的确切字节数。
    pub fn encoded_len(&self, version: Version) -> Result<usize> {
        self.encoded_len_with_config(version, &Config::default())
    }

    /// The delay field's width depends on the configured ACK delay exponent.
    pub fn encoded_len_with_config(&self, version: Version, config: &Config) -> Result<usize> {
        Ok(version::select_codec(version, config)?.encoded_len(self))
    }
}
