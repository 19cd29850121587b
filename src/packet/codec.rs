//! ACK帧的线上编解码。
//! Wire encoding and decoding of ACK frames.
//!
//! ```text
//! [type byte]
//! [largest_acked: varint]
//! [ack_delay: varint]
//! [range_count: varint]
//! [first_range_length: varint]
//! { [gap: varint] [range_length: varint] } * range_count
//! ```
//!
//! Every range after the first is expressed relative to the lower bound of the
//! range before it, so each field only decodes against a running cursor.

use super::ack::{AckFrame, decode_ack_delay, encode_ack_delay, validate_ack_ranges};
use super::range::AckRange;
use super::varint;
use crate::config::Config;
use crate::error::{Error, Result};
use bytes::{Buf, BufMut};
use std::convert::Infallible;
use std::fmt;
use tracing::{debug, trace};

/// The frame type byte written in front of every ACK frame.
/// 写在每个ACK帧前面的帧类型字节。
pub const ACK_FRAME_TYPE: u8 = 0x0d;

/// A wire format for ACK frames. Callers pick an implementation per
/// protocol version, see [`select_codec`](super::version::select_codec).
///
/// ACK帧的线上格式。调用方按协议版本选择实现，
/// 见 [`select_codec`](super::version::select_codec)。
pub trait AckCodec: fmt::Debug + Send + Sync {
    /// Decodes one frame, starting at its type byte.
    /// No partial frame is ever returned.
    ///
    /// 从类型字节开始解码一个帧。绝不返回部分解码的帧。
    fn decode(&self, buf: &mut dyn Buf) -> Result<AckFrame>;

    /// Encodes an already validated frame. On failure nothing has been
    /// written to `buf`.
    ///
    /// 编码一个已校验的帧。失败时不会向 `buf` 写入任何内容。
    fn encode(&self, frame: &AckFrame, buf: &mut dyn BufMut) -> Result<()>;

    /// The exact number of bytes [`encode`](Self::encode) would write.
    /// [`encode`](Self::encode) 将写入的确切字节数。
    fn encoded_len(&self, frame: &AckFrame) -> usize;
}

/// The gap/length chained ACK format of the IETF frame layout.
/// IETF 帧布局中基于间隔/长度链式编码的ACK格式。
#[derive(Debug, Clone, Default)]
pub struct IetfAckCodec {
    config: Config,
}

impl IetfAckCodec {
    /// Creates a codec, rejecting an out-of-range configuration.
    /// 创建编解码器，拒绝超出范围的配置。
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this codec was created with.
    /// 创建此编解码器时使用的配置。
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Feeds every varint field after the type byte to `emit`, in wire order.
    /// The encoder and the length calculator share this walk so the two
    /// cannot drift apart.
    fn wire_fields<F, E>(&self, frame: &AckFrame, mut emit: F) -> std::result::Result<(), E>
    where
        F: FnMut(u64) -> std::result::Result<(), E>,
    {
        let ranges = frame.ranges();
        let first = ranges[0];

        emit(first.largest)?;
        emit(encode_ack_delay(frame.delay(), self.config.ack_delay_exponent))?;
        emit(ranges.len() as u64 - 1)?;
        emit(first.largest - first.smallest)?;

        // The frame validated on construction, so none of these subtractions underflow.
        let mut lowest = first.smallest;
        for range in &ranges[1..] {
            emit(lowest - range.largest - 2)?;
            emit(range.largest - range.smallest)?;
            lowest = range.smallest;
        }
        Ok(())
    }
}

impl AckCodec for IetfAckCodec {
    fn decode(&self, buf: &mut dyn Buf) -> Result<AckFrame> {
        if !buf.has_remaining() {
            return Err(Error::TruncatedInput);
        }
        // Flag bits in the type byte are not interpreted here.
        let _frame_type = buf.get_u8();

        let largest_acked = varint::read(buf)?;
        let delay_raw = varint::read(buf)?;
        let delay = decode_ack_delay(delay_raw, self.config.ack_delay_exponent);
        let range_count = varint::read(buf)?;

        let first_range_length = varint::read(buf)?;
        let Some(mut smallest) = largest_acked.checked_sub(first_range_length) else {
            debug!(
                largest_acked,
                first_range_length, "Rejecting ACK frame: first range underflows"
            );
            return Err(Error::InvalidFirstRange);
        };

        // Each further range takes at least two bytes, which bounds the
        // preallocation regardless of the claimed range count.
        let capacity = usize::try_from(range_count)
            .unwrap_or(usize::MAX)
            .min(buf.remaining() / 2)
            .saturating_add(1);
        let mut ranges = Vec::with_capacity(capacity);
        ranges.push(AckRange::new(smallest, largest_acked));

        for range_index in 1..=range_count {
            let gap = varint::read(buf)?;
            let Some(largest) = gap
                .checked_add(2)
                .and_then(|distance| smallest.checked_sub(distance))
            else {
                debug!(
                    range_index,
                    smallest, gap, "Rejecting ACK frame: gap underflows"
                );
                return Err(Error::InvalidAckRanges);
            };

            let range_length = varint::read(buf)?;
            let Some(next_smallest) = largest.checked_sub(range_length) else {
                debug!(
                    range_index,
                    largest, range_length, "Rejecting ACK frame: range length underflows"
                );
                return Err(Error::InvalidAckRanges);
            };

            smallest = next_smallest;
            ranges.push(AckRange::new(smallest, largest));
        }

        if !validate_ack_ranges(&ranges) {
            debug!(ranges = ranges.len(), "Rejecting ACK frame: inconsistent ranges");
            return Err(Error::InvalidAckRanges);
        }

        trace!(
            largest_acked,
            ranges = ranges.len(),
            delay_us = delay.as_micros() as u64,
            "ACK frame decoded"
        );
        Ok(AckFrame::from_validated(ranges, delay))
    }

    /// Nothing is written unless the whole frame fits, so a failed encode
    /// leaves the sink untouched.
    fn encode(&self, frame: &AckFrame, buf: &mut dyn BufMut) -> Result<()> {
        // Every other field is bounded by the largest acknowledged packet number.
        let largest_acked = frame.largest_acked();
        if largest_acked > varint::MAX_VARINT {
            return Err(Error::VarIntOutOfRange(largest_acked));
        }
        let needed = self.encoded_len(frame);
        if buf.remaining_mut() < needed {
            debug!(needed, available = buf.remaining_mut(), "No room for ACK frame");
            return Err(Error::BufferTooSmall { needed });
        }

        buf.put_u8(ACK_FRAME_TYPE);
        self.wire_fields(frame, |value| varint::write(buf, value))?;

        trace!(
            largest_acked,
            ranges = frame.ranges().len(),
            "ACK frame encoded"
        );
        Ok(())
    }

    fn encoded_len(&self, frame: &AckFrame) -> usize {
        let mut len = 1;
        let Ok(()) = self.wire_fields::<_, Infallible>(frame, |value| {
            len += varint::encoded_len(value);
            Ok(())
        });
        len
    }
}
