//! 定义了ACK范围，即一段连续的已确认包号。
//! Defines the ACK range, a contiguous run of acknowledged packet numbers.

use std::fmt;
use std::ops::RangeInclusive;

/// Represents a closed range of acknowledged packet numbers.
/// 代表一个闭区间的已确认包号范围。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AckRange {
    /// The lowest acknowledged packet number in the range (inclusive).
    /// 范围内最小的已确认包号（包含）。
    pub smallest: u64,
    /// The highest acknowledged packet number in the range (inclusive).
    /// 范围内最大的已确认包号（包含）。
    pub largest: u64,
}

impl AckRange {
    /// Creates a new range. The bounds are not checked here; a list of ranges
    /// is checked as a whole by [`validate_ack_ranges`](crate::packet::ack::validate_ack_ranges).
    ///
    /// 创建一个新的范围。此处不检查边界，范围列表由
    /// [`validate_ack_ranges`](crate::packet::ack::validate_ack_ranges) 整体检查。
    pub const fn new(smallest: u64, largest: u64) -> Self {
        Self { smallest, largest }
    }

    /// A range acknowledging exactly one packet.
    /// 只确认一个包的范围。
    pub const fn single(packet_number: u64) -> Self {
        Self::new(packet_number, packet_number)
    }

    /// Number of packets covered by the range.
    /// 范围覆盖的包数量。
    pub fn packet_count(&self) -> u64 {
        self.largest.saturating_sub(self.smallest).saturating_add(1)
    }

    /// Whether `packet_number` lies within the range.
    /// `packet_number` 是否位于范围内。
    pub fn contains(&self, packet_number: u64) -> bool {
        self.smallest <= packet_number && packet_number <= self.largest
    }
}

impl From<RangeInclusive<u64>> for AckRange {
    fn from(range: RangeInclusive<u64>) -> Self {
        Self {
            smallest: *range.start(),
            largest: *range.end(),
        }
    }
}

impl fmt::Display for AckRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.smallest, self.largest)
    }
}
