//! QUIC variable-length integer encoding (RFC 9000 §16).
//! QUIC 变长整数编码（RFC 9000 §16）。
//!
//! | 2MSB | Length  | Usable Bits | Range                 |
//! |------|---------|-------------|-----------------------|
//! | 00   | 1 byte  | 6           | 0–63                  |
//! | 01   | 2 bytes | 14          | 0–16383               |
//! | 10   | 4 bytes | 30          | 0–1073741823          |
//! | 11   | 8 bytes | 62          | 0–4611686018427387903 |

use crate::error::{Error, Result};
use bytes::{Buf, BufMut};

/// Maximum value representable as a varint (2^62 - 1).
/// 变长整数可表示的最大值（2^62 - 1）。
pub const MAX_VARINT: u64 = (1 << 62) - 1;

/// How many bytes are needed to encode `value`.
/// 编码 `value` 所需的字节数。
pub const fn encoded_len(value: u64) -> usize {
    if value <= 63 {
        1
    } else if value <= 16383 {
        2
    } else if value <= 1_073_741_823 {
        4
    } else {
        8
    }
}

/// Reads a varint from the front of `buf`, advancing it.
/// 从 `buf` 前端读取一个变长整数，并推进光标。
pub fn read<B: Buf + ?Sized>(buf: &mut B) -> Result<u64> {
    if !buf.has_remaining() {
        return Err(Error::TruncatedInput);
    }
    let first = buf.get_u8();
    let len = 1usize << (first >> 6);
    if buf.remaining() < len - 1 {
        return Err(Error::TruncatedInput);
    }

    let mut value = u64::from(first & 0x3f);
    for _ in 1..len {
        value = (value << 8) | u64::from(buf.get_u8());
    }
    Ok(value)
}

/// Writes `value` as a varint using the shortest encoding.
/// 使用最短编码将 `value` 写为变长整数。
pub fn write<B: BufMut + ?Sized>(buf: &mut B, value: u64) -> Result<()> {
    if value > MAX_VARINT {
        return Err(Error::VarIntOutOfRange(value));
    }
    let len = encoded_len(value);
    if buf.remaining_mut() < len {
        return Err(Error::BufferTooSmall { needed: len });
    }

    match len {
        1 => buf.put_u8(value as u8),
        2 => buf.put_u16(value as u16 | 0x4000),
        4 => buf.put_u32(value as u32 | 0x8000_0000),
        _ => buf.put_u64(value | 0xc000_0000_0000_0000),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 9000 §A.1 sample encodings.
    #[test]
    fn rfc_test_vectors() {
        let cases: [(&[u8], u64); 4] = [
            (&[0xc2, 0x19, 0x7c, 0x5e, 0xff, 0x14, 0xe8, 0x8c], 151_288_809_941_952_652),
            (&[0x9d, 0x7f, 0x3e, 0x7d], 494_878_333),
            (&[0x7b, 0xbd], 15293),
            (&[0x25], 37),
        ];
        for (bytes, expected) in cases {
            let mut cursor = bytes;
            assert_eq!(read(&mut cursor).unwrap(), expected);
            assert!(cursor.is_empty());

            let mut out = Vec::new();
            write(&mut out, expected).unwrap();
            assert_eq!(out, bytes);
        }
    }

    #[test]
    fn two_byte_encoding_of_small_value_is_accepted() {
        // 0x4025 is a non-minimal encoding of 37.
        let mut cursor: &[u8] = &[0x40, 0x25];
        assert_eq!(read(&mut cursor).unwrap(), 37);
    }

    #[test]
    fn encoded_len_boundaries() {
        assert_eq!(encoded_len(0), 1);
        assert_eq!(encoded_len(63), 1);
        assert_eq!(encoded_len(64), 2);
        assert_eq!(encoded_len(16383), 2);
        assert_eq!(encoded_len(16384), 4);
        assert_eq!(encoded_len(1_073_741_823), 4);
        assert_eq!(encoded_len(1_073_741_824), 8);
        assert_eq!(encoded_len(MAX_VARINT), 8);
    }

    #[test]
    fn read_truncated() {
        let mut empty: &[u8] = &[];
        assert_eq!(read(&mut empty), Err(Error::TruncatedInput));

        // 4-byte prefix with only two bytes following.
        let mut short: &[u8] = &[0x80, 0x01, 0x02];
        assert_eq!(read(&mut short), Err(Error::TruncatedInput));
    }

    #[test]
    fn write_into_full_slice() {
        let mut storage = [0u8; 1];
        let mut out: &mut [u8] = &mut storage;
        assert_eq!(
            write(&mut out, 16384),
            Err(Error::BufferTooSmall { needed: 4 })
        );
    }

    #[test]
    fn write_out_of_range() {
        let mut out = Vec::new();
        assert_eq!(
            write(&mut out, MAX_VARINT + 1),
            Err(Error::VarIntOutOfRange(MAX_VARINT + 1))
        );
        assert!(out.is_empty());
    }
}
