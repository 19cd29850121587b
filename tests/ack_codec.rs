//! ACK 帧编解码的集成测试
//! Integration tests for ACK frame encoding and decoding

pub mod common;

use bytes::BytesMut;
use common::harness::{init_tracing, random_frame};
use kestrel_ack::packet::ack::encode_ack_delay;
use kestrel_ack::packet::codec::ACK_FRAME_TYPE;
use kestrel_ack::{AckCodec, AckFrame, AckRange, Config, Error, IetfAckCodec, Version};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::info;

/// 长度计算必须与编码器实际写入的字节数一致
#[test]
fn encoded_len_matches_encoder_output() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(0x00ac_4c0d);
    let codec = IetfAckCodec::default();

    for _ in 0..50 {
        let frame = random_frame(&mut rng);
        let mut buf = BytesMut::new();
        codec.encode(&frame, &mut buf).unwrap();
        assert_eq!(
            codec.encoded_len(&frame),
            buf.len(),
            "length mismatch for {} ranges",
            frame.ranges().len()
        );
    }
}

/// 编码后再解码应还原范围列表，延迟按指数粒度截断
#[test]
fn random_frames_roundtrip() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(7);

    for exponent in [0u8, 3, 20] {
        let config = Config { ack_delay_exponent: exponent };
        let codec = IetfAckCodec::new(config).unwrap();
        let granularity = Duration::from_micros(1 << exponent);

        for _ in 0..50 {
            let frame = random_frame(&mut rng);
            let mut buf = BytesMut::new();
            codec.encode(&frame, &mut buf).unwrap();

            let mut cursor = &buf[..];
            let decoded = codec.decode(&mut cursor).unwrap();
            assert!(cursor.is_empty());
            assert_eq!(decoded.ranges(), frame.ranges());

            let expected_units = encode_ack_delay(frame.delay(), exponent);
            assert_eq!(decoded.delay(), granularity * expected_units as u32);
            assert!(decoded.delay() <= frame.delay());
            assert!(frame.delay() - decoded.delay() < granularity);
        }
    }
}

/// 成员查询与逐个范围扫描的结果一致
#[test]
fn acks_packet_agrees_with_ranges() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let frame = random_frame(&mut rng);
        for range in frame.ranges() {
            assert!(frame.acks_packet(range.smallest));
            assert!(frame.acks_packet(range.largest));
        }
        for pair in frame.ranges().windows(2) {
            // The packet right below a range's lower bound is always unacknowledged.
            assert!(!frame.acks_packet(pair[0].smallest - 1));
            assert!(!frame.acks_packet(pair[1].largest + 1));
        }
        assert!(!frame.acks_packet(frame.largest_acked() + 1));
    }
}

/// 多个范围的帧在线上的 range_count 字段
#[test]
fn range_count_on_the_wire() {
    init_tracing();
    let frame = AckFrame::new(
        vec![
            AckRange::new(90, 99),
            AckRange::new(60, 70),
            AckRange::new(20, 30),
        ],
        Duration::ZERO,
    )
    .unwrap();
    let mut buf = BytesMut::new();
    frame.encode(&mut buf, Version::V1).unwrap();

    assert_eq!(buf[0], ACK_FRAME_TYPE);
    // type, largest_acked (99 takes two bytes), delay, range_count
    assert_eq!(buf[4], 2);
    info!(bytes = buf.len(), "encoded three-range frame");
}

/// 解码错误对整个帧是终止性的
#[test]
fn malformed_frames_are_rejected() {
    init_tracing();
    let cases: [(&[u8], Error); 4] = [
        (&[ACK_FRAME_TYPE, 3, 0, 0, 4], Error::InvalidFirstRange),
        (&[ACK_FRAME_TYPE, 3, 0, 1, 0, 2, 0], Error::InvalidAckRanges),
        (&[ACK_FRAME_TYPE, 3, 0, 1, 0], Error::TruncatedInput),
        (&[ACK_FRAME_TYPE], Error::TruncatedInput),
    ];

    for (bytes, expected) in cases {
        let mut cursor = bytes;
        let err = AckFrame::decode(&mut cursor, Version::V1).unwrap_err();
        assert_eq!(err, expected);
        assert!(err.is_protocol_violation());
    }
}
