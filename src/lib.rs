#![deny(clippy::expect_used, clippy::unwrap_used)]

//! The root of the ACK frame codec library.
//! ACK 帧编解码库的根。

pub mod config;
pub mod error;
pub mod packet;

pub use config::Config;
pub use error::{Error, Result};
pub use packet::ack::{AckFrame, validate_ack_ranges};
pub use packet::codec::{AckCodec, IetfAckCodec};
pub use packet::range::AckRange;
pub use packet::version::Version;
