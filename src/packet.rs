//! The packet module, containing the ACK frame model and its wire codec.
//! packet 模块，包含ACK帧模型及其线上编解码。

pub mod ack;
pub mod codec;
pub mod range;
pub mod varint;
pub mod version;
