//! Allocation-free hexadecimal encoding and decoding of byte buffers

pub mod codec;
pub mod config;
mod util;

pub use codec::from_hex::{FromHex, ToHex};
pub use codec::{decoded_len, encoded_len, CaseMode, DecodeError, HexCodec};
pub use config::Config;
