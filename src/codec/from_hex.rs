//! Owned-buffer helpers on top of [`HexCodec`], for callers that don't manage their own buffers

use super::{decoded_len, encoded_len, CaseMode, DecodeError, HexCodec};

pub trait FromHex: Sized {
	/// Decodes `hex` with the same rules as [`HexCodec::decode`]
	fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, DecodeError>;
}

impl FromHex for Vec<u8> {
	fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, DecodeError> {
		let hex = hex.as_ref();
		let mut result = vec![0u8; decoded_len(hex.len())];
		let n = HexCodec::default().decode(&mut result, hex)?;
		debug_assert_eq!(n, result.len());
		Ok(result)
	}
}

pub trait ToHex {
	/// Lowercase hex representation
	fn to_hex(&self) -> String {
		self.to_hex_with(CaseMode::Lower)
	}

	fn to_hex_with(&self, mode: CaseMode) -> String;
}

impl ToHex for [u8] {
	fn to_hex_with(&self, mode: CaseMode) -> String {
		let mut result = vec![0u8; encoded_len(self.len())];
		HexCodec::new(mode).encode(&mut result, self);
		String::from_utf8(result).expect("hex output is ASCII")
	}
}
