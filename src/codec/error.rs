use thiserror::Error;

/// Failure of [`HexCodec::decode`](super::HexCodec::decode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
	/// `byte` at offset `index` of the source is not in `0-9a-fA-F`
	#[error("invalid hex character {:?} at offset {index}", as_char(.byte))]
	InvalidCharacter { index: usize, byte: u8 },
}

fn as_char(byte: &u8) -> char {
	char::from(*byte)
}

impl DecodeError {
	/// Offset of the offending character in the decoded source
	pub fn index(&self) -> usize {
		match self {
			DecodeError::InvalidCharacter { index, .. } => *index,
		}
	}
}
