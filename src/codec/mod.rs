//! Buffer-based hexadecimal encoding and decoding
//!
//! Neither operation allocates: the caller reserves the destination, sized with [`encoded_len`]
//! or [`decoded_len`], and gets back the number of bytes written.

pub mod error;
pub mod from_hex;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

pub use self::error::DecodeError;

/// Alphabet used when encoding. Decoding accepts both.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
	/// `0-9a-f`
	#[default]
	Lower = 0,
	/// `0-9A-F`
	Upper = 1,
}

// Indexed by `CaseMode as usize`, then by nibble
const ENCODE_TABLE: [[u8; 16]; 2] = [*b"0123456789abcdef", *b"0123456789ABCDEF"];

const INVALID: u8 = 0xff;

const fn gen_decode_table() -> [u8; 256] {
	let mut table = [INVALID; 256];
	let mut i = 0u8;
	while i < 10 {
		table[(b'0' + i) as usize] = i;
		i += 1;
	}
	let mut i = 0u8;
	while i < 6 {
		table[(b'a' + i) as usize] = 10 + i;
		table[(b'A' + i) as usize] = 10 + i;
		i += 1;
	}
	table
}

// Nibble value of every ASCII hex character, INVALID for everything else
const DECODE_TABLE: [u8; 256] = gen_decode_table();

/// Number of hex characters [`HexCodec::encode`] writes for `len` source bytes
pub const fn encoded_len(len: usize) -> usize {
	len * 2
}

/// Number of bytes [`HexCodec::decode`] writes for `len` source characters. A trailing odd
/// character is not counted.
pub const fn decoded_len(len: usize) -> usize {
	len / 2
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HexCodec {
	mode: CaseMode,
}

impl HexCodec {
	pub const fn new(mode: CaseMode) -> Self {
		HexCodec { mode }
	}

	pub const fn lower() -> Self {
		Self::new(CaseMode::Lower)
	}

	pub const fn upper() -> Self {
		Self::new(CaseMode::Upper)
	}

	pub const fn mode(&self) -> CaseMode {
		self.mode
	}

	/// Writes the hex representation of `src` into `dst[..2 * src.len()]`, high nibble first, and
	/// returns the number of characters written. `dst` past that point is left untouched.
	///
	/// # Panics
	/// If `dst` is shorter than [`encoded_len`]`(src.len())`
	pub fn encode(&self, dst: &mut [u8], src: &[u8]) -> usize {
		let n = encoded_len(src.len());
		assert!(
			dst.len() >= n,
			"hex encode destination too small: {} bytes, {n} needed",
			dst.len()
		);
		trace!("encoding {} bytes as {:?} hex", src.len(), self.mode);

		let table = &ENCODE_TABLE[self.mode as usize];
		for (pair, byte) in dst[..n].chunks_exact_mut(2).zip(src) {
			pair[0] = table[(byte >> 4) as usize];
			pair[1] = table[(byte & 0x0f) as usize];
		}
		n
	}

	/// Decodes pairs of hex characters from `src` into `dst[..src.len() / 2]`, accepting either
	/// case regardless of [`CaseMode`], and returns the number of bytes written.
	///
	/// A trailing character of an odd-length `src` is validated, then ignored.
	///
	/// # Errors
	/// [`DecodeError::InvalidCharacter`] at the first character outside `0-9a-fA-F`. Pairs before
	/// it have already been written to `dst`.
	///
	/// # Panics
	/// If `dst` is shorter than [`decoded_len`]`(src.len())`
	pub fn decode(&self, dst: &mut [u8], src: &[u8]) -> Result<usize, DecodeError> {
		let n = decoded_len(src.len());
		assert!(
			dst.len() >= n,
			"hex decode destination too small: {} bytes, {n} needed",
			dst.len()
		);
		trace!("decoding {} hex characters", src.len());

		for (i, (out, pair)) in dst[..n].iter_mut().zip(src.chunks_exact(2)).enumerate() {
			let hi = DECODE_TABLE[pair[0] as usize];
			let lo = DECODE_TABLE[pair[1] as usize];
			if (hi | lo) > 0x0f {
				let err = if hi == INVALID {
					DecodeError::InvalidCharacter {
						index: 2 * i,
						byte: pair[0],
					}
				} else {
					DecodeError::InvalidCharacter {
						index: 2 * i + 1,
						byte: pair[1],
					}
				};
				debug!("hex decode failed: {err}");
				return Err(err);
			}
			*out = hi << 4 | lo;
		}

		if let [.., last] = src.chunks_exact(2).remainder() {
			if DECODE_TABLE[*last as usize] == INVALID {
				let err = DecodeError::InvalidCharacter {
					index: src.len() - 1,
					byte: *last,
				};
				debug!("hex decode failed: {err}");
				return Err(err);
			}
			debug!(
				"ignoring trailing hex character at offset {}",
				src.len() - 1
			);
		}
		Ok(n)
	}
}

impl From<CaseMode> for HexCodec {
	fn from(mode: CaseMode) -> Self {
		HexCodec::new(mode)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn encode_to_vec(codec: HexCodec, src: &[u8]) -> Vec<u8> {
		let mut buf = vec![0u8; 255];
		let n = codec.encode(&mut buf, src);
		buf.truncate(n);
		buf
	}

	fn decode_to_vec(codec: HexCodec, src: &[u8]) -> Result<Vec<u8>, DecodeError> {
		let mut buf = vec![0u8; 255];
		let n = codec.decode(&mut buf, src)?;
		buf.truncate(n);
		Ok(buf)
	}

	#[test]
	fn default_mode_is_lower() {
		assert_eq!(HexCodec::default().mode(), CaseMode::Lower);
		assert_eq!(HexCodec::default(), HexCodec::lower());
	}

	#[test]
	fn encode_lower() {
		let cases: &[(&[u8], &str)] = &[
			(&[0, 0, 0], "000000"),
			(&[1, 1, 1], "010101"),
			(&[9, 9, 9], "090909"),
			(&[10, 255, 255], "0affff"),
		];
		for (input, expected) in cases {
			assert_eq!(encode_to_vec(HexCodec::default(), input), expected.as_bytes());
		}
	}

	#[test]
	fn encode_upper() {
		assert_eq!(encode_to_vec(HexCodec::upper(), &[10, 255, 255]), b"0AFFFF");
	}

	#[test]
	fn encode_empty() {
		let mut buf = [0u8; 0];
		assert_eq!(HexCodec::default().encode(&mut buf, &[]), 0);
	}

	#[test]
	fn encode_leaves_rest_of_destination_alone() {
		let mut buf = [b'x'; 8];
		let n = HexCodec::default().encode(&mut buf, &[0xab, 0xcd]);
		assert_eq!(n, 4);
		assert_eq!(&buf, b"abcdxxxx");
	}

	#[test]
	fn encode_alphabet_conformance() {
		let all: Vec<u8> = (0..=255).collect();

		let lower = encode_to_vec_sized(HexCodec::lower(), &all);
		assert!(lower.iter().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')));

		let upper = encode_to_vec_sized(HexCodec::upper(), &all);
		assert!(upper.iter().all(|c| matches!(c, b'0'..=b'9' | b'A'..=b'F')));
	}

	fn encode_to_vec_sized(codec: HexCodec, src: &[u8]) -> Vec<u8> {
		let mut buf = vec![0u8; encoded_len(src.len())];
		assert_eq!(codec.encode(&mut buf, src), buf.len());
		buf
	}

	#[test]
	#[should_panic(expected = "destination too small")]
	fn encode_panics_on_small_destination() {
		let mut buf = [0u8; 3];
		HexCodec::default().encode(&mut buf, &[1, 2]);
	}

	#[test]
	fn decode_lower() {
		let cases: &[(&str, &[u8])] = &[
			("000000", &[0, 0, 0]),
			("010101", &[1, 1, 1]),
			("090909", &[9, 9, 9]),
			("0affff", &[10, 255, 255]),
		];
		for (input, expected) in cases {
			assert_eq!(
				decode_to_vec(HexCodec::default(), input.as_bytes()).unwrap(),
				*expected
			);
		}
	}

	#[test]
	fn decode_ignores_case_mode() {
		for codec in [HexCodec::lower(), HexCodec::upper()] {
			for input in ["0affff", "0AFFFF", "0aFfFf"] {
				assert_eq!(
					decode_to_vec(codec, input.as_bytes()).unwrap(),
					[10, 255, 255]
				);
			}
		}
	}

	#[test]
	fn decode_invalid_character() {
		let err = decode_to_vec(HexCodec::default(), b"00g1").unwrap_err();
		assert_eq!(
			err,
			DecodeError::InvalidCharacter {
				index: 2,
				byte: b'g'
			}
		);
	}

	#[test]
	fn decode_invalid_low_nibble() {
		let err = decode_to_vec(HexCodec::default(), b"0a1 ").unwrap_err();
		assert_eq!(
			err,
			DecodeError::InvalidCharacter {
				index: 3,
				byte: b' '
			}
		);
	}

	#[test]
	fn decode_rejects_non_ascii() {
		let err = decode_to_vec(HexCodec::default(), "0é".as_bytes()).unwrap_err();
		assert_eq!(err.index(), 1);
	}

	#[test]
	fn decode_odd_length_drops_trailing_character() {
		assert_eq!(
			decode_to_vec(HexCodec::default(), b"0aff1").unwrap(),
			[0x0a, 0xff]
		);
		assert_eq!(
			decode_to_vec(HexCodec::default(), b"0affF").unwrap(),
			[0x0a, 0xff]
		);
		assert!(decode_to_vec(HexCodec::default(), b"f").unwrap().is_empty());
	}

	#[test]
	fn decode_odd_length_rejects_invalid_trailing_character() {
		assert_eq!(
			decode_to_vec(HexCodec::default(), b"0affz"),
			Err(DecodeError::InvalidCharacter {
				index: 4,
				byte: b'z'
			})
		);
		assert_eq!(
			decode_to_vec(HexCodec::default(), b"g"),
			Err(DecodeError::InvalidCharacter {
				index: 0,
				byte: b'g'
			})
		);
	}

	#[test]
	fn decode_leaves_rest_of_destination_alone() {
		let mut buf = [0x55u8; 4];
		let n = HexCodec::default().decode(&mut buf, b"0102").unwrap();
		assert_eq!(n, 2);
		assert_eq!(buf, [1, 2, 0x55, 0x55]);
	}

	#[test]
	#[should_panic(expected = "destination too small")]
	fn decode_panics_on_small_destination() {
		let mut buf = [0u8; 1];
		let _ = HexCodec::default().decode(&mut buf, b"0102");
	}

	#[test]
	fn round_trip_every_byte_value() {
		let all: Vec<u8> = (0..=255).collect();
		for codec in [HexCodec::lower(), HexCodec::upper()] {
			let encoded = encode_to_vec_sized(codec, &all);
			assert_eq!(encoded.len(), 2 * all.len());

			let mut decoded = vec![0u8; decoded_len(encoded.len())];
			let n = codec.decode(&mut decoded, &encoded).unwrap();
			assert_eq!(n, all.len());
			assert_eq!(decoded, all);
		}
	}

	#[test]
	fn shared_between_threads() {
		let codec = HexCodec::upper();
		std::thread::scope(|s| {
			for t in 0u8..4 {
				s.spawn(move || {
					let src = [t; 16];
					let mut hex = [0u8; 32];
					let mut back = [0u8; 16];
					codec.encode(&mut hex, &src);
					codec.decode(&mut back, &hex).unwrap();
					assert_eq!(back, src);
				});
			}
		});
	}
}
