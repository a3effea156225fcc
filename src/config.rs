//! Optional TOML configuration for callers that pick the case mode from a file
//!
//! ```toml
//! case = "upper"
//! ```

use std::{fs, path::Path};

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{codec::CaseMode, codec::HexCodec, util::ext::PathExt};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Alphabet used for encoding, `"lower"` or `"upper"`
	pub case: CaseMode,
}

impl Config {
	pub fn from_toml(data: &str) -> anyhow::Result<Config> {
		Ok(toml::from_str(data)?)
	}

	/// Reads and parses the file at `path`, expanding a leading `~`
	pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
		let path = path.as_ref().tilde_expand();
		debug!("loading config file {path:?}");

		let data =
			fs::read_to_string(&path).with_context(|| format!("unable to read {path:?}"))?;
		Self::from_toml(&data).with_context(|| format!("invalid config file {path:?}"))
	}

	pub fn codec(&self) -> HexCodec {
		HexCodec::new(self.case)
	}
}
