//! Contains the argument handling and main logic of the CLI

use std::ffi::OsString;
use std::io::{self, stdout, ErrorKind, Write};
use std::os::unix::prelude::OsStrExt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use exitcode::{ExitCode, CONFIG, DATAERR, NOINPUT};
use log::{debug, info, warn};

use pencoder::{decoded_len, encoded_len, CaseMode, Config, HexCodec};

#[derive(Parser)]
#[command(
	author,
	version,
	about,
	long_about,
	after_long_help = "\
	Logging: is controlled via the PENCODER_LOG environment variable. Set PENCODER_LOG to error, \
	warn, info, debug or trace to adjust verbosity. For examples, see RUST_LOG mentions in \
	https://docs.rs/env_logger/0.10.0/env_logger/"
)]
pub struct Pencoder {
	#[clap(flatten)]
	pub global_opts: GlobalOpts,

	#[clap(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Print the hex representation of TEXT, followed by a newline
	Encode {
		/// Bytes to encode, taken as-is from the argument
		text: OsString,
	},

	/// Write the bytes represented by HEX to stdout. Either case is accepted, a valid trailing
	/// odd character is ignored
	Decode {
		/// Hex characters to decode
		hex: OsString,
	},
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
	/// Verbosity level, can be specified multiple times, equivalent to
	/// PENCODER_LOG={info,debug,trace}
	#[arg(group="verbosity", long, short, global=true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Quiet mode, equivalent to PENCODER_LOG=error
	#[arg(group = "verbosity", long, short, global = true)]
	pub quiet: bool,

	/// Silent mode, equivalent to PENCODER_LOG=off
	#[arg(group = "verbosity", long, short, global = true)]
	pub silent: bool,

	/// TOML file selecting the encoding case, e.g. `case = "upper"`
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Encode with 0-9A-F, overrides the config file
	#[arg(group = "case", long, global = true)]
	pub upper: bool,

	/// Encode with 0-9a-f, overrides the config file
	#[arg(group = "case", long, global = true)]
	pub lower: bool,
}

impl Pencoder {
	pub fn exec(self) -> anyhow::Result<()> {
		self.init_logging();

		info!("version {} starting up", env!("CARGO_PKG_VERSION"));
		info!("log level set to {}", log::max_level());

		let codec = self.codec();
		debug!("using {:?} case", codec.mode());

		use Command::*;
		match self.command {
			Encode { text } => Self::encode(codec, text.as_bytes())?,
			Decode { hex } => Self::decode(codec, hex.as_bytes())?,
		}

		info!("process exiting successfully");
		Ok(())
	}

	fn init_logging(&self) {
		let mut logging_builder = env_logger::Builder::new();

		logging_builder
			.filter_level(log::LevelFilter::Warn)
			.format_timestamp_nanos()
			.parse_env("PENCODER_LOG");

		let override_log_level = if self.global_opts.silent {
			Some(log::LevelFilter::Off)
		} else if self.global_opts.quiet {
			Some(log::LevelFilter::Error)
		} else {
			match self.global_opts.verbose {
				0 => None,
				1 => Some(log::LevelFilter::Info),
				2 => Some(log::LevelFilter::Debug),
				_ => Some(log::LevelFilter::Trace),
			}
		};

		if let Some(new_level) = override_log_level {
			logging_builder.filter_level(new_level);
		}

		logging_builder.init();
	}

	/// Resolves the case mode: default, then config file, then flags
	fn codec(&self) -> HexCodec {
		let opts = &self.global_opts;

		let mut cfg = match &opts.config {
			Some(path) => match Config::load(path) {
				Ok(cfg) => cfg,
				Err(e)
					if e.downcast_ref::<io::Error>()
						.is_some_and(|e| e.kind() == ErrorKind::NotFound) =>
				{
					die(NOINPUT, &format!("config file {path:?} doesn't exist"))
				}
				Err(e) => die(CONFIG, &format!("{e:#}")),
			},
			None => Config::default(),
		};

		if opts.upper {
			cfg.case = CaseMode::Upper;
		} else if opts.lower {
			cfg.case = CaseMode::Lower;
		}

		cfg.codec()
	}

	fn encode(codec: HexCodec, src: &[u8]) -> anyhow::Result<()> {
		let mut buf = vec![0u8; encoded_len(src.len())];
		let n = codec.encode(&mut buf, src);
		buf.truncate(n);
		buf.push(b'\n');

		let mut out = stdout().lock();
		out.write_all(&buf)?;
		out.flush()?;
		info!("encode subcommand done, wrote {n} characters");
		Ok(())
	}

	fn decode(codec: HexCodec, src: &[u8]) -> anyhow::Result<()> {
		let mut buf = vec![0u8; decoded_len(src.len())];
		let n = match codec.decode(&mut buf, src) {
			Ok(n) => n,
			Err(e) => die(DATAERR, &format!("{e}, exiting")),
		};
		buf.truncate(n);
		if src.len() % 2 != 0 {
			warn!("odd number of hex characters, ignoring the last one");
		}

		let mut out = stdout().lock();
		out.write_all(&buf)?;
		out.flush()?;
		info!("decode subcommand done, wrote {n} bytes");
		Ok(())
	}
}

pub fn die(code: ExitCode, msg: &str) -> ! {
	log::error!("{}", msg);
	std::process::exit(code)
}
