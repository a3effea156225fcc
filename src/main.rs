mod cli;

use clap::Parser;

use cli::Pencoder;

fn main() {
	if let Err(e) = Pencoder::parse().exec() {
		cli::die(exitcode::IOERR, &format!("{e:#}, exiting"))
	}
}
