use std::{
	env,
	ffi::OsString,
	os::unix::prelude::{OsStrExt, OsStringExt},
	path::{Path, PathBuf},
};

pub trait PathExt {
	fn tilde_expand(&self) -> PathBuf;
}

impl PathExt for Path {
	/// A bare `~` follows `$HOME` like the shell does, `~user` goes through the password database
	fn tilde_expand(&self) -> PathBuf {
		if let Some(home) = env::var_os("HOME").filter(|home| !home.is_empty()) {
			if let Ok(rest) = self.strip_prefix("~") {
				return PathBuf::from(home).join(rest);
			}
		}
		OsString::from_vec(tilde_expand::tilde_expand(self.as_os_str().as_bytes())).into()
	}
}
