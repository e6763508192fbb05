use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;

/// A resolved redirection target: the open file plus the index of the
/// filename token in the original argument list.
#[derive(Debug)]
pub struct Redirect {
	pub file: File,
	pub token_index: usize,
}

/// At most one input and one output substitution per command. First
/// occurrence of each operator kind wins; later ones are excised unopened.
#[derive(Debug)]
pub struct RedirectPlan {
	pub input: Option<Redirect>,
	pub output: Option<Redirect>,
}

impl RedirectPlan {
	pub fn empty() -> RedirectPlan {
		RedirectPlan { input: None, output: None }
	}
}

/// Scan an argument list for `<` and `>` operators, open the named files,
/// and return the plan together with the argument list stripped of all
/// redirection syntax. Any open failure aborts the invocation before a
/// process is launched.
pub fn resolve(arguments: &[String]) -> io::Result<(RedirectPlan, Vec<String>)> {
	let mut plan = RedirectPlan::empty();
	let mut cleaned = Vec::with_capacity(arguments.len());
	let mut i = 0;
	while i < arguments.len() {
		let token = arguments[i].as_str();
		if token != "<" && token != ">" {
			cleaned.push(arguments[i].clone());
			i += 1;
			continue;
		}
		let target = arguments.get(i + 1).ok_or_else(|| {
			io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("missing filename after `{}`", token),
			)
		})?;
		if token == "<" {
			if plan.input.is_none() {
				let file = open_input(target)?;
				plan.input = Some(Redirect { file: file, token_index: i + 1 });
			}
		} else if plan.output.is_none() {
			let file = open_output(target)?;
			plan.output = Some(Redirect { file: file, token_index: i + 1 });
		}
		i += 2;
	}
	Ok((plan, cleaned))
}

fn open_input(target: &str) -> io::Result<File> {
	File::open(target).map_err(|e| name_error(target, e))
}

fn open_output(target: &str) -> io::Result<File> {
	// Permissive creation mode; no umask adjustment is modeled.
	OpenOptions::new()
		.write(true)
		.create(true)
		.truncate(true)
		.mode(0o777)
		.open(target)
		.map_err(|e| name_error(target, e))
}

fn name_error(target: &str, e: io::Error) -> io::Error {
	io::Error::new(e.kind(), format!("{}: {}", target, e))
}
