use std::ffi;
use std::ffi::CString;

use nix;

use builtin;
use launch;
use redirect;
use status::StatusRegistry;
use types::{Command, ExecutionOutcome};

pub const STATUS_TOKEN: &'static str = "$?";

/// Route one tokenized line: substitute `$?`, then run a builtin or launch
/// an external program. Returns the line's status; the registry is written
/// only on the external path. The only `Err` is a failed fork, which the
/// caller treats as fatal.
pub fn dispatch(tokens: &[&str], registry: &mut StatusRegistry) -> nix::Result<i32> {
	let tokens = substitute(tokens, registry.get());
	let command = match Command::from_tokens(&tokens) {
		Some(command) => command,
		None => return Ok(0),
	};
	if let Some(handler) = builtin::match_builtin(command.name) {
		return Ok(handler(&command));
	}
	let status = run_external(&command)?;
	registry.set(status);
	Ok(status)
}

/// Build a fresh token sequence with every token exactly equal to `$?`
/// replaced by the decimal status. Token count is preserved.
pub fn substitute(tokens: &[&str], status: i32) -> Vec<String> {
	tokens
		.iter()
		.map(|&token| {
			if token == STATUS_TOKEN {
				status.to_string()
			} else {
				token.to_string()
			}
		})
		.collect()
}

fn run_external(command: &Command) -> nix::Result<i32> {
	let (plan, arguments) = match redirect::resolve(command.arguments) {
		Ok(resolved) => resolved,
		Err(e) => {
			eprintln!("msh: {}", e);
			return Ok(1);
		}
	};
	let argv = match build_argv(command.name, &arguments) {
		Ok(argv) => argv,
		Err(_) => {
			eprintln!("msh: {}: argument contains a NUL byte", command.name);
			return Ok(1);
		}
	};
	match launch::launch(&argv, plan)? {
		ExecutionOutcome::Exited(code) => Ok(code),
		ExecutionOutcome::SignalTerminated => Ok(1),
	}
}

fn build_argv(name: &str, arguments: &[String]) -> Result<Vec<CString>, ffi::NulError> {
	let mut argv = Vec::with_capacity(arguments.len() + 1);
	argv.push(CString::new(name)?);
	for argument in arguments {
		argv.push(CString::new(argument.as_str())?);
	}
	Ok(argv)
}

#[cfg(test)]
mod tests {
	use std::env;
	use std::fs;
	use std::path::PathBuf;
	use std::process;

	use dispatch::{dispatch, substitute};
	use status::StatusRegistry;

	fn temp_path(tag: &str) -> PathBuf {
		let mut path = env::temp_dir();
		path.push(format!("msh_dispatch_{}_{}", tag, process::id()));
		path
	}

	#[test]
	fn substitutes_only_exact_status_tokens() {
		let tokens = substitute(&["echo", "$?", "x$?", "$?y"], 42);
		assert_eq!(tokens, vec!["echo", "42", "x$?", "$?y"]);
	}

	#[test]
	fn substitution_preserves_token_count() {
		let tokens = substitute(&["$?", "$?", "$?"], 0);
		assert_eq!(tokens.len(), 3);
		assert_eq!(tokens, vec!["0", "0", "0"]);
	}

	#[test]
	fn external_exit_code_lands_in_the_registry() {
		let mut registry = StatusRegistry::new();
		let status = dispatch(&["sh", "-c", "exit 5"], &mut registry).unwrap();
		assert_eq!(status, 5);
		assert_eq!(registry.get(), 5);
	}

	#[test]
	fn builtin_status_does_not_touch_the_registry() {
		let mut registry = StatusRegistry::new();
		registry.set(9);
		let status = dispatch(&["cd", "a", "b"], &mut registry).unwrap();
		assert_eq!(status, 1);
		assert_eq!(registry.get(), 9);
	}

	#[test]
	fn unknown_command_records_127() {
		let mut registry = StatusRegistry::new();
		let status = dispatch(&["msh-no-such-program"], &mut registry).unwrap();
		assert_eq!(status, 127);
		assert_eq!(registry.get(), 127);
	}

	#[test]
	fn failed_redirection_records_1_without_launching() {
		let mut registry = StatusRegistry::new();
		let status = dispatch(&["cat", "<", "/msh-no-such-file"], &mut registry).unwrap();
		assert_eq!(status, 1);
		assert_eq!(registry.get(), 1);
	}

	#[test]
	fn signal_terminated_child_records_1() {
		let mut registry = StatusRegistry::new();
		let status = dispatch(&["sh", "-c", "kill -TERM $$"], &mut registry).unwrap();
		assert_eq!(status, 1);
		assert_eq!(registry.get(), 1);
	}

	#[test]
	fn status_token_reflects_the_previous_external_command() {
		let mut registry = StatusRegistry::new();
		dispatch(&["sh", "-c", "exit 4"], &mut registry).unwrap();
		let status = dispatch(&["test", "$?", "-eq", "4"], &mut registry).unwrap();
		assert_eq!(status, 0);
	}

	#[test]
	fn redirected_echo_and_cat_round_trip() {
		let out = temp_path("out");
		let copy = temp_path("copy");
		let out_str = out.to_str().unwrap();
		let copy_str = copy.to_str().unwrap();

		let mut registry = StatusRegistry::new();
		let status = dispatch(&["echo", "hello", ">", out_str], &mut registry).unwrap();
		assert_eq!(status, 0);
		assert_eq!(fs::read_to_string(&out).unwrap(), "hello\n");

		let status = dispatch(&["cat", "<", out_str, ">", copy_str], &mut registry).unwrap();
		assert_eq!(status, 0);
		assert_eq!(fs::read_to_string(&copy).unwrap(), "hello\n");

		fs::remove_file(&out).unwrap();
		fs::remove_file(&copy).unwrap();
	}
}
