use std::env;
use std::path::PathBuf;
use std::process;

use types::Command;

pub type Builtin = fn(&Command) -> i32;

pub fn match_builtin(name: &str) -> Option<Builtin> {
	match name {
		"cd" => Some(builtin_cd),
		"pwd" => Some(builtin_pwd),
		"exit" => Some(builtin_exit),
		_ => None,
	}
}

pub fn builtin_cd(command: &Command) -> i32 {
	if command.arguments.len() > 1 {
		eprintln!("cd: wrong number of arguments");
		return 1;
	}
	let target = match command.arguments.first() {
		Some(dir) => PathBuf::from(dir),
		None => match env::var_os("HOME") {
			Some(home) => PathBuf::from(home),
			None => {
				eprintln!("cd: HOME is not set");
				return 1;
			}
		},
	};
	if let Err(e) = env::set_current_dir(&target) {
		eprintln!("cd: {}: {}", target.display(), e);
		return 1;
	}
	0
}

pub fn builtin_pwd(command: &Command) -> i32 {
	let mut status = 0;
	if !command.arguments.is_empty() {
		eprintln!("pwd: too many arguments");
		status = 1;
	}
	// The argument-count check does not suppress the print.
	match env::current_dir() {
		Ok(dir) => println!("{}", dir.display()),
		Err(e) => {
			eprintln!("pwd: {}", e);
			status = 1;
		}
	}
	status
}

pub fn builtin_exit(command: &Command) -> i32 {
	if command.arguments.len() > 1 {
		eprintln!("exit: too many arguments");
		return 1;
	}
	let code = command
		.arguments
		.first()
		.map_or(0, |argument| parse_exit_code(argument));
	process::exit(code)
}

// Permissive like atoi: anything that is not an integer terminates with 0.
fn parse_exit_code(argument: &str) -> i32 {
	argument.trim().parse::<i32>().unwrap_or(0)
}
