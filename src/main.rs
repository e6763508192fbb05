extern crate libc;
extern crate nix;

mod builtin;
mod dispatch;
mod launch;
mod redirect;
mod status;
mod tokenizer;
mod types;

use std::env;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Write};
use std::process;

use nix::sys::signal::{self, SigHandler, Signal};

const PROMPT: &'static str = "msh> ";

fn main() {
	let args: Vec<String> = env::args().collect();
	let mut interactive = unsafe { libc::isatty(libc::STDIN_FILENO) } == 1;
	let reader: Box<dyn BufRead> = match args.len() {
		1 => Box::new(BufReader::new(io::stdin())),
		2 => {
			interactive = false;
			match File::open(&args[1]) {
				Ok(file) => Box::new(BufReader::new(file)),
				Err(e) => {
					eprintln!("{}: {}: {}", args[0], args[1], e);
					process::exit(1);
				}
			}
		}
		_ => {
			eprintln!("{}: too many arguments", args[0]);
			process::exit(1);
		}
	};

	// The shell itself survives ^C; children restore the default
	// disposition before exec.
	if let Err(e) = unsafe { signal::signal(Signal::SIGINT, SigHandler::SigIgn) } {
		eprintln!("msh: cannot ignore SIGINT: {}", e);
		process::exit(1);
	}

	process::exit(read_loop(reader, interactive));
}

fn read_loop(mut reader: Box<dyn BufRead>, interactive: bool) -> i32 {
	let mut registry = status::StatusRegistry::new();
	let mut status = 0;
	let mut line = String::new();
	loop {
		if interactive {
			print!("{}", PROMPT);
			let _ = io::stdout().flush();
		}
		line.clear();
		match reader.read_line(&mut line) {
			Ok(0) => break,
			Ok(_) => {}
			Err(e) => {
				eprintln!("msh: read: {}", e);
				process::exit(1);
			}
		}
		let tokens = tokenizer::tokenize(&line);
		if tokens.is_empty() {
			continue;
		}
		match dispatch::dispatch(&tokens, &mut registry) {
			Ok(s) => status = s,
			Err(e) => {
				// Losing fork means losing the ability to run anything
				// further; give up.
				eprintln!("msh: cannot fork: {}", e);
				process::exit(1);
			}
		}
	}
	if interactive {
		// Keep the caller's prompt off the ^D line.
		println!();
	}
	status
}
