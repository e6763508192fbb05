use std::convert::Infallible;
use std::ffi::CString;
use std::os::unix::io::IntoRawFd;

use libc;
use nix;
use nix::errno::Errno;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{self, ForkResult};

use redirect::{Redirect, RedirectPlan};
use types::ExecutionOutcome;

/// Fork, run the child setup (signal disposition, descriptor substitution,
/// exec), and wait for the child. The only `Err` is a failed fork; exec
/// failures are confined to the child, which reports them and exits
/// non-zero. Fork failure is fatal to the caller by contract.
pub fn launch(argv: &[CString], plan: RedirectPlan) -> nix::Result<ExecutionOutcome> {
	match unsafe { unistd::fork() }? {
		ForkResult::Child => exec_child(argv, plan),
		ForkResult::Parent { child } => {
			// The child's copies of the redirection handles are the ones
			// that matter; release the parent's now.
			drop(plan);
			loop {
				match waitpid(child, None) {
					Ok(WaitStatus::Exited(_, code)) => {
						return Ok(ExecutionOutcome::Exited(code));
					}
					Ok(WaitStatus::Signaled(_, sig, _)) => {
						eprintln!("msh: terminated by signal {}", sig);
						return Ok(ExecutionOutcome::SignalTerminated);
					}
					Ok(_) => continue,
					Err(Errno::EINTR) => continue,
					Err(e) => return Err(e),
				}
			}
		}
	}
}

fn exec_child(argv: &[CString], plan: RedirectPlan) -> ! {
	let e = match child_setup(argv, plan) {
		Ok(never) => match never {},
		Err(e) => e,
	};
	let code = if e == Errno::ENOENT { 127 } else { 126 };
	eprintln!("{}: {}", argv[0].to_string_lossy(), e.desc());
	// _exit: the forked copy must never run shell teardown.
	unsafe { libc::_exit(code) }
}

// Runs strictly between fork and exec: restore default interrupt handling,
// then substitute descriptors per the plan.
fn child_setup(argv: &[CString], plan: RedirectPlan) -> nix::Result<Infallible> {
	unsafe { signal::signal(Signal::SIGINT, SigHandler::SigDfl) }?;
	if let Some(redirect) = plan.input {
		replace_descriptor(redirect, libc::STDIN_FILENO)?;
	}
	if let Some(redirect) = plan.output {
		replace_descriptor(redirect, libc::STDOUT_FILENO)?;
	}
	unistd::execvp(&argv[0], argv)
}

fn replace_descriptor(redirect: Redirect, standard_fd: i32) -> nix::Result<()> {
	let fd = redirect.file.into_raw_fd();
	unistd::dup2(fd, standard_fd)?;
	unistd::close(fd)?;
	Ok(())
}
