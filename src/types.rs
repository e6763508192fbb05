#[derive(Debug)]
pub struct Command<'a> {
	pub name: &'a str,
	pub arguments: &'a [String],
}

impl<'a> Command<'a> {
	pub fn from_tokens(tokens: &'a [String]) -> Option<Command<'a>> {
		tokens.split_first().map(|(name, arguments)| Command {
			name: name.as_str(),
			arguments: arguments,
		})
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExecutionOutcome {
	Exited(i32),
	SignalTerminated,
}
