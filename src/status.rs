/// Exit status of the most recently completed external command, exposed to
/// scripts as `$?`. Builtins report their status to the read loop only and
/// leave this untouched.
#[derive(Debug)]
pub struct StatusRegistry {
	value: i32,
}

impl StatusRegistry {
	pub fn new() -> StatusRegistry {
		StatusRegistry { value: 0 }
	}

	pub fn get(&self) -> i32 {
		self.value
	}

	pub fn set(&mut self, value: i32) {
		self.value = value;
	}
}
