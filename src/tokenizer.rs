/// Word-splitting stand-in for the full tokenizer: whitespace separation
/// only, no quoting rules. The rest of the shell never splits text itself.
pub fn tokenize(line: &str) -> Vec<&str> {
	line.split_whitespace().collect()
}
