use std::io::{self, BufRead, Write};

use jsl_eval::InputProvider;

/// Reads answers for `input`/`inputm` from the terminal.
///
/// The prompt is written to stdout without a newline. End of input yields
/// `None`, which the builtins report as an error.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputProvider for StdinInput {
    fn request_input(&self, prompt: Option<&str>) -> Option<String> {
        if let Some(prompt) = prompt {
            let mut stdout = io::stdout().lock();
            // A prompt that fails to show is not worth aborting the read for.
            let _ = stdout.write_all(prompt.as_bytes());
            let _ = stdout.flush();
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            }
        }
    }
}
