use jsl_eval::check_structure;

use super::{read_file, EXIT_ERROR, EXIT_OK};

/// `jsl check <file>`: verify block structure without running anything.
pub fn check_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    match check_structure(&source) {
        Ok(_) => {
            println!("{path}: ok");
            EXIT_OK
        }
        Err(err) => {
            eprintln!("{path}: {err}");
            EXIT_ERROR
        }
    }
}
