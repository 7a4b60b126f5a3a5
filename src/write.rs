use practice_client::{error::Error, workbench::Output};
use std::io::Write;
use termcolor::{StandardStream, WriteColor};

pub fn write_result<E: Error>(stdout: &mut StandardStream, result: Result<(), E>, success: &str) {
    match result {
        Ok(_) => write_ok!(stdout, "Success", "{}", success),
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
}

/// Prints the result panel, green when the submission was accepted.
pub fn write_output(stdout: &mut StandardStream, output: &Output) {
    if output.text.is_empty() {
        write_info!(stdout, "Info", "No output yet");
        return;
    }
    if output.success {
        crate::color::set_fg(stdout, termcolor::Color::Green);
    }
    writeln!(stdout, "{}", output.text.trim_end()).expect("Failed to write output");
    stdout.reset().expect("Failed to reset color");
}
