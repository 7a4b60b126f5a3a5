use std::{
    fmt::Display,
    fs::{self, File},
    io::{self, stdin, Write},
    str::FromStr,
};
use termcolor::{StandardStream, WriteColor};

pub fn read_line_to(stdout: &mut StandardStream, prompt: &[u8], dest: &mut String) {
    dest.clear();
    loop {
        stdout.write_all(prompt).expect("Failed to write prompt");
        stdout.flush().expect("Failed to flush output");
        match stdin().read_line(dest) {
            Ok(0) => {
                dest.push_str("exit");
                return;
            }
            Ok(_) => {
                dest.truncate(dest.trim_end().len());
                return;
            }
            Err(e) => write_error!(stdout, "Error", "Read: {}", e),
        }
        stdout.reset().expect("Failed to reset color");
    }
}
pub fn read_line(stdout: &mut StandardStream, prompt: &[u8]) -> String {
    let mut ret = String::new();
    read_line_to(stdout, prompt, &mut ret);
    ret
}
pub fn read_parse<T>(stdout: &mut StandardStream, prompt: &[u8]) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let mut buf = String::new();
    loop {
        read_line_to(stdout, prompt, &mut buf);
        match buf.trim().parse::<T>() {
            Ok(v) => return v,
            Err(e) => write_error!(stdout, "Error", "parse: {}", e),
        }
        stdout.reset().expect("Failed to reset color");
    }
}

fn read_file_path<F: Fn(&String) -> Result<Ret, io::Error>, Ret>(
    stdout: &mut StandardStream,
    fun: F,
) -> Ret {
    let mut path = String::new();
    loop {
        read_line_to(stdout, b"File path: ", &mut path);
        match fun(&path) {
            Ok(v) => break v,
            Err(e) => write_error!(stdout, "Error", "Error open {}: {}", path, e),
        }
        stdout.reset().expect("Failed to reset color");
    }
}

pub fn read_text(stdout: &mut StandardStream) -> String {
    read_file_path(stdout, |x| fs::read_to_string(x))
}

pub fn read_writer(stdout: &mut StandardStream) -> impl Write {
    read_file_path(stdout, |x| File::create(x))
}
