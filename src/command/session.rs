use crate::{read::read_line, write::write_result};
use practice_client::{
    api::Session,
    credential::{self, Credentials},
};
use std::io::Write;
use termcolor::StandardStream;

/// Signs in from the OAuth success redirect, or from a bare token.
pub fn login(stdout: &mut StandardStream, credentials: &Credentials) {
    let input = read_line(stdout, b"Callback url or token: ");
    let input = input.trim();
    if input.is_empty() {
        write_error!(stdout, "Error", "Nothing to sign in with");
        return;
    }
    if !input.contains("://") {
        write_result(stdout, credentials.set_token(input), "Stored access token");
        return;
    }
    match credential::profile_from_callback(input) {
        Ok(profile) => {
            let has_token = profile.access_token.is_some();
            let name = profile.name.clone().unwrap_or_else(|| String::from("user"));
            match credentials.sign_in(&profile) {
                Ok(()) => write_ok!(stdout, "Success", "Signed in as {}", name),
                Err(e) => write_error!(stdout, "Error", "{}", e),
            }
            if !has_token && !credentials.is_signed_in() {
                write_error!(
                    stdout,
                    "Warning",
                    "The callback carried no access token, submissions stay disabled"
                );
            }
        }
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
}

pub fn logout(stdout: &mut StandardStream, credentials: &Credentials) {
    write_result(stdout, credentials.sign_out(), "Signed out");
}

pub fn whoami(stdout: &mut StandardStream, credentials: &Credentials) {
    match credentials.user() {
        Some(user) => {
            let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| String::from("—"));
            write_info!(stdout, "Name", "{}", or_dash(&user.name));
            write_info!(stdout, "Email", "{}", or_dash(&user.email));
            write_info!(stdout, "Id", "{}", or_dash(&user.id));
            write_info!(stdout, "Via", "{}", or_dash(&user.provider));
        }
        None => write_info!(stdout, "Info", "No user profile stored"),
    }
    if credentials.is_signed_in() {
        write_ok!(stdout, "Token", "present");
    } else {
        write_error!(stdout, "Token", "absent, sign in to submit");
    }
}

pub async fn stats(stdout: &mut StandardStream, session: &Session) {
    write_progress!(stdout, "Loading", "statistics");
    match session.stats().await {
        Ok(stats) => {
            for (key, value) in stats.0.iter() {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    v => v.to_string(),
                };
                write_info!(stdout, "Stat", "{}: {}", key.replace('_', " "), value);
            }
        }
        Err(e) if e.is_auth() => {
            write_error!(stdout, "Error", "Please sign in again to see statistics")
        }
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
}
