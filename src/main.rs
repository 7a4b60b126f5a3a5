use clap::{crate_description, crate_name, Arg, Command as App};
use practice_client::{
    api::Session,
    credential::{Credentials, FileStore, MemoryStore},
    language::Language,
    settings::Settings,
};
use pretty_env_logger::init_timed;
use std::{io::Write, rc::Rc};
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[macro_use]
mod color;
mod command {
    pub mod problem;
    pub mod session;
}
mod read;
mod write;

use command::{
    problem::{list_problems, list_tags, problem_loop},
    session::{login, logout, stats, whoami},
};
use read::read_line;

const HELP: &str = "problems  tags  select  login  logout  whoami  stats  help  exit";

fn load_settings(stdout: &mut StandardStream) -> Settings {
    let app = App::new(crate_name!())
        .about(crate_description!())
        .version(get_version!("version"))
        .long_version(get_version!("long_version"))
        .arg(
            Arg::new("backend")
                .long("backend")
                .takes_value(true)
                .help("Url of the practice backend"),
        )
        .arg(
            Arg::new("credentials")
                .long("credentials")
                .takes_value(true)
                .help("File keeping the sign-in state"),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .takes_value(true)
                .help("Language to open problems in"),
        )
        .get_matches();
    let mut settings = Settings::from_env();
    if let Some(v) = app.value_of("backend") {
        settings.backend = v.to_string();
    }
    if let Some(v) = app.value_of("credentials") {
        settings.credentials = v.into();
    }
    if let Some(v) = app.value_of("language") {
        match v.parse::<Language>() {
            Ok(l) => settings.language = l,
            Err(e) => write_error!(stdout, "Error", "{}", e),
        }
    }
    settings
}

fn open_credentials(stdout: &mut StandardStream, settings: &Settings) -> Credentials {
    match FileStore::open(&settings.credentials) {
        Ok(store) => Credentials::new(store),
        Err(e) => {
            write_error!(stdout, "Error", "{}", e);
            write_info!(stdout, "Info", "Sign-in state will not be saved");
            Credentials::new(MemoryStore::new())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_timed();
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let settings = load_settings(&mut stdout);
    let credentials = open_credentials(&mut stdout, &settings);
    let session = match Session::new(&settings.backend, credentials.clone()) {
        Ok(s) => Rc::new(s),
        Err(e) => {
            write_error!(&mut stdout, "Error", "{}", e);
            return;
        }
    };
    write_info!(&mut stdout, "Info", "Using backend {}", session.backend());
    stdout.reset().expect("Failed to reset color");

    let mut language = settings.language;
    loop {
        match read_line(&mut stdout, b"practice-client> ").trim() {
            "problems" => list_problems(&mut stdout, &session).await,
            "tags" => list_tags(&mut stdout, &session).await,
            "select" => language = problem_loop(&mut stdout, &session, language).await,
            "login" => login(&mut stdout, &credentials),
            "logout" => logout(&mut stdout, &credentials),
            "whoami" => whoami(&mut stdout, &credentials),
            "stats" => stats(&mut stdout, &session).await,
            "help" => write_info!(&mut stdout, "Help", "{}", HELP),
            "exit" => break,
            "" => (),
            unknown => write_error!(
                &mut stdout,
                "Error",
                r#"practice-client: unknown command "{}""#,
                unknown
            ),
        }
        stdout.reset().expect("Failed to reset color");
    }
}
