use crate::{
    config::{
        credential::{CREDENTIALS_ENV, CREDENTIALS_FILE},
        session::{BACKEND_ENV, DEFAULT_BACKEND},
    },
    language::Language,
};
use std::{env, path::PathBuf};

/// Runtime configuration of the front end.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: String,
    pub credentials: PathBuf,
    pub language: Language,
}

impl Settings {
    /// Defaults, overridden by the environment.
    pub fn from_env() -> Self {
        Self::from_vars(|k| env::var(k).ok().filter(|v| !v.is_empty()))
    }
    fn from_vars<F: Fn(&str) -> Option<String>>(var: F) -> Self {
        let credentials = match var(CREDENTIALS_ENV) {
            Some(p) => PathBuf::from(p),
            None => var("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(CREDENTIALS_FILE),
        };
        Self {
            backend: var(BACKEND_ENV).unwrap_or_else(|| DEFAULT_BACKEND.to_string()),
            credentials,
            language: Language::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let s = Settings::from_vars(|k| match k {
            "HOME" => Some(String::from("/home/ada")),
            _ => None,
        });
        assert_eq!(s.backend, DEFAULT_BACKEND);
        assert_eq!(s.credentials, PathBuf::from("/home/ada/.practice-client.yaml"));
        assert_eq!(s.language, Language::Python);
    }

    #[test]
    fn environment_overrides_defaults() {
        let s = Settings::from_vars(|k| match k {
            BACKEND_ENV => Some(String::from("https://judge.example")),
            CREDENTIALS_ENV => Some(String::from("/tmp/creds.yaml")),
            _ => None,
        });
        assert_eq!(s.backend, "https://judge.example");
        assert_eq!(s.credentials, PathBuf::from("/tmp/creds.yaml"));
    }
}
