//! Persisted sign-in state.
//!
//! The token and the signed-in user live in a small key-value store that is
//! touched in exactly two places: when a request is authored, and when the
//! user signs in or out.
use crate::{
    config::credential::{CALLBACK_PARAM, TOKEN_KEY, USER_KEY},
    schema::UserProfile,
};
use log::{debug, warn};
use reqwest::Url;
use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    error::Error as StdError,
    fmt,
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
    rc::Rc,
    result::Result as StdResult,
};

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
    Callback(String),
}
pub type Result<T> = StdResult<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Error accessing credential file: {}", e),
            Self::Yaml(e) => write!(f, "Error processing credential file: {}", e),
            Self::Json(e) => write!(f, "Malformed sign-in data: {}", e),
            Self::Callback(d) => write!(f, "Invalid sign-in callback: {}", d),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Yaml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Callback(_) => None,
        }
    }
}
impl crate::error::Error for Error {}

pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStore(RefCell<HashMap<String, String>>);
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn remove(&self, key: &str) -> Result<()> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

/// YAML map on disk, rewritten on every change.
pub struct FileStore {
    path: PathBuf,
    content: RefCell<BTreeMap<String, String>>,
}
impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = match File::open(&path) {
            Ok(f) => serde_yaml::from_reader(f).map_err(Error::Yaml)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No credential file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(Error::Io(e)),
        };
        Ok(Self {
            path,
            content: RefCell::new(content),
        })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Rewrites the whole file. It holds a bearer token, so on unix only the
    /// owner may read it.
    fn persist(&self) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options.open(&self.path).map_err(Error::Io)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(Error::Io)?;
        }
        serde_yaml::to_writer(file, &*self.content.borrow()).map_err(Error::Yaml)
    }
}
impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.content.borrow().get(key).cloned()
    }
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.content
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.persist()
    }
    fn remove(&self, key: &str) -> Result<()> {
        if self.content.borrow_mut().remove(key).is_some() {
            self.persist()
        } else {
            Ok(())
        }
    }
}

/// Shared handle over whichever store the front end picked.
#[derive(Clone)]
pub struct Credentials(Rc<dyn CredentialStore>);
impl Credentials {
    pub fn new<S: CredentialStore + 'static>(store: S) -> Self {
        Self(Rc::new(store))
    }
    pub fn token(&self) -> Option<String> {
        self.0.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }
    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.0.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Ignoring stored user record: {}", e);
                None
            }
        }
    }
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.0.set(TOKEN_KEY, token)
    }
    /// Stores the profile and, when the callback carried one, its token.
    pub fn sign_in(&self, profile: &UserProfile) -> Result<()> {
        let mut stored = profile.clone();
        if let Some(token) = stored.access_token.take() {
            self.set_token(&token)?;
        }
        self.0.set(
            USER_KEY,
            &serde_json::to_string(&stored).map_err(Error::Json)?,
        )
    }
    pub fn sign_out(&self) -> Result<()> {
        self.0.remove(TOKEN_KEY)?;
        self.0.remove(USER_KEY)
    }
}

/// Reads the user record out of the OAuth success redirect
/// (`.../auth/success?data=<json>`).
pub fn profile_from_callback(url: &str) -> Result<UserProfile> {
    let url = Url::parse(url.trim()).map_err(|e| Error::Callback(e.to_string()))?;
    let data = url
        .query_pairs()
        .find(|(k, _)| k == CALLBACK_PARAM)
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| Error::Callback(format!("missing \"{}\" parameter", CALLBACK_PARAM)))?;
    serde_json::from_str(&data).map_err(Error::Json)
}
