pub mod retry {
    use std::time::Duration;
    pub const RETRY_COUNT: u32 = 3;
    pub const RETRY_DELAY: Duration = Duration::from_millis(300);
}
pub mod session {
    use std::time::Duration;
    pub const DEFAULT_BACKEND: &str = "http://localhost:8000";
    pub const BACKEND_ENV: &str = "PRACTICE_BACKEND_URL";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const VERBOSE: bool = false;
}
pub mod problem {
    pub const TEMPLATE_PATH: &str = "template";
    pub const LIST_LIMIT: u32 = 100;
    pub const TAG_LIMIT: u32 = 1000;
}
pub mod editor {
    pub const PLACEHOLDER: &str = "# Error loading template. Please try again.";
    pub const LOADING: &str = "# Loading template...";
}
pub mod credential {
    pub const TOKEN_KEY: &str = "access_token";
    pub const USER_KEY: &str = "user";
    pub const CREDENTIALS_ENV: &str = "PRACTICE_CREDENTIALS";
    pub const CREDENTIALS_FILE: &str = ".practice-client.yaml";
    pub const CALLBACK_PARAM: &str = "data";
}
