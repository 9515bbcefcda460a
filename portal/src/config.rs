use std::{
    env,
    fmt::{self, Debug, Formatter},
    time::Duration,
};

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "password123";

/**
Settings for the portal application.

Host and port are not part of this; `trillium_smol` reads `HOST` and
`PORT` itself.
*/
#[derive(Clone)]
pub struct PortalConfig {
    username: String,
    password: String,
    idle_timeout: Option<Duration>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.into(),
            password: DEFAULT_PASSWORD.into(),
            idle_timeout: None,
        }
    }
}

impl Debug for PortalConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("username", &self.username)
            .field("password", &"<<secret>>")
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

impl PortalConfig {
    /// the demo account, `admin` / `password123`, with no idle timeout
    pub fn new() -> Self {
        Self::default()
    }

    /**
    reads `HEARTH_USERNAME`, `HEARTH_PASSWORD` and
    `HEARTH_IDLE_TIMEOUT_SECS`, falling back to [`PortalConfig::new`]
    for anything unset. an unparseable timeout is logged and ignored
    */
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(username) = env::var("HEARTH_USERNAME") {
            config.username = username;
        }

        if let Ok(password) = env::var("HEARTH_PASSWORD") {
            config.password = password;
        }

        if let Ok(secs) = env::var("HEARTH_IDLE_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => config.idle_timeout = Some(Duration::from_secs(secs)),
                Err(e) => log::warn!("ignoring HEARTH_IDLE_TIMEOUT_SECS={secs:?}: {e}"),
            }
        }

        config
    }

    /// sets the single account's credentials
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// expires sessions after this long without a request
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = Some(idle_timeout);
        self
    }

    /// the session idle timeout, if any
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    pub(crate) fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
