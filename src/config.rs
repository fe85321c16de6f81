use serde::Deserialize;

/// User-facing message catalog. Built once at startup and shared read-only
/// through the app state; handlers never mutate it.
#[derive(Debug, Clone, Deserialize)]
pub struct Messages {
    pub register_success: String,
    pub login_success: String,
    pub login_error: String,
    pub auth_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            register_success: "User registered successfully".into(),
            login_success: "Login successful".into(),
            login_error: "Invalid email or password".into(),
            auth_error: "Authentication error".into(),
        }
    }
}

impl Messages {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            register_success: std::env::var("MSG_REGISTER_SUCCESS")
                .unwrap_or(defaults.register_success),
            login_success: std::env::var("MSG_LOGIN_SUCCESS").unwrap_or(defaults.login_success),
            login_error: std::env::var("MSG_LOGIN_ERROR").unwrap_or(defaults.login_error),
            auth_error: std::env::var("MSG_AUTH_ERROR").unwrap_or(defaults.auth_error),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub messages: Messages,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        Ok(Self {
            database_url,
            messages: Messages::from_env(),
        })
    }
}
