//! Runtime configuration.

/// Environment variable read by [`Config::from_env`].
pub const DEBUG_ENV: &str = "LAMINA_DEBUG";

/// Application settings.
///
/// The default is the production posture: `debug` off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Include the error message and trace in 500 responses.
    ///
    /// This discloses internals to whoever made the request. Never enable it
    /// for a deployment that serves real traffic.
    pub debug: bool,
}

impl Config {
    /// Reads `LAMINA_DEBUG`. `1`, `true`, `yes` and `on` (any case) enable
    /// debug mode; anything else, or an unset variable, leaves it off.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let debug = lookup(DEBUG_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        Self { debug }
    }
}
