//! Credential configuration for Crosscast
//!
//! Credentials are read from the process environment once, at startup, and
//! injected into adapters by constructor. Adapters never touch the
//! environment at request time; a platform whose credentials are absent
//! stays registered and fails its own publishes with a descriptive error,
//! leaving every other platform untouched.

use tracing::warn;

#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

#[derive(Debug, Clone)]
pub struct FacebookCredentials {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct InstagramCredentials {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct LinkedInCredentials {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct PinterestCredentials {
    pub access_token: String,
    pub board_id: String,
}

/// Process-wide credential set, read-only at request time.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub twitter: Option<TwitterCredentials>,
    pub facebook: Option<FacebookCredentials>,
    pub instagram: Option<InstagramCredentials>,
    pub linkedin: Option<LinkedInCredentials>,
    pub pinterest: Option<PinterestCredentials>,
}

impl Credentials {
    /// Read every platform's credentials from the environment.
    ///
    /// Absence of a variable disables only that platform. A platform with a
    /// partial credential set (e.g. a Twitter API key without its secret) is
    /// treated as unconfigured and logged, since a partial set can never
    /// produce a valid request.
    pub fn from_env() -> Self {
        Self {
            twitter: Self::twitter_from_env(),
            facebook: var("FACEBOOK_ACCESS_TOKEN")
                .map(|access_token| FacebookCredentials { access_token }),
            instagram: var("INSTAGRAM_ACCESS_TOKEN")
                .map(|access_token| InstagramCredentials { access_token }),
            linkedin: var("LINKEDIN_ACCESS_TOKEN")
                .map(|access_token| LinkedInCredentials { access_token }),
            pinterest: Self::pinterest_from_env(),
        }
    }

    fn twitter_from_env() -> Option<TwitterCredentials> {
        let vars = [
            var("TWITTER_API_KEY"),
            var("TWITTER_API_SECRET"),
            var("TWITTER_ACCESS_TOKEN"),
            var("TWITTER_ACCESS_TOKEN_SECRET"),
        ];

        match vars {
            [Some(api_key), Some(api_secret), Some(access_token), Some(access_token_secret)] => {
                Some(TwitterCredentials {
                    api_key,
                    api_secret,
                    access_token,
                    access_token_secret,
                })
            }
            ref partial if partial.iter().any(Option::is_some) => {
                warn!("Twitter credentials are incomplete; disabling Twitter");
                None
            }
            _ => None,
        }
    }

    fn pinterest_from_env() -> Option<PinterestCredentials> {
        match (var("PINTEREST_ACCESS_TOKEN"), var("PINTEREST_BOARD_ID")) {
            (Some(access_token), Some(board_id)) => Some(PinterestCredentials {
                access_token,
                board_id,
            }),
            (None, None) => None,
            _ => {
                warn!("Pinterest needs both an access token and a board id; disabling Pinterest");
                None
            }
        }
    }
}

/// Non-empty environment variable lookup.
fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: [&str; 9] = [
        "TWITTER_API_KEY",
        "TWITTER_API_SECRET",
        "TWITTER_ACCESS_TOKEN",
        "TWITTER_ACCESS_TOKEN_SECRET",
        "FACEBOOK_ACCESS_TOKEN",
        "INSTAGRAM_ACCESS_TOKEN",
        "LINKEDIN_ACCESS_TOKEN",
        "PINTEREST_ACCESS_TOKEN",
        "PINTEREST_BOARD_ID",
    ];

    fn clear_env() {
        for name in ALL_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_empty_environment() {
        clear_env();
        let credentials = Credentials::from_env();
        assert!(credentials.twitter.is_none());
        assert!(credentials.facebook.is_none());
        assert!(credentials.instagram.is_none());
        assert!(credentials.linkedin.is_none());
        assert!(credentials.pinterest.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_complete_twitter_set() {
        clear_env();
        std::env::set_var("TWITTER_API_KEY", "key");
        std::env::set_var("TWITTER_API_SECRET", "secret");
        std::env::set_var("TWITTER_ACCESS_TOKEN", "token");
        std::env::set_var("TWITTER_ACCESS_TOKEN_SECRET", "token-secret");

        let credentials = Credentials::from_env();
        let twitter = credentials.twitter.expect("Twitter should be configured");
        assert_eq!(twitter.api_key, "key");
        assert_eq!(twitter.access_token_secret, "token-secret");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_partial_twitter_set_is_disabled() {
        clear_env();
        std::env::set_var("TWITTER_API_KEY", "key");

        let credentials = Credentials::from_env();
        assert!(credentials.twitter.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_pinterest_needs_token_and_board() {
        clear_env();
        std::env::set_var("PINTEREST_ACCESS_TOKEN", "token");
        assert!(Credentials::from_env().pinterest.is_none());

        std::env::set_var("PINTEREST_BOARD_ID", "board-42");
        let pinterest = Credentials::from_env()
            .pinterest
            .expect("Pinterest should be configured");
        assert_eq!(pinterest.board_id, "board-42");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_single_token_platforms() {
        clear_env();
        std::env::set_var("FACEBOOK_ACCESS_TOKEN", "fb");
        std::env::set_var("LINKEDIN_ACCESS_TOKEN", "li");

        let credentials = Credentials::from_env();
        assert_eq!(credentials.facebook.unwrap().access_token, "fb");
        assert_eq!(credentials.linkedin.unwrap().access_token, "li");
        assert!(credentials.instagram.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_var_counts_as_absent() {
        clear_env();
        std::env::set_var("FACEBOOK_ACCESS_TOKEN", "");
        assert!(Credentials::from_env().facebook.is_none());
        clear_env();
    }
}
