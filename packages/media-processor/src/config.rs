use std::net::SocketAddr;
use std::time::Duration;

use media_core::FetcherOptions;

const DEFAULT_LISTEN: &str = "0.0.0.0:3001";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// プロセス設定
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub fetcher: FetcherOptions,
}

impl Config {
    /// 環境変数から設定を読み込む。
    ///
    /// すべて任意:
    /// - MEDIA_PROXY_LISTEN (デフォルト 0.0.0.0:3001)
    /// - MEDIA_PROXY_FETCH_TIMEOUT_SECS
    /// - MEDIA_PROXY_USER_AGENT
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen = lookup("MEDIA_PROXY_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen_addr = listen.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            name: "MEDIA_PROXY_LISTEN",
            value: listen.clone(),
            reason: e.to_string(),
        })?;

        let timeout = match lookup("MEDIA_PROXY_FETCH_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: "MEDIA_PROXY_FETCH_TIMEOUT_SECS",
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: "MEDIA_PROXY_FETCH_TIMEOUT_SECS",
                        value,
                        reason: "must be greater than 0".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let mut fetcher = FetcherOptions {
            timeout,
            ..Default::default()
        };
        if let Some(user_agent) = lookup("MEDIA_PROXY_USER_AGENT")
            && !user_agent.is_empty()
        {
            fetcher.user_agent = user_agent;
        }

        Ok(Self {
            listen_addr,
            fetcher,
        })
    }
}
