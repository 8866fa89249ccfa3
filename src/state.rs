//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::store::sqlite::UserStore;
use crate::telemetry::Metrics;
use crate::token::codec::TokenCodec;

pub struct AppStateInner {
    pub config: Config,
    pub codec: TokenCodec,
    pub users: UserStore,
    pub metrics: Metrics,
}

pub type AppState = Arc<AppStateInner>;

fn assemble(config: Config, users: UserStore) -> AppState {
    let codec = TokenCodec::new(&config.jwt_secret);
    Arc::new(AppStateInner {
        config,
        codec,
        users,
        metrics: Metrics::new(),
    })
}

pub fn build_state(config: Config) -> Result<AppState> {
    let users = UserStore::open(&config.db_path)?;
    Ok(assemble(config, users))
}

pub fn build_test_state() -> Result<AppState> {
    let config = Config {
        bind_addr: "127.0.0.1:0".into(),
        db_path: ":memory:".into(),
        jwt_secret: "test-secret".into(),
        session_ttl_secs: 300,
        grant_ttl_secs: 60,
    };
    let users = UserStore::open_in_memory()?;
    Ok(assemble(config, users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::claims::Claims;

    #[test]
    fn test_state_codec_uses_configured_secret() -> Result<()> {
        let state = build_test_state()?;
        let token = state
            .codec
            .encode(&Claims::new("a@example.com".into(), 1, 60))?;
        assert!(state.codec.decode(&token).is_ok());
        Ok(())
    }

    #[test]
    fn test_state_store_is_empty() -> Result<()> {
        let state = build_test_state()?;
        assert!(state.users.list()?.is_empty());
        Ok(())
    }
}
