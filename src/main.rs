//! Minimal user-account service: registration, login, and JWT-gated CRUD
//! over a single user table.
//! Used by: binary entrypoint.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod password;
pub mod server;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod token;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env()?;
    let addr = config.bind_addr.clone();
    let state = state::build_state(config)?;
    tracing::info!("starting accountd on {}", addr);

    server::run(state, &addr).await?;
    Ok(())
}
