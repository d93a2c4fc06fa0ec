use config::{Environment, File};
use sisly_server::{Server, ServerState};
use sisly_store::{ReservationStore, Update};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] sisly_store::Error),

    #[error(transparent)]
    Server(#[from] sisly_server::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(serde::Deserialize, Debug)]
pub struct SislyConfig {
    server: sisly_server::Config,
    store: sisly_store::Config,
}

impl SislyConfig {
    pub fn new() -> Result<Self, Error> {
        let c = config::Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("sisly"))
            .build()?;

        Ok(c.try_deserialize()?)
    }
}

/// Facade class encompassing all components that make up the `sisly` application.
pub struct SislyApp {
    config: SislyConfig,
}

impl SislyApp {
    pub fn new(config: SislyConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<(), Error> {
        let store = ReservationStore::open(&self.config.store.url)?;

        if store.has_updates()? {
            store.update()?;
        }

        info!("reservation store ready at {}", self.config.store.url);

        let listener = match listenfd::ListenFd::from_env().take_tcp_listener(0)? {
            Some(listener) => listener,
            None => std::net::TcpListener::bind(format!(
                "{}:{}",
                self.config.server.url, self.config.server.port
            ))?,
        };

        let state = ServerState { store };

        Ok(Server::serve(listener, state).await?)
    }
}
