use std::sync::Arc;

use url::Url;

use common::identity::NamespaceResolver;
use common::namespace::Namespace;
use common::store::{Store, StoreError};
use common::workspace::Workspace;

use crate::auth::TokenAuthority;
use crate::config::Config;
use crate::database::{Database, DatabaseSetupError};

/// Main service state - orchestrates all components
#[derive(Clone)]
pub struct State {
    database: Database,
    store: Store,
    resolver: NamespaceResolver,
    tokens: TokenAuthority,
    public_base_url: Option<String>,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Setup database
        let database_url = match config.sqlite_path {
            Some(ref path) => Url::parse(&format!("sqlite://{}", path.display()))
                .map_err(|_| StateSetupError::InvalidDatabaseUrl),
            // otherwise just set up an in-memory database
            None => Url::parse("sqlite::memory:").map_err(|_| StateSetupError::InvalidDatabaseUrl),
        }?;
        tracing::info!("Database URL: {:?}", database_url);
        let database = Database::connect(&database_url).await?;

        // 2. Setup object store backend
        let store = Store::new(config.store.clone())?;

        // 3. Identity plumbing: resolver looks usernames up through the
        //    database on every call, tokens are signed with the service secret
        let resolver = NamespaceResolver::new(Arc::new(database.clone()));
        let tokens = TokenAuthority::new(config.token_secret.as_bytes());

        Ok(Self {
            database,
            store,
            resolver,
            tokens,
            public_base_url: config.public_base_url.clone(),
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn resolver(&self) -> &NamespaceResolver {
        &self.resolver
    }

    pub fn tokens(&self) -> &TokenAuthority {
        &self.tokens
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.public_base_url.as_deref()
    }

    /// The caller's view of the store.
    pub fn workspace(&self, namespace: Namespace) -> Workspace {
        Workspace::new(self.store.clone(), namespace)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("invalid database url")]
    InvalidDatabaseUrl,

    #[error("failed to set up the database: {0}")]
    Database(#[from] DatabaseSetupError),

    #[error("failed to set up the object store: {0}")]
    Store(#[from] StoreError),
}
