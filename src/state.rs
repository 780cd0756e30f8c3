use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    BookService, FineService, LoanService, SeaOrmBookService, SeaOrmFineService,
    SeaOrmLoanService, SeaOrmUserService, UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub user_service: Arc<dyn UserService>,

    pub book_service: Arc<dyn BookService>,

    pub loan_service: Arc<dyn LoanService>,

    pub fine_service: Arc<dyn FineService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(store, config))
    }

    /// Wires every service over an already connected store.
    #[must_use]
    pub fn with_store(store: Store, config: Config) -> Self {
        let config = Arc::new(RwLock::new(config));

        let user_service =
            Arc::new(SeaOrmUserService::new(store.clone())) as Arc<dyn UserService>;
        let book_service =
            Arc::new(SeaOrmBookService::new(store.clone())) as Arc<dyn BookService>;
        let loan_service = Arc::new(SeaOrmLoanService::new(store.clone(), config.clone()))
            as Arc<dyn LoanService>;
        let fine_service =
            Arc::new(SeaOrmFineService::new(store.clone())) as Arc<dyn FineService>;

        Self {
            config,
            store,
            user_service,
            book_service,
            loan_service,
            fine_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
