use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, BlogService, CourseService, SeaOrmAuthService, SeaOrmBlogService,
    SeaOrmCourseService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub course_service: Arc<dyn CourseService>,

    pub auth_service: Arc<dyn AuthService>,

    pub blog_service: Arc<dyn BlogService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.general).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wires the services over an already-migrated store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let course_service = Arc::new(SeaOrmCourseService::new(store.clone()))
            as Arc<dyn CourseService + Send + Sync + 'static>;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService + Send + Sync + 'static>;

        let blog_service = Arc::new(SeaOrmBlogService::new(store.clone()))
            as Arc<dyn BlogService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            course_service,
            auth_service,
            blog_service,
        }
    }
}
