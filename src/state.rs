use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::credentials::CredentialsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;
use crate::config::session::SessionConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub session_config: SessionConfig,
    pub credentials_config: CredentialsConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        session_config: SessionConfig::from_env(),
        credentials_config: CredentialsConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
