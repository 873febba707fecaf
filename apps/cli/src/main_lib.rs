use std::sync::Arc;

use skincare_api_client::{AuthApiClient, SkincareApiClient};
use skincare_core::auth::{AuthRepository, Session};
use skincare_core::devices::DeviceTokenRepository;
use skincare_core::notifications::NotificationRuleRepository;
use skincare_core::products::ProductRepository;
use skincare_core::routines::RoutineRepository;
use skincare_core::users::UserRepository;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};
use crate::token_file::FileTokenStore;

/// Logs go to stderr; stdout carries command output only.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub struct AppContext {
    pub config: Config,
    pub session: Session,
    pub users: Arc<UserRepository>,
    pub products: Arc<ProductRepository>,
    pub routines: Arc<RoutineRepository>,
    pub rules: Arc<NotificationRuleRepository>,
    pub devices: DeviceTokenRepository,
}

pub fn build_context(config: Config) -> anyhow::Result<AppContext> {
    let tokens = Arc::new(FileTokenStore::open(config.token_file.clone())?);
    tracing::debug!("Token file in use: {}", config.token_file.display());

    let client_config = config.client_config();
    let auth_client = Arc::new(AuthApiClient::new(client_config.clone())?);
    let api = Arc::new(SkincareApiClient::new(
        client_config,
        tokens.clone(),
        auth_client.clone(),
    )?);

    let users = Arc::new(UserRepository::new(api.clone()));
    let products = Arc::new(ProductRepository::new(api.clone()));
    let routines = Arc::new(RoutineRepository::new(api.clone()));
    let rules = Arc::new(NotificationRuleRepository::new(api.clone()));
    let devices = DeviceTokenRepository::new(api, env!("CARGO_PKG_VERSION"));

    let session = Session::new(Arc::new(AuthRepository::new(auth_client, tokens)))
        .with_cache(users.clone())
        .with_cache(products.clone())
        .with_cache(routines.clone())
        .with_cache(rules.clone());

    Ok(AppContext {
        config,
        session,
        users,
        products,
        routines,
        rules,
        devices,
    })
}
