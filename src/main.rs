use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod form;
mod model;
mod routes;
mod state;
mod store;
mod table;

use config::{Config, StoreBackend};
use db::init_db;

use crate::docs::ApiDoc;
use crate::model::payslip::{ConfiguredDeductions, DeductionPolicy, NoDeductions};
use crate::state::AppState;
use crate::store::{EmployeeStore, MemoryStore, MySqlStore};
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Paydesk is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(store = %config.store_backend, "Server starting...");

    let store: Arc<dyn EmployeeStore> = match config.store_backend {
        StoreBackend::Mysql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            Arc::new(MySqlStore::new(init_db(url).await?))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    let deductions: Arc<dyn DeductionPolicy> = if config.deductions.is_empty() {
        Arc::new(NoDeductions)
    } else {
        info!(rules = config.deductions.rules().len(), "Payslip deductions configured");
        Arc::new(ConfiguredDeductions::clone(&config.deductions))
    };

    let state = Data::new(AppState::new(store, deductions));

    // Initial load so edits can bind to displayed employees right away.
    {
        let mut table = state.table.lock().await;
        table.subscribe(|event| tracing::debug!(?event, "Employee table changed"));
        if let Err(e) = form::refresh(state.store.as_ref(), &mut table).await {
            warn!(error = %e, "Initial employee load failed; table starts empty");
        }
    }

    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard matches the UI's JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
