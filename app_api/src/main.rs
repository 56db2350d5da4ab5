use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use app_api::configure_app;
use biz_service::biz_service::ServiceRes;
use common::config::{AppConfig, DEFAULT_CONFIG_FILE, StoreKind};
use common::db::Db;
use log::{LevelFilter, warn};
use std::str::FromStr;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // config path may be passed as the first argument
    let file = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let app_cfg = AppConfig::new(&file)?;
    init_log(&app_cfg)?;
    let res = build_services(&app_cfg).await?;

    let address_and_port = app_cfg.get_server().address();
    warn!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| configure_app(cfg, res.clone()))
    })
    .bind(address_and_port)?
    .run()
    .await?;
    Ok(())
}

pub fn init_log(config: &AppConfig) -> anyhow::Result<()> {
    let level = LevelFilter::from_str(&config.get_sys().log_level)?;
    env_logger::Builder::new().filter(None, level).try_init()?;
    Ok(())
}

async fn build_services(config: &AppConfig) -> anyhow::Result<ServiceRes> {
    let db_cfg = config.get_database();
    match db_cfg.store {
        StoreKind::Mongo => {
            let db = Db::connect(&db_cfg).await?;
            Ok(ServiceRes::mongo(&db).await?)
        }
        StoreKind::Memory => {
            warn!("using in-memory store, data will not survive a restart");
            Ok(ServiceRes::memory())
        }
    }
}
