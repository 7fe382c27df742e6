mod airtable;
mod database;
mod hours;
mod server;
mod sites;

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use log::{error, info};
use r2d2_sqlite::SqliteConnectionManager;
use tokio::net::TcpListener;

use airtable::client::AirtableClient;
use airtable::config::Config;
use database::sqlite::SqliteDatabase;
use server::server::Server;

pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const ISO_FORMAT_DATE: &str = "%Y-%m-%d";

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let manager = SqliteConnectionManager::file("cache.db");
    let pool = r2d2::Pool::builder().build(manager).unwrap();
    let pool = Arc::new(pool);
    SqliteDatabase::create_table(&pool.get().unwrap()).unwrap();

    let airtable = Arc::new(AirtableClient::new(&config));
    let server = Server::setup(pool.clone(), airtable);

    let listener = TcpListener::bind(("127.0.0.1", config.port)).await.unwrap();
    info!("Server is running on port {}", config.port);

    loop {
        let (stream, _) = listener.accept().await.unwrap();
        let io = TokioIo::new(stream);
        let server_clone = server.clone();
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, server_clone)
                .await
            {
                error!("{}", err);
            }
        });
    }
}
