use bytes::Bytes;
use chrono::DateTime;
use chrono_tz::Tz;
use http_body_util::Full;
use hyper::{body::Incoming, service::Service, Method, Request, Response, StatusCode};
use log::{error, info};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use std::{future::Future, pin::Pin, sync::Arc};

use crate::airtable::client::AirtableClient;
use crate::database::sqlite::SqliteDatabase;
use crate::hours::central_datetime_now::central_datetime_now;
use crate::sites::mapper::SiteMapper;

/// How long a cached response body stays fresh.
const CACHE_MAX_AGE_SECONDS: i64 = 60;

/// The Server
///
/// This is THE struct that handles all API endpoints and the business logic.
/// Cache reads and writes are handled by functions from `SqliteDatabase`,
/// upstream fetches by `AirtableClient`, and record projection by
/// `SiteMapper`.
///
/// This struct implements the `Service` trait from `hyper` which allows it
/// to be used as a hyper service. For each TCP connection or Client, a new
/// task is spawned with its own clone of this struct.
#[derive(Clone)]
pub struct Server {
    connection_pool: Arc<Pool<SqliteConnectionManager>>,
    airtable: Arc<AirtableClient>,
    mapper: Arc<SiteMapper>,
}

impl Server {
    pub fn setup(
        connection_pool: Arc<Pool<SqliteConnectionManager>>,
        airtable: Arc<AirtableClient>,
    ) -> Self {
        Self {
            connection_pool,
            airtable,
            mapper: Arc::new(SiteMapper::new()),
        }
    }

    /// Obtain a connection from the connection pool.
    fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, String> {
        match self.connection_pool.get() {
            Err(err) => {
                return Err(format!(
                    "Could not get connection - Server.\n{}",
                    err.to_string()
                ));
            }
            Ok(conn) => Ok(conn),
        }
    }

    /// The /api/sites API endpoint.
    ///
    /// Cache-first: a fresh cached body is returned as-is. On a miss the
    /// sites and hours tables are fetched from Airtable, projected, and
    /// the serialized result is cached before being returned. If the
    /// fetch or the projection fails, the last cached body is served
    /// regardless of its age; with no cached body at all this is a 500.
    ///
    /// "Now" is read once here and passed down, so every schedule and
    /// status computation in the request sees the same instant.
    async fn sites(&self, path: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let connection = match self.get_connection() {
            Ok(conn) => conn,
            Err(err) => return Self::server_error(&err),
        };
        let now = central_datetime_now();

        match SqliteDatabase::read_fresh(&connection, path, CACHE_MAX_AGE_SECONDS, &now) {
            Ok(Some(body)) => {
                info!("Cache hit. Returning cached result for {}", path);
                return Self::ok_body(body);
            }
            Ok(None) => info!("Cache miss. Loading from Airtable for {}", path),
            Err(err) => return Self::server_error(&err.to_string()),
        }

        let body = match self.load_sites(&now).await {
            Ok(body) => body,
            Err(err) => {
                error!(
                    "There was an error getting mutual aid sites, returning cached data. Error is: {}",
                    err
                );
                return match SqliteDatabase::read_latest(&connection, path) {
                    Ok(Some(stale)) => Self::ok_body(stale),
                    Ok(None) => Self::server_error(&err),
                    Err(db_err) => Self::server_error(&db_err.to_string()),
                };
            }
        };

        if let Err(err) = SqliteDatabase::write(&connection, path, &body, &now) {
            // Serving the result still works without the cache write.
            error!("Could not write cache for {}.\n{}", path, err.to_string());
        }
        Self::ok_body(body)
    }

    /// Fetches both Airtable tables and projects them into the
    /// serialized response body.
    async fn load_sites(&self, now: &DateTime<Tz>) -> Result<String, String> {
        let sites = self
            .airtable
            .fetch_sites()
            .await
            .map_err(|err| err.to_string())?;
        let hours = self
            .airtable
            .fetch_hours()
            .await
            .map_err(|err| err.to_string())?;
        let result = self
            .mapper
            .map_sites(&sites, &hours, now)
            .map_err(|err| err.to_string())?;
        serde_json::to_string(&result).map_err(|err| err.to_string())
    }

    /// Return a 200 OK response with the serialized body provided.
    fn ok_body(body: String) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let res = Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from(body)))
            .unwrap();
        Ok(res)
    }

    /// Return a 500 Internal Server Error response with the message provided.
    fn server_error(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let res = Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::new(Bytes::from(format!(
                "{{\"error\": \"{}\" }}",
                message
            ))))
            .unwrap();
        Ok(res)
    }

    /// Return a 404 Not Found response with the message provided. The message here is optional.
    /// Leave it empty for no message.
    fn not_found(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let res = Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(if message.is_empty() {
                Bytes::new()
            } else {
                Bytes::from(format!("{{\"error\": \"{}\" }}", message))
            }))
            .unwrap();
        Ok(res)
    }

    /// Return a 400 Bad Request response with the message provided.
    fn bad_request(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let res = Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .body(Full::new(Bytes::from(format!(
                "{{\"error\": \"{}\" }}",
                message
            ))))
            .unwrap();
        Ok(res)
    }
}

impl Service<Request<Incoming>> for Server {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let server = self.clone();
        Box::pin(async move {
            let path = req.uri().path().to_string();
            match req.method() {
                &Method::GET => match path.as_str() {
                    "/api/sites" => server.sites(&path).await,
                    path if path.starts_with("/api") => Server::bad_request("Invalid path"),
                    _ => Server::not_found(""),
                },
                _ => Server::not_found(""),
            }
        })
    }
}
