use std::env;

/// Runtime configuration, read from the environment once at startup.
pub struct Config {
    pub api_key: String,
    pub base_name: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let api_key =
            env::var("AIRTABLE_API_KEY").map_err(|_| "AIRTABLE_API_KEY is not set".to_string())?;
        let base_name = env::var("AIRTABLE_BASE_NAME")
            .map_err(|_| "AIRTABLE_BASE_NAME is not set".to_string())?;
        let port = match env::var("PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| format!("PORT is not a valid port number: {}", port))?,
            Err(_) => 3000,
        };
        Ok(Self {
            api_key,
            base_name,
            port,
        })
    }
}
