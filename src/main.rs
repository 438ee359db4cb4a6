mod config;
mod openai;
mod web;

use actix_files as fs;
use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;

use config::Config;
use openai::{CompletionClient, OpenAiClient};
use web::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting AI coder server");

    // Load configuration, refusing to start without an API key
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let client: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::new(&config));
    let client = Data::from(client);

    let port = config.port;
    info!("AI coder server running on http://localhost:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(client.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/", "./public").index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
