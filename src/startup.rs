use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::routes::{handle_submit_lead, health_check};
use crate::upstream_client::UpstreamClient;

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let upstream_client = UpstreamClient::new(
            config.get_upstream_url(),
            Some(config.get_upstream_timeout()),
        )
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, upstream_client)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    upstream_client: UpstreamClient,
) -> Result<Server, std::io::Error> {
    let upstream_client = web::Data::new(upstream_client);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/api/lead", web::post().to(handle_submit_lead))
            .app_data(upstream_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
