use once_cell::sync::Lazy;
use reqwest::Response;
use std::net::TcpListener;
use std::time;
use wiremock::MockServer;

use lead_proxy::{
    config::{get_configuration, Settings},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

// The subscriber can only be installed once per test binary. Logs are discarded unless
// TEST_LOG is set, e.g. `TEST_LOG=true cargo test | bunyan`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = String::from("info");
    let subscriber_name = String::from("test");

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub upstream_server: MockServer,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        TestApp::spawn_app_with(|_| {}).await
    }

    pub async fn spawn_app_with_upstream_timeout(timeout: time::Duration) -> TestApp {
        TestApp::spawn_app_with(|config| config.set_upstream_timeout(timeout)).await
    }

    /// The upstream URL points to a port nobody listens on.
    pub async fn spawn_app_with_unreachable_upstream() -> TestApp {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        drop(listener);

        TestApp::spawn_app_with(|config| {
            config.set_upstream_url(format!("http://127.0.0.1:{}/exec", port))
        })
        .await
    }

    async fn spawn_app_with(configure: impl FnOnce(&mut Settings)) -> TestApp {
        Lazy::force(&TRACING);

        let mut config = get_configuration().expect("Missing configuration file.");
        let upstream_server = MockServer::start().await;

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_upstream_url(format!("{}/exec", upstream_server.uri()));
        configure(&mut config);

        let application = Application::build(config)
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            upstream_server,
        }
    }

    pub async fn post_lead(&self, body: &serde_json::Value) -> Response {
        self.post_raw_lead(body.to_string()).await
    }

    pub async fn post_raw_lead(&self, body: String) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/api/lead", self.address);

        client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn valid_lead() -> serde_json::Value {
    serde_json::json!({
        "vorname": "Max",
        "nachname": "Mustermann",
        "email": "max@mail.de",
        "telefon": "0151 2345678",
        "projekt": "Wohnen in der Lohe – Schmidgaden",
    })
}
