use lead_proxy::config::get_configuration;
use lead_proxy::startup::Application;
use lead_proxy::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(
        String::from("lead_proxy"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration().expect("Missing configuration file.");
    let application = Application::build(config.clone()).await?;

    tracing::info!(
        "Server listening on {}:{}",
        config.application.get_host(),
        application.get_port()
    );

    application.run_until_stop().await
}
