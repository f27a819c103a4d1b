use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use explorer_live::{LiveClient, LiveOptions};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut opts = LiveOptions::parse();

    if opts.host.is_empty() {
        opts.host = env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
    }

    tracing::info!("Configuration:");
    tracing::info!("  Server URL: {}", sensitive_url(&opts.server_url));
    tracing::info!("  Page: {:?}", opts.page);
    tracing::info!("  Key: {}", opts.key.as_deref().unwrap_or("-"));
    tracing::info!("  Host: {}", opts.host);
    tracing::info!("  Animation: {}", opts.animation);
    tracing::info!("  Info visibility: {:?}", opts.info_visibility);
    tracing::info!("  Info ids: {:?}", opts.info_ids);

    LiveClient::new(opts).run().await?;

    Ok(())
}

fn sensitive_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url.to_string();
    };
    match url[scheme_end..].find('@') {
        Some(at) => format!("{}***{}", &url[..scheme_end], &url[scheme_end + at..]),
        None => url.to_string(),
    }
}
