use anyhow::Result;
use filedepot::{FileDepot, HttpFileDepotClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080".to_owned());
    let client = HttpFileDepotClient::new(base_url)?;

    let prepared = client.prepare_upload().await?;

    println!("id: {}", prepared.id);
    println!("upload url: {}", prepared.upload_url);
    println!("expires in: {}s", prepared.expiry_seconds);

    Ok(())
}
