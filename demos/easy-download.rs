use anyhow::Result;
use filedepot::{helper, HttpFileDepotClient};
use std::env;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = env::args().collect::<Vec<_>>();

    match args.as_slice() {
        [_, base_url, id, path] => download(base_url, id, path).await,
        _ => panic!(
            "\n\nPlease input [file_depot_base_url], the [file_id] and the [path_to_save_file]\n\n"
        ),
    }
}

async fn download(base_url: &str, id: &str, path: &str) -> Result<()> {
    let client = HttpFileDepotClient::new(base_url)?;
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;

    let written = helper::download(
        &client,
        id,
        file,
        Some(Arc::new(Mutex::new(|name: Arc<String>, pos: usize, total: usize| {
            println!("name: {name} {pos}/{total}");
        }))),
    )
    .await?;

    println!("{written} bytes downloaded to path:{path}");

    Ok(())
}
