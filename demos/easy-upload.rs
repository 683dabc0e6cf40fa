use anyhow::Result;
use filedepot::{helper, FileDepot, HttpFileDepotClient};
use std::env;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = env::args().collect::<Vec<_>>();

    match args.as_slice() {
        [_, base_url, path] => upload(base_url, path).await,
        _ => panic!("\n\nPlease input [file_depot_base_url] and the [path_to_the_file]\n\n"),
    }
}

async fn upload(base_url: &str, path: &str) -> Result<()> {
    let client = HttpFileDepotClient::new(base_url)?;
    let mut file = File::open(path)?;
    let name = Path::new(path)
        .file_name()
        .and_then(|x| x.to_str())
        .map(|x| x.to_owned());

    let item = helper::upload(
        &client,
        &mut file,
        name.as_deref(),
        None,
        Some(Arc::new(Mutex::new(|name: Arc<String>, pos: usize, total: usize| {
            println!("name: {name} {pos}/{total}");
        }))),
    )
    .await?;

    let metadata = client.get_file_metadata(&item.id, false).await?;
    println!("uploaded: {} ({} bytes) id: {}", metadata.file_name, metadata.size, metadata.id);

    Ok(())
}
