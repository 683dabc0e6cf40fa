use anyhow::Result;
use filedepot::blocking::FileDepotClient;
use std::env;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = env::args().collect::<Vec<_>>();

    match args.as_slice() {
        [_, base_url, path, ids @ ..] if !ids.is_empty() => {
            let client = FileDepotClient::new(base_url.as_str())?;
            let zip = client.download_batch(ids)?;
            std::fs::write(path, &zip)?;
            println!("{} files zipped into {path} ({} bytes)", ids.len(), zip.len());
            Ok(())
        }
        _ => panic!("\n\nPlease input [file_depot_base_url], the [path_to_save_zip] and [file_ids...]\n\n"),
    }
}
