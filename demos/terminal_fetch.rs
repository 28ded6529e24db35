//! Fetch every URL given on the command line behind one terminal status area.
//!
//! ```text
//! RUST_LOG=progressive_fetch=debug cargo run --example terminal_fetch -- https://example.com/a.wasm
//! ```

use color_eyre::Result;
use futures::future::join_all;
use progressive_fetch::progress::{ProgressBarController, ProgressBarOpts, TerminalStatus};
use progressive_fetch::FetcherBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        eprintln!("usage: terminal_fetch <url>...");
        return Ok(());
    }

    let mut opts = ProgressBarOpts::with_pip_style();
    opts.set_clear(false);
    let controller = ProgressBarController::new(
        TerminalStatus::new(opts),
        FetcherBuilder::new().build()?,
    );

    let fetches = urls.iter().map(|url| {
        let controller = controller.clone();
        async move {
            let response = controller.request(url.as_str()).await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, progressive_fetch::Error>((status, body.len()))
        }
    });

    for (url, result) in urls.iter().zip(join_all(fetches).await) {
        match result {
            Ok((status, len)) => println!("{} {} ({} bytes)", status, url, len),
            Err(e) => println!("failed {}: {}", url, e),
        }
    }

    Ok(())
}
