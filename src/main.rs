#[tokio::main]
async fn main() -> anyhow::Result<()> {
    formfill_cli::cli::app::run().await
}
