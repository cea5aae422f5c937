#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tara_lib::run().await?;
    Ok(())
}
