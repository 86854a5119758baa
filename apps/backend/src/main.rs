#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lexiday_backend::run().await
}
