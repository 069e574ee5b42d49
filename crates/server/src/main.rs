#[tokio::main]
async fn main() -> anyhow::Result<()> {
    swingsense_server::start().await
}
