#[tokio::main]
async fn main() -> anyhow::Result<()> {
    travelbot::run().await
}
