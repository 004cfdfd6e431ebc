#[tokio::main]
async fn main() -> anyhow::Result<()> {
    phored_gateway::node::run_cli().await
}
