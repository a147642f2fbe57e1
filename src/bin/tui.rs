use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    taskpager::tui::run().await
}
