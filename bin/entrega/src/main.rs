use eyre::Report;

#[tokio::main]
async fn main() -> Result<(), Report> {
    entrega::run().await
}
