#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    sgs_core::log();
    sgs_core::kys();
    sgs_server::run().await
}
