#[tokio::main]
async fn main() {
    dealership_backend::run().await;
}
