#[tokio::main]
async fn main() {
    coursehub_be::start_server().await;
}
