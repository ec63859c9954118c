use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging, configuration, and the application router.
    let (binding_addr, router) = weathergate_server::init().await?;

    let listener = TcpListener::bind(&binding_addr).await?;
    tracing::info!(%binding_addr, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}
