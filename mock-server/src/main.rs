use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("API_TOKEN").unwrap_or_else(|_| mock_server::generate_token());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    println!("AUTH_TOKEN={token}");
    mock_server::run(listener, &token).await
}
