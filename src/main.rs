use noteboard::{config::config, create_app, db::init_db, errors, shared};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> errors::Result<()> {
    shared::tracing::setup_tracing(false);

    let conn = init_db().await?;

    let app = create_app(conn).await?;

    let app = shared::tracing::add_tracing_layer(app);

    let listener = TcpListener::bind(format!("127.0.0.1:{}", config().port)).await.unwrap();

    tracing::info!("listening on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();

    Ok(())
}
