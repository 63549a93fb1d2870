//! pagebeacon: server-rendered pages with real-user-monitoring injection.
//! Used by: binary entrypoint.

pub mod console;
pub mod error;
pub mod handlers;
pub mod monitoring;
pub mod render;
pub mod server;
pub mod state;
pub mod store;
pub mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    console::print_banner();

    let state = state::build_state("pagebeacon.db")?;
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    tracing::info!("starting pagebeacon on {}", addr);
    console::print_startup(&addr);

    server::run(state, &addr).await?;
    Ok(())
}
