use clap::Parser;
use ferrous_doh_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ferrous-doh")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous DoH - DNS-over-HTTPS gateway (RFC 8484)")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream nameserver (`internal`, `IP`, `IP:port` or `host:port`)
    #[arg(short = 'r', long)]
    resolver: Option<String>,

    /// Value echoed in the `authority` response header
    #[arg(long)]
    authority: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        resolver: cli.resolver.clone(),
        authority: cli.authority.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous DoH v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DohServices::new(&config)?;

    let bind_addr = config.server.socket_addr()?;

    server::start_web_server(bind_addr, services.app_state).await?;

    info!("Server shutdown complete");
    Ok(())
}
