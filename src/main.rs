use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = docgate::cli::Cli::parse();
    if let Err(e) = docgate::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
