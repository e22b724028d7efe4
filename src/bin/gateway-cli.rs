use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the vehicle gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(short, long, default_value = "1.0")]
    api_version: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the gateway API version
    Version,
    /// List cached vehicles
    Vehicles,
    /// Show vehicle info
    Vehicle { id: String },
    /// Show door lock status
    Doors { id: String },
    /// Show fuel level
    Fuel { id: String },
    /// Show battery level
    Battery { id: String },
    /// Start the engine
    Start { id: String },
    /// Stop the engine
    Stop { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let vehicles = format!("{}/api/v{}/vehicles", base, cli.api_version);

    let res = match &cli.command {
        Commands::Version => {
            let res = client.get(format!("{}/version", base)).send().await?;
            println!("{}", res.text().await?);
            return Ok(());
        }
        Commands::Vehicles => client.get(&vehicles).send().await?,
        Commands::Vehicle { id } => client.get(format!("{}/{}", vehicles, id)).send().await?,
        Commands::Doors { id } => client.get(format!("{}/{}/doors", vehicles, id)).send().await?,
        Commands::Fuel { id } => client.get(format!("{}/{}/fuel", vehicles, id)).send().await?,
        Commands::Battery { id } => {
            client.get(format!("{}/{}/battery", vehicles, id)).send().await?
        }
        Commands::Start { id } => engine(&client, &vehicles, id, "START").await?,
        Commands::Stop { id } => engine(&client, &vehicles, id, "STOP").await?,
    };
    print_response(res).await
}

async fn engine(
    client: &reqwest::Client,
    vehicles: &str,
    id: &str,
    action: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    client
        .post(format!("{}/{}/engine", vehicles, id))
        .json(&json!({ "action": action }))
        .send()
        .await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
