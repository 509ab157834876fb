use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "rain-cli")]
#[command(about = "Command line client for the Rain Tracker API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record whether it rained today
    Record {
        /// User identifier sent as x-userid
        #[arg(long)]
        user: String,
        /// Did it rain?
        #[arg(long, action = clap::ArgAction::Set)]
        rain: bool,
    },
    /// List a user's observations, newest first
    List {
        /// User identifier sent as x-userid
        #[arg(long)]
        user: String,
    },
    /// Check that the service is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Record { user, rain } => {
            let res = client
                .post(format!("{}/api/v1/rain", base))
                .header("x-userid", user)
                .json(&json!({ "rain": rain }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::List { user } => {
            let res = client
                .get(format!("{}/api/v1/rain", base))
                .header("x-userid", user)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Rain Tracker API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
