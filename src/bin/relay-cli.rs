use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for the message relay facade", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one message
    Post {
        /// Message text
        msg: String,
    },
    /// Show stored messages merged with the messages service
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}/messages", cli.url.trim_end_matches('/'));

    match cli.command {
        Commands::Post { msg } => {
            let res = client
                .post(&endpoint)
                .json(&serde_json::json!({ "msg": msg }))
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::List => {
            let res = client.get(&endpoint).send().await?;
            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("{}", text);
            } else {
                eprintln!("Error: facade returned status {}", status);
                eprintln!("Response: {}", text);
            }
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: facade returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
