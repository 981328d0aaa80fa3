use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "vaktctl")]
#[command(about = "Management CLI for the vakt defense gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway status
    Status,
    /// Query the audit trail
    Audit {
        /// Filter on the action field (exact match)
        #[arg(long)]
        action: Option<String>,

        /// Filter on the tenant id (exact match)
        #[arg(long)]
        tenant: Option<String>,

        /// Filter on the client IP (exact match)
        #[arg(long)]
        ip: Option<String>,

        /// Only failed (or only successful) events
        #[arg(long)]
        success: Option<bool>,
    },
    /// List blocked IPs and attempt counts
    Blocked,
    /// Unblock an IP and reset its attempt counter
    Unblock { ip: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    match cli.command {
        Commands::Status => {
            let res = client
                .get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Audit {
            action,
            tenant,
            ip,
            success,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(action) = action {
                query.push(("action", action));
            }
            if let Some(tenant) = tenant {
                query.push(("tenant_id", tenant));
            }
            if let Some(ip) = ip {
                query.push(("ip", ip));
            }
            if let Some(success) = success {
                query.push(("success", success.to_string()));
            }
            let res = client
                .get(format!("{}/admin/audit", cli.url))
                .query(&query)
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Blocked => {
            let res = client
                .get(format!("{}/admin/blocked", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Unblock { ip } => {
            let res = client
                .post(format!("{}/admin/unblock/{}", cli.url, ip))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
