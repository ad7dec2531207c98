use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};

#[derive(Parser)]
#[command(name = "panel-cli")]
#[command(about = "Management CLI for the nginx panel", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5005")]
    url: String,

    /// Session token (value of the panel's session cookie).
    #[arg(short, long)]
    session: String,

    /// Cookie name the panel is configured with.
    #[arg(long, default_value = "nginx_panel_sid")]
    cookie: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sites and their enabled state
    Sites,
    /// Run nginx -t and print the verdict
    Test,
    /// Reload nginx
    Reload,
    /// Create a new backup archive
    Backup,
    /// List backup archives, newest first
    Backups,
    /// Show the authenticated identity
    Me,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("{}={}", cli.cookie, cli.session))?,
    );

    let response = match cli.command {
        Commands::Sites => {
            client
                .get(format!("{}/api/sites", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Test => {
            client
                .post(format!("{}/api/nginx/test", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Reload => {
            client
                .post(format!("{}/api/nginx/reload", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Backup => {
            client
                .post(format!("{}/api/backup", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Backups => {
            client
                .get(format!("{}/api/backup", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Me => {
            client
                .get(format!("{}/api/me", cli.url))
                .headers(headers)
                .send()
                .await?
        }
    };

    let status = response.status();
    let body = response.text().await?;
    if status.is_redirection() {
        eprintln!("Error: not authenticated (session expired or invalid)");
        std::process::exit(1);
    }
    if !status.is_success() {
        eprintln!("Error: panel returned status {}", status);
        eprintln!("{}", body);
        std::process::exit(1);
    }
    println!("{}", body);

    Ok(())
}
