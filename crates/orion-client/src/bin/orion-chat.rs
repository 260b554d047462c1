use clap::Parser;
use orion_client::{ChatSession, HttpTransport, SessionSettings, TurnKind};
use orion_types::RecordId;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Line-oriented chat against an Orion relay
#[derive(Parser, Debug)]
#[command(name = "orion-chat", version, about)]
struct CliArgs {
    /// Base URL of the relay
    #[arg(long, env = "ORION_API_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Model to start with; `dall-e-*` models generate images
    #[arg(long, default_value = "gpt-4o")]
    model: String,

    #[arg(long, default_value = "1")]
    session_id: String,

    #[arg(long, default_value = "1")]
    user_id: String,
}

const HELP: &str = "commands: /model <name>, /history, /quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let transport = HttpTransport::new(&args.server)?;

    let settings = SessionSettings {
        session_id: parse_id(&args.session_id),
        user_id: parse_id(&args.user_id),
        model: args.model,
        ..SessionSettings::default()
    };
    let mut session = ChatSession::new(settings);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("💬 Orion chat on {} ({})", transport.base_url(), HELP);

    loop {
        stdout
            .write_all(format!("[{}] > ", session.settings().model).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("/quit", _) => break,
            ("/history", _) => {
                for turn in session.transcript().iter() {
                    println!("{}", turn);
                }
            }
            ("/model", "") => println!("current model: {}", session.settings().model),
            ("/model", name) => {
                session.select_model(name);
                println!("model set to {}", name);
            }
            (cmd, _) if cmd.starts_with('/') => println!("{}", HELP),
            _ => {
                session.set_input(line);
                if let Some(turn) = session.submit(&transport).await {
                    match turn.kind {
                        TurnKind::Error => eprintln!("{}", turn),
                        TurnKind::Text | TurnKind::Image => println!("{}", turn),
                    }
                }
            }
        }
    }

    Ok(())
}

fn parse_id(raw: &str) -> RecordId {
    raw.parse().unwrap_or_else(|never| match never {})
}
