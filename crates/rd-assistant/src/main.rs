//! Returns Desk console: chat with the resolver, or run one-shot commands.

use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use rd_assistant::bootstrap::build_resolver;
use rd_assistant::cli::{self, Cli, CliCommand};
use rd_assistant::{AssistantConfig, Command, CommandOutcome, Resolver};
use rd_protocol::messages;
use rd_report::ReportOutcome;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so replies on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AssistantConfig::load(cli.config.as_deref())?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        classifier = config.classifier.has_credential(),
        "rd-assistant starting"
    );

    let command = cli.command();
    if let CliCommand::Report { path: Some(path) } = &command {
        config.report_path = path.clone();
    }
    let resolver = build_resolver(&config).await?;

    match command {
        CliCommand::Chat => chat(&resolver).await?,
        CliCommand::Ingest { csv } => {
            if let CommandOutcome::Ingested { rows, total } =
                resolver.handle(Command::IngestCsv(csv)).await?
            {
                println!("已匯入 {rows} 筆 目前資料總數 {total} 筆");
            }
        }
        CliCommand::Report { .. } => {
            if let CommandOutcome::Report(outcome) = resolver.handle(Command::GenerateReport).await? {
                match outcome {
                    ReportOutcome::Written { path, .. } => {
                        println!("{}", messages::exported(&path.display().to_string()));
                    }
                    ReportOutcome::Empty => println!("{}", messages::EMPTY_LIST),
                }
            }
        }
        CliCommand::Ask { text } => {
            println!("{}", resolver.resolve(&text.join(" ")).await?);
        }
    }

    Ok(())
}

async fn chat(resolver: &Resolver) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        print!("你：");
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if cli::is_exit(line) {
            break;
        }

        match resolver.resolve(line).await {
            Ok(reply) => println!("系統：{reply}"),
            Err(e) => tracing::error!(error = %e, "failed to resolve message"),
        }
    }

    tracing::info!("chat session ended");
    Ok(())
}
