use std::io::Read;

use mail_triage::classifier::{Categorizer, EmailInput};
use mail_triage::config::TriageConfig;
use mail_triage::model::create_classifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let (subject, body) = match (args.next(), args.next()) {
        (Some(subject), Some(body)) => (subject, body),
        _ => {
            eprintln!("Usage: mail-triage <subject> <body>");
            eprintln!("  Pass '-' as <body> to read it from stdin.");
            std::process::exit(2);
        }
    };

    let body = if body == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        body
    };

    let config = TriageConfig::from_env()?;
    let model = create_classifier(&config.model_config())?;
    let categorizer = Categorizer::new(model).with_label_policy(config.label_policy);

    let input = EmailInput::new(subject, body);
    let category = categorizer.categorize(&input).await?;

    println!("{}", serde_json::json!({ "category": category }));
    Ok(())
}
