use api_types::snapshot::GroupDocument;
use engine::MemberId;
use settings::OutputFormat;

mod error;
mod report;
mod settings;
mod snapshot;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitpot={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let path = settings
        .snapshot
        .as_deref()
        .ok_or(error::AppError::MissingSnapshot)?;
    tracing::info!("Reading group snapshot from {path}...");
    let raw = std::fs::read_to_string(path)?;
    let document: GroupDocument = serde_json::from_str(&raw)?;

    let group = snapshot::group_from_document(&document)?;
    let mut summary = group.summarize();
    tracing::info!(
        balances = summary.balances.len(),
        transfers = summary.debts.len(),
        "summary computed"
    );

    if let Some(uid) = settings.member.as_deref() {
        summary = report::focus(summary, &MemberId::new(uid)?)?;
    }

    let view = report::view(document.name.as_deref(), &group, &summary);
    match settings.format {
        OutputFormat::Text => print!("{}", report::TextReport(&view)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }

    Ok(())
}
