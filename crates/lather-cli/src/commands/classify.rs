use anyhow::Context;
use lather_core::Day;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ClassifyResponse {
    photo: String,
    verdict: &'static str,
    showered: bool,
    /// Today, when the verdict put it in the ledger.
    recorded: Option<Day>,
    this_month: usize,
}

/// Handle `lather classify <photo>`.
pub async fn handle(args: &ClassifyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = tokio::fs::read(&args.photo)
        .await
        .with_context(|| format!("failed to read photo {}", args.photo.display()))?;

    let classifier = ctx.classifier()?;
    let verdict = classifier
        .classify(raw)
        .await
        .with_context(|| format!("could not classify {}", args.photo.display()))?;

    let today = ctx.ledger.today();
    let response = ClassifyResponse {
        photo: args.photo.display().to_string(),
        verdict: verdict.label(),
        showered: verdict.is_positive(),
        recorded: verdict.is_positive().then_some(today),
        this_month: ctx.ledger.count_in_month(today.year(), today.month())?,
    };
    output(&response, flags.format)
}
