//! Command handlers. Each one drives the use cases and returns a JSON value
//! for the binary to print.

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info_span, warn, Instrument};

use lb_core::{SelectionCategory, SelectionSet, ToggleOutcome};

use crate::bootstrap::AppServices;
use crate::cli::{CatalogCommand, Command};

/// Result of one toggle in a batch.
#[derive(Debug, Serialize)]
struct ToggleReport {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<ToggleOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<String>,
}

pub async fn execute(command: Command, services: &AppServices) -> anyhow::Result<Value> {
    match command {
        Command::Status => status(services).await,
        Command::Route { path } => route(services, &path).await,
        Command::Catalog { list } => catalog(services, list).await,
        Command::Select { category, ids } => select(services, category, &ids).await,
        Command::Advance { category, ids } => advance(services, category, &ids).await,
        Command::Skip { step } => {
            let outcome = services
                .flow
                .skip(step)
                .instrument(info_span!("command.skip"))
                .await?;
            to_json(&outcome)
        }
    }
}

async fn status(services: &AppServices) -> anyhow::Result<Value> {
    let user = services
        .deps
        .profile
        .current_user()
        .await
        .context("Failed to load onboarding profile")?;
    let resume = services.flow.resume().await?;
    let sync: Vec<_> = SelectionCategory::ALL
        .into_iter()
        .map(|category| services.sync.snapshot(category))
        .collect();

    Ok(json!({
        "online": services.deps.network.is_online(),
        "signed_in": user.is_some(),
        "user": user,
        "resume": {
            "decision": resume,
            "location": resume.location(),
        },
        "sync": sync,
    }))
}

async fn route(services: &AppServices, path: &str) -> anyhow::Result<Value> {
    let decision = services.flow.guard(path).await?;
    Ok(json!({
        "path": path,
        "decision": decision,
        "location": decision
            .location()
            .map(str::to_string)
            .unwrap_or_else(|| path.to_string()),
    }))
}

async fn catalog(services: &AppServices, list: CatalogCommand) -> anyhow::Result<Value> {
    match list {
        CatalogCommand::Interests => to_json(&services.catalog.interests().await),
        CatalogCommand::Subcategories { interests } => {
            to_json(&services.catalog.subcategories(&interests).await)
        }
        CatalogCommand::DealBreakers => to_json(&services.catalog.deal_breakers().await),
    }
}

fn toggle_report(set: &mut SelectionSet, id: &str) -> ToggleReport {
    match set.toggle(id) {
        Ok(outcome) => ToggleReport {
            id: id.to_string(),
            outcome: Some(outcome),
            rejected: None,
        },
        Err(err) => {
            warn!(id, "{err}");
            ToggleReport {
                id: id.to_string(),
                outcome: None,
                rejected: Some(err.to_string()),
            }
        }
    }
}

async fn load(services: &AppServices, category: SelectionCategory) -> anyhow::Result<SelectionSet> {
    services
        .hydrate
        .load(category)
        .await
        .with_context(|| format!("Failed to load saved {category}"))
}

async fn select(
    services: &AppServices,
    category: SelectionCategory,
    ids: &[String],
) -> anyhow::Result<Value> {
    let span = info_span!("command.select", category = %category, count = ids.len());
    async {
        let mut set = load(services, category).await?;

        // Every accepted toggle reschedules; only the first one arms the flush.
        let mut toggles = Vec::with_capacity(ids.len());
        let mut armed = None;
        for id in ids {
            let report = toggle_report(&mut set, id);
            if report.outcome.is_some() {
                if let Some(handle) = services.sync.schedule(category, set.selected()) {
                    armed = Some(handle);
                }
            }
            toggles.push(report);
        }
        if let Some(handle) = armed {
            handle.await.context("Debounced save task failed")?;
        }

        Ok(json!({
            "category": category,
            "selected": set.selected(),
            "complete": set.is_complete(),
            "can_advance": set.can_advance(),
            "toggles": toggles,
            "sync": services.sync.snapshot(category),
        }))
    }
    .instrument(span)
    .await
}

async fn advance(
    services: &AppServices,
    category: SelectionCategory,
    ids: &[String],
) -> anyhow::Result<Value> {
    let span = info_span!("command.advance", category = %category, count = ids.len());
    async {
        let mut set = load(services, category).await?;
        let toggles: Vec<_> = ids.iter().map(|id| toggle_report(&mut set, id)).collect();
        let outcome = services.flow.advance(&set).await?;
        Ok(json!({
            "selected": set.selected(),
            "toggles": toggles,
            "outcome": outcome,
        }))
    }
    .instrument(span)
    .await
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<Value> {
    serde_json::to_value(value).context("Failed to serialize command output")
}
