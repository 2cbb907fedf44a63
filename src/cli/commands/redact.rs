//! Redact command: compute redaction regions for rendered pages

use crate::audit::AuditLogger;
use crate::cli::commands::load_engine_config;
use crate::domain::{Entity, MatchRegion, PositionedSpan};
use crate::redaction::{RedactionMatcher, RedactionReport};
use anyhow::{Context, Result};
use clap::Args;
use futures::future::join_all;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Entity list JSON, as produced by the scan command
    #[arg(long)]
    pub entities: PathBuf,

    /// Positioned spans JSON: an array of pages, each an array of
    /// {text, bbox} spans in reading order
    #[arg(long)]
    pub spans: PathBuf,

    /// Write the region plan JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Regions computed for one page
#[derive(Debug, Serialize)]
struct PagePlan {
    page: usize,
    regions: Vec<MatchRegion>,
}

/// The full redaction plan handed to an external renderer
#[derive(Debug, Serialize)]
struct RedactionPlan {
    plan_id: Uuid,
    pages: Vec<PagePlan>,
    total_regions: usize,
    unmatched_entities: Vec<String>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> Result<i32> {
        let config = load_engine_config(config_path)?;

        let entities: Vec<Entity> = read_json(&self.entities)
            .with_context(|| format!("Failed to load entities from {}", self.entities.display()))?;
        let pages: Vec<Vec<PositionedSpan>> = read_json(&self.spans)
            .with_context(|| format!("Failed to load page spans from {}", self.spans.display()))?;

        let matcher = Arc::new(RedactionMatcher::new());
        let entities = Arc::new(entities);

        // Pages are independent: match them in parallel
        let tasks = pages.into_iter().enumerate().map(|(page, spans)| {
            let matcher = Arc::clone(&matcher);
            let entities = Arc::clone(&entities);
            tokio::task::spawn_blocking(move || (page, matcher.match_page(&entities, &spans)))
        });

        let mut page_matches: Vec<_> = Vec::new();
        for joined in join_all(tasks).await {
            page_matches.push(joined.context("page matching task failed")?);
        }
        page_matches.sort_by_key(|(page, _)| *page);

        let mut report = RedactionReport::new(&entities);
        let mut page_plans = Vec::with_capacity(page_matches.len());
        for (page, matches) in page_matches {
            report.add_page(&matches);
            page_plans.push(PagePlan {
                page,
                regions: matches.regions,
            });
        }
        report.finalize();

        let plan = RedactionPlan {
            plan_id: Uuid::new_v4(),
            total_regions: report.total_regions,
            unmatched_entities: report.unmatched_entities.clone(),
            pages: page_plans,
        };

        let plan_json =
            serde_json::to_string_pretty(&plan).context("Failed to serialize redaction plan")?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &plan_json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!(
                    "Wrote plan with {} regions to {}",
                    plan.total_regions,
                    path.display()
                );
            }
            None => println!("{plan_json}"),
        }

        eprint!("{}", report.format_console());

        if config.audit.enabled {
            let audit = AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
                true,
            )?;
            if let Err(e) = audit.log_redaction(
                plan.plan_id,
                report.total_pages,
                report.total_regions,
                report.unmatched_count(),
            ) {
                tracing::error!(error = ?e, "failed to write redaction audit entry");
            }
        }

        Ok(0)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
