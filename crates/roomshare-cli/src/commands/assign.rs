use anyhow::{Context, Result, bail};
use roomshare_engine::{AffinityGraph, AssignmentReport, format_report};
use tracing::info;

use super::settings;

pub fn assign(
    input: Option<&str>,
    config: Option<&str>,
    capacity: Option<usize>,
    format: &str,
) -> Result<()> {
    let settings = settings::resolve(input, config, capacity)?;
    let graph = AffinityGraph::from_file(&settings.input)
        .with_context(|| format!("rejected batch {}", settings.input.display()))?;

    info!(students = graph.len(), capacity = settings.policy.capacity, "running assignment");
    let report = roomshare_engine::assign(&graph, &settings.policy)?;
    report.verify(&graph, &settings.policy)?;

    print!("{}", render(&report, &graph, format)?);
    Ok(())
}

/// Render a finished report in one of the supported output formats.
pub fn render(report: &AssignmentReport, graph: &AffinityGraph, format: &str) -> Result<String> {
    match format {
        "text" => Ok(format_report(report)),
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
        "outcomes" => Ok(format!(
            "{}\n",
            serde_json::to_string_pretty(&report.outcomes(graph))?
        )),
        other => bail!("unknown output format: {other} (expected text, json or outcomes)"),
    }
}
