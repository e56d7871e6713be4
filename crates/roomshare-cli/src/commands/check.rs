use anyhow::{Context, Result};
use roomshare_core::Gender;
use roomshare_engine::AffinityGraph;

use super::settings;

/// Validate a batch without running the engine.
pub fn check(input: Option<&str>, config: Option<&str>) -> Result<()> {
    let settings = settings::resolve(input, config, None)?;
    let graph = AffinityGraph::from_file(&settings.input)
        .with_context(|| format!("rejected batch {}", settings.input.display()))?;

    println!("✓ {} is a valid batch", settings.input.display());
    println!("{}", summarize(&graph));
    Ok(())
}

pub fn summarize(graph: &AffinityGraph) -> String {
    let students = graph.students();
    let female = students.iter().filter(|s| s.gender == Gender::Female).count();
    let male = students.len() - female;
    let mutual_pairs = students
        .iter()
        .flat_map(|s| s.relations.iter().map(move |&r| (s.id, r)))
        .filter(|&(a, b)| a < b && graph.is_mutual(a, b))
        .count();
    let without_relations = students.iter().filter(|s| s.relations.is_empty()).count();

    format!(
        "  Students:     {}\n  Female/male:  {female}/{male}\n  Mutual pairs: {mutual_pairs}\n  No relations: {without_relations}",
        students.len()
    )
}
