use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use linksight_cli::batch::resolve_batch;
use linksight_cli::output::{code_columns, write_canonical, write_candidates};
use linksight_match::{HierarchyResolver, tally};
use linksight_reference::{
    HierarchyConfig, check_dataset_fields, default_hierarchy_path, default_reference_table_path,
    load_choices, load_dataset, load_hierarchy_config, load_reference_table, snapshot_digest,
};

use crate::cli::{LevelsArgs, MatchArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::MatchResult;

fn load_config(path: Option<&Path>) -> Result<HierarchyConfig> {
    let path = path.map_or_else(default_hierarchy_path, Path::to_path_buf);
    load_hierarchy_config(&path)
        .with_context(|| format!("load hierarchy config {}", path.display()))
}

pub fn run_levels(args: &LevelsArgs) -> Result<()> {
    let config = load_config(args.hierarchy.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Level"),
        header_cell("Input field"),
        header_cell("Categories"),
        header_cell("Code column"),
    ]);
    apply_table_style(&mut table);
    for (idx, level) in config.hierarchy.levels().iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            level.name.clone(),
            level.input_field.clone(),
            level.reference_categories.join(", "),
            level.code_column(),
        ]);
    }
    println!("{table}");
    println!(
        "score_cutoff = {}, max_matches = {}",
        config.matching.score_cutoff, config.matching.max_matches
    );
    Ok(())
}

pub fn run_match(args: &MatchArgs) -> Result<MatchResult> {
    let started = Instant::now();
    let span = info_span!("match", dataset = %args.dataset.display());
    let _guard = span.enter();

    // Everything is loaded and validated before the first record is resolved.
    let mut config = load_config(args.hierarchy.as_deref())?;
    if let Some(cutoff) = args.cutoff {
        config.matching.score_cutoff = cutoff;
    }
    if let Some(limit) = args.limit {
        config.matching.max_matches = limit;
    }
    config.matching.validate().context("matching options")?;
    let hierarchy = &config.hierarchy;

    let reference_path = args
        .reference
        .clone()
        .unwrap_or_else(default_reference_table_path);
    let reference = load_reference_table(&reference_path)
        .with_context(|| format!("load reference table {}", reference_path.display()))?;
    reference
        .validate_hierarchy(hierarchy)
        .context("reference table does not fit the hierarchy")?;
    let reference_digest = snapshot_digest(&reference_path)
        .with_context(|| format!("hash reference table {}", reference_path.display()))?;
    info!(
        rows = reference.len(),
        sha256 = %reference_digest,
        "reference table loaded"
    );

    let dataset = load_dataset(&args.dataset, args.id_column.as_deref())
        .with_context(|| format!("load dataset {}", args.dataset.display()))?;
    check_dataset_fields(&dataset.headers, hierarchy).context("dataset columns")?;
    let choices = match &args.choices {
        Some(path) => load_choices(path)
            .with_context(|| format!("load choices {}", path.display()))?,
        None => BTreeMap::new(),
    };
    info!(records = dataset.records.len(), "dataset loaded");

    let options = config.matching.options();
    let resolver = HierarchyResolver::new(hierarchy, &reference, options);
    let outcome = resolve_batch(&resolver, &dataset.records, &choices);

    let columns = code_columns(hierarchy, &reference);
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output {}", path.display()))?;
            write_candidates(BufWriter::new(file), &columns, &outcome.rows)
                .with_context(|| format!("write candidates {}", path.display()))?;
        }
        None => write_candidates(io::stdout().lock(), &columns, &outcome.rows)
            .context("write candidates to stdout")?,
    }
    if let Some(path) = &args.canonical {
        let file = File::create(path)
            .with_context(|| format!("create canonical output {}", path.display()))?;
        write_canonical(BufWriter::new(file), &columns, &outcome.canonical)
            .with_context(|| format!("write canonical matches {}", path.display()))?;
    }

    info!(
        records = dataset.records.len(),
        rows = outcome.rows.len(),
        needs_review = outcome.needs_review(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch resolved"
    );

    Ok(MatchResult {
        reference: reference_path,
        reference_digest,
        records: dataset.records.len(),
        candidate_rows: outcome.rows.len(),
        levels: tally(hierarchy, &outcome.summaries),
        needs_review: outcome.needs_review(),
        output: args.output.clone(),
        canonical_output: args.canonical.clone(),
        canonical: outcome.canonical.len(),
        pending: outcome.pending.len(),
    })
}
