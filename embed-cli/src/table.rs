//! Plain-text rendering of command results.

use embed_core::ClusterAssignment;

use crate::pipeline::ClusterReport;

const TEXT_PREVIEW_LEN: usize = 80;

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    match flat.char_indices().nth(TEXT_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}

/// `length<TAB>text` per line, full text with newlines flattened to spaces.
pub fn render_lengths(rows: &[(String, usize)]) -> String {
    rows.iter()
        .map(|(text, len)| format!("{}\t{}\n", len, text.replace('\n', " ")))
        .collect()
}

pub fn render_assignments(rows: &[ClusterAssignment]) -> String {
    let mut out = format!("{:<6} {:<8} {}\n", "index", "cluster", "profile");
    out.push_str(&"-".repeat(100));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:<6} {:<8} {}\n",
            row.index,
            row.cluster,
            preview(&row.text)
        ));
    }
    out
}

pub fn render_report(report: &ClusterReport) -> String {
    let mut out = render_assignments(&report.assignments);
    out.push('\n');
    out.push_str(&format!(
        "model: {}  dimension: {}  k: {}  seed: {}\n",
        report.model, report.dimension, report.k, report.seed
    ));
    let sizes: Vec<String> = report
        .cluster_sizes
        .iter()
        .enumerate()
        .map(|(id, n)| format!("{}={}", id, n))
        .collect();
    out.push_str(&format!(
        "inertia: {:.4}  iterations: {}  sizes: {}\n",
        report.inertia,
        report.iterations,
        sizes.join(" ")
    ));
    out
}
