//! Fixed-query smoke test over a built matcher.
//!
//! Each case runs with `top_n = 1`; a case is good when the top score clears the threshold and,
//! if an expected item is named, the top item is that one.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use matcher::{MatchError, VibeMatcher};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmokeCase {
    pub query: String,
    /// Item name the query should rank first, if any.
    #[serde(default)]
    pub expected: Option<String>,
}

impl SmokeCase {
    pub fn new(query: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            expected: Some(expected.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmokeConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_cases")]
    pub cases: Vec<SmokeCase>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            cases: default_cases(),
        }
    }
}

fn default_threshold() -> f32 {
    0.7
}

fn default_cases() -> Vec<SmokeCase> {
    vec![
        SmokeCase::new("energetic urban chic", "Urbanite Tech Runner"),
        SmokeCase::new("cozy rainy day book", "Cozy Knit Cardigan"),
        SmokeCase::new("futuristic cyberpunk", "Cyber-Punk Bomber Jacket"),
    ]
}

/// Result of one smoke query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SmokeOutcome {
    pub query: String,
    pub expected: Option<String>,
    pub top_match: Option<String>,
    pub score: Option<f32>,
    pub good: bool,
    pub latency_secs: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SmokeReport {
    pub threshold: f32,
    pub outcomes: Vec<SmokeOutcome>,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.good)
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.good).count()
    }

    pub fn mean_latency(&self) -> Duration {
        if self.outcomes.is_empty() {
            return Duration::ZERO;
        }
        let total: f64 = self.outcomes.iter().map(|o| o.latency_secs).sum();
        Duration::from_secs_f64(total / self.outcomes.len() as f64)
    }

    /// Plain-text results table followed by the per-query latency series.
    pub fn render_table(&self) -> String {
        let good_header = format!("Good Match? (>{})", self.threshold);
        let headers = ["Test Query", "Top Match", "Score", good_header.as_str(), "Latency (s)"];
        let rows: Vec<[String; 5]> = self
            .outcomes
            .iter()
            .map(|o| {
                [
                    o.query.clone(),
                    o.top_match.clone().unwrap_or_else(|| "N/A".into()),
                    o.score
                        .map(|s| format!("{s:.4}"))
                        .unwrap_or_else(|| "0".into()),
                    (if o.good { "✅" } else { "❌" }).to_string(),
                    format!("{:.4}", o.latency_secs),
                ]
            })
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, headers.iter().copied(), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, rule.iter().map(String::as_str), &widths);
        for row in &rows {
            push_row(&mut out, row.iter().map(String::as_str), &widths);
        }

        out.push_str("\nLatency\n");
        for (i, o) in self.outcomes.iter().enumerate() {
            let _ = writeln!(out, "Query {}: {:.4}s", i + 1, o.latency_secs);
        }
        let _ = writeln!(
            out,
            "\n{}/{} good matches",
            self.passed_count(),
            self.outcomes.len()
        );
        out
    }
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

/// Run every configured case against `matcher`.
pub fn run_smoke(matcher: &VibeMatcher, cfg: &SmokeConfig) -> Result<SmokeReport, MatchError> {
    let mut outcomes = Vec::with_capacity(cfg.cases.len());
    for case in &cfg.cases {
        let start = Instant::now();
        let hits = matcher.find_matches(&case.query, 1)?;
        let latency = start.elapsed();

        let outcome = match hits.first() {
            Some(top) => {
                let name_ok = case
                    .expected
                    .as_deref()
                    .is_none_or(|expected| expected == top.item.name);
                SmokeOutcome {
                    query: case.query.clone(),
                    expected: case.expected.clone(),
                    top_match: Some(top.item.name.clone()),
                    score: Some(top.score),
                    good: top.score > cfg.threshold && name_ok,
                    latency_secs: latency.as_secs_f64(),
                }
            }
            None => SmokeOutcome {
                query: case.query.clone(),
                expected: case.expected.clone(),
                top_match: None,
                score: None,
                good: false,
                latency_secs: latency.as_secs_f64(),
            },
        };
        info!(
            query = %outcome.query,
            top = outcome.top_match.as_deref().unwrap_or("N/A"),
            good = outcome.good,
            latency_ms = latency.as_millis() as u64,
            "smoke case"
        );
        outcomes.push(outcome);
    }
    Ok(SmokeReport {
        threshold: cfg.threshold,
        outcomes,
    })
}
