//! `desk optimize`, `desk explain`, `desk validate`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use desk_core::{OptimizationRequest, OptimizationResult, OptimizerConfig, validate_request};
use desk_optimizer::{DeskScore, Optimizer};

fn load_request(path: &str) -> Result<OptimizationRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request {path}"))?;
    OptimizationRequest::from_json(&content).with_context(|| format!("invalid request {path}"))
}

fn load_optimizer(config: Option<&str>) -> Result<Optimizer> {
    let config = match config {
        Some(path) => OptimizerConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load config {path}"))?,
        None => OptimizerConfig::default(),
    };
    Ok(Optimizer::new(config)?)
}

pub fn optimize(request: &str, config: Option<&str>, format: &str) -> Result<()> {
    let req = load_request(request)?;
    let optimizer = load_optimizer(config)?;
    let result = optimizer.optimize(&req)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print!("{}", format_result(&req, &result)),
    }
    Ok(())
}

pub fn explain(request: &str, employee: &str, config: Option<&str>, format: &str) -> Result<()> {
    let req = load_request(request)?;
    let optimizer = load_optimizer(config)?;

    let Some(ranked) = optimizer.explain(&req, employee)? else {
        bail!("employee {employee} is not part of the request");
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&ranked)?),
        _ => print!("{}", format_ranking(employee, &ranked)),
    }
    Ok(())
}

pub fn validate(request: &str) -> Result<()> {
    let req = load_request(request)?;
    validate_request(&req)?;
    info!(
        employees = req.employees.len(),
        desks = req.desks.len(),
        "request is well-formed"
    );
    println!(
        "✓ {request}: {} employees, {} desks",
        req.employees.len(),
        req.desks.len()
    );
    Ok(())
}

fn format_result(req: &OptimizationRequest, result: &OptimizationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Desk assignment for {}", req.date);
    let _ = writeln!(out);
    for p in &result.placements {
        let day = if p.preferred_day { "" } else { "  (not a preferred day)" };
        let _ = writeln!(
            out,
            "  {:<16} → {:<12} score {:>5.2}{day}",
            p.employee_id, p.desk_id, p.score
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total score: {:.2}", result.score);
    out
}

fn format_ranking(employee: &str, ranked: &[DeskScore]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Permitted desks for {employee}, best first:");
    let _ = writeln!(out);
    for d in ranked {
        let b = &d.breakdown;
        let _ = writeln!(
            out,
            "  {:<12} {:>5.2}  location {:.1}  type {:.1}  access {:.1}  privacy {:.1}  team {:.1}  needs {:.1}",
            d.desk_id,
            d.score,
            b.location,
            b.desk_type,
            b.accessibility,
            b.privacy,
            b.team_adjacency,
            b.special_needs
        );
    }
    out
}
