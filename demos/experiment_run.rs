//! Experiment Run Example
//!
//! Logs a small training run: parameters, per-epoch loss, a model, the
//! training data and a loss curve.
//!
//! Run with: cargo run --example experiment_run -- [ROOT]

use std::collections::BTreeMap;

use anyhow::Context;
use ml_logwriter::artifacts::LogArtifacts;
use ml_logwriter::logging::LogWriter;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

#[derive(Serialize)]
struct Sample {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct LinearModel {
    slope: f64,
    intercept: f64,
}

fn main() -> anyhow::Result<()> {
    let root = std::env::args().nth(1).unwrap_or_else(|| "runs".to_string());
    std::fs::create_dir_all(&root).with_context(|| format!("creating {root}"))?;

    let log = LogWriter::logger(format!("{root}/experiment.log"))?;
    log.install()?;

    let mut artifacts = LogArtifacts::new(&root);
    let run = artifacts.create(None)?.clone();
    info!("run {} at {}", run.name(), run.path().display());

    // -------------------------------------------------------------------------
    // 1. Parameters
    // -------------------------------------------------------------------------
    let mut params = BTreeMap::new();
    params.insert("learning_rate", json!(0.05));
    params.insert("epochs", json!(20));
    params.insert("optimizer", json!("sgd"));
    artifacts.log_parameters(params)?;

    // -------------------------------------------------------------------------
    // 2. Train y = 2x + 1 with plain gradient descent
    // -------------------------------------------------------------------------
    let data: Vec<Sample> = (0..10)
        .map(|i| {
            let x = f64::from(i) / 10.0;
            Sample { x, y: 2.0f64.mul_add(x, 1.0) }
        })
        .collect();

    let mut model = LinearModel {
        slope: 0.0,
        intercept: 0.0,
    };
    let n = data.len() as f64;
    let mut epochs = Vec::new();
    let mut losses = Vec::new();

    for epoch in 0..20u32 {
        let (mut grad_slope, mut grad_intercept, mut loss) = (0.0, 0.0, 0.0);
        for s in &data {
            let err = model.slope.mul_add(s.x, model.intercept) - s.y;
            grad_slope += 2.0 * err * s.x / n;
            grad_intercept += 2.0 * err / n;
            loss += err * err / n;
        }
        model.slope -= 0.5 * grad_slope;
        model.intercept -= 0.5 * grad_intercept;
        epochs.push(epoch);
        losses.push(loss);
    }
    info!(slope = model.slope, intercept = model.intercept, "training finished");

    // -------------------------------------------------------------------------
    // 3. Metrics, model, dataset, graph
    // -------------------------------------------------------------------------
    let final_loss = losses.last().copied().unwrap_or(f64::NAN);
    artifacts.log_metrics([("final_loss", final_loss)])?;
    artifacts.log_model(&model)?;
    artifacts.log_dataset(&data, "train")?;

    // a bad call is reported and the run carries on
    if let Err(e) = artifacts.log_performance_graph(&epochs, &losses[1..], "loss", "epoch", "mse", "broken") {
        warn!("skipped graph: {e}");
    }
    let graph = artifacts.log_performance_graph(&epochs, &losses, "loss", "epoch", "mse", "loss")?;

    println!("Run written to {}", run.path().display());
    println!("Loss curve: {}", graph.display());
    Ok(())
}
