use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "cliquenet", version)]
struct Cli {
    /// More logging on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Scene configuration JSON; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Topology JSON; the reference network when omitted.
    #[arg(long, global = true)]
    topology: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long, default_value_t = false, global = true)]
    pretty: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved cliques and cross-links.
    Topology,
    /// Print every classified edge.
    Edges,
    /// Print the adjacency matrix over the grid-row order.
    Matrix,
    /// Print the phases of the animation timeline.
    Timeline,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(p) => cliquenet::SceneConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => cliquenet::SceneConfig::default(),
    };
    let spec = match &cli.topology {
        Some(p) => cliquenet::TopologySpec::from_path(p)
            .with_context(|| format!("load topology '{}'", p.display()))?,
        None => cliquenet::TopologySpec::reference(),
    };
    let topology = cliquenet::Topology::from_spec(&spec)?;
    let edges = cliquenet::EdgeClassifier::classify(&topology)?;

    let out = match cli.cmd {
        Command::Topology => cmd_topology(&topology),
        Command::Edges => cmd_edges(&topology, &edges),
        Command::Matrix => cmd_matrix(&topology, &edges)?,
        Command::Timeline => cmd_timeline(&topology, &edges, &config)?,
    };

    let text = if cli.pretty {
        serde_json::to_string_pretty(&out)
    } else {
        serde_json::to_string(&out)
    }
    .context("serialize output")?;
    println!("{text}");
    Ok(())
}

fn cmd_topology(topology: &cliquenet::Topology) -> serde_json::Value {
    let cliques: serde_json::Map<String, serde_json::Value> = topology
        .cliques()
        .iter()
        .map(|(group, members)| {
            let labels: Vec<&str> = members.iter().map(|&id| topology.label(id)).collect();
            (group.title().to_string(), json!(labels))
        })
        .collect();
    let cross_links: Vec<[&str; 2]> = topology
        .cross_links()
        .iter()
        .map(|&(a, b)| [topology.label(a), topology.label(b)])
        .collect();
    json!({
        "hub": topology.label(topology.hub()),
        "nodes": topology.node_count(),
        "cliques": cliques,
        "cross_links": cross_links,
    })
}

fn cmd_edges(
    topology: &cliquenet::Topology,
    edges: &cliquenet::EdgeClassifier,
) -> serde_json::Value {
    let list: Vec<serde_json::Value> = edges
        .edges()
        .map(|(key, ty)| {
            json!({
                "a": topology.label(key.a()),
                "b": topology.label(key.b()),
                "type": ty.code(),
                "name": ty.name(),
            })
        })
        .collect();
    let counts: serde_json::Map<String, serde_json::Value> = cliquenet::EdgeType::ALL
        .iter()
        .map(|&ty| (ty.name().to_string(), json!(edges.count(ty))))
        .collect();
    json!({ "counts": counts, "edges": list })
}

fn cmd_matrix(
    topology: &cliquenet::Topology,
    edges: &cliquenet::EdgeClassifier,
) -> anyhow::Result<serde_json::Value> {
    let matrix = cliquenet::build_matrix(&topology.row_order(), edges)?;
    let order: Vec<&str> = matrix.order().iter().map(|&id| topology.label(id)).collect();
    Ok(json!({
        "order": order,
        "cells": matrix.len(),
        "rows": matrix.rows(),
    }))
}

fn cmd_timeline(
    topology: &cliquenet::Topology,
    edges: &cliquenet::EdgeClassifier,
    config: &cliquenet::SceneConfig,
) -> anyhow::Result<serde_json::Value> {
    let timeline = cliquenet::build_timeline(topology, edges, config)?;
    let fps = config.frame_rate()?;
    let phases: Vec<serde_json::Value> = timeline
        .phases
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "run_time_s": p.run_time_s,
                "hold_s": p.hold_s,
                "directives": p.directives.len(),
            })
        })
        .collect();
    Ok(json!({
        "fps": fps.num,
        "duration_s": timeline.duration_s(),
        "frames": timeline.frame_count(fps),
        "phases": phases,
    }))
}
