//! Command-line interface for the treeline utility
//!
//! Reads a JSON tree document with caller-measured node sizes, runs the layout
//! engine over it and writes positions, connectors and bounds back as JSON.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use treeline::core::logging::init_logging;
use treeline::{
    compile_path, Bounds, Dimensions, FlowDirection, Gap, GraphConfig, GraphOptions,
    HierarchyNode, Layout, LayoutEngine, Point,
};

/// Treeline - Lay out trees and route their connectors
#[derive(Parser)]
#[command(name = "treeline")]
#[command(about = "Compute tree layouts and rounded connector paths from JSON documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Default flow direction for nodes without their own
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DirectionChoice {
    Vertical,
    Horizontal,
}

impl From<DirectionChoice> for FlowDirection {
    fn from(value: DirectionChoice) -> Self {
        match value {
            DirectionChoice::Vertical => FlowDirection::Vertical,
            DirectionChoice::Horizontal => FlowDirection::Horizontal,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute node positions and connectors for a tree document
    Layout {
        /// Input JSON document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the layout JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Layout configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Horizontal gap, overrides the config file
        #[arg(long)]
        gap_x: Option<f64>,

        /// Vertical gap, overrides the config file
        #[arg(long)]
        gap_y: Option<f64>,

        /// Default flow direction, overrides the config file
        #[arg(long, value_enum)]
        direction: Option<DirectionChoice>,

        /// Include the compiled SVG path of every edge
        #[arg(long)]
        paths: bool,

        /// Pretty-print the JSON even when not writing to a terminal
        #[arg(long)]
        pretty: bool,
    },

    /// Check a tree document for duplicate ids and missing sizes
    Validate {
        /// Input JSON document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Compile a waypoint list ("x,y x,y ...") into an SVG path
    Path {
        /// Whitespace-separated `x,y` pairs
        points: String,
    },
}

/// Input document: a tree plus the measured size of every node
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDocument {
    pub root: HierarchyNode<serde_json::Value>,
    #[serde(default)]
    pub sizes: BTreeMap<String, Dimensions>,
}

#[derive(Serialize)]
struct NodeOutput<'a> {
    id: &'a str,
    x: f64,
    y: f64,
    depth: usize,
    width: f64,
    height: f64,
}

#[derive(Serialize)]
struct EdgeOutput<'a> {
    source: &'a str,
    target: &'a str,
    waypoints: &'a [Point],
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    nodes: Vec<NodeOutput<'a>>,
    edges: Vec<EdgeOutput<'a>>,
    bounds: Bounds,
}

/// Main CLI application
#[derive(Debug, Default)]
pub struct TreelineApp;

impl TreelineApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Explicit flags win; otherwise init_logging falls back to the environment
        let level = match (cli.log_level, cli.verbose) {
            (Some(level), _) => Some(level.as_str()),
            (None, true) => Some(LogLevel::Debug.as_str()),
            (None, false) => None,
        };
        if let Err(e) = init_logging(level, cli.log_format.map(|f| f.as_str())) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Treeline v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Layout {
                input,
                output,
                config,
                gap_x,
                gap_y,
                direction,
                paths,
                pretty,
            } => {
                let config = self.resolve_config(config.as_deref(), gap_x, gap_y, direction)?;
                self.layout_command(input, output, config, paths, pretty, cli.verbose)
            }
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Path { points } => self.path_command(&points),
        }
    }

    /// Merge the optional config file with flag overrides
    pub fn resolve_config(
        &self,
        config: Option<&Path>,
        gap_x: Option<f64>,
        gap_y: Option<f64>,
        direction: Option<DirectionChoice>,
    ) -> Result<GraphConfig> {
        let mut options = match config {
            Some(path) => {
                let text = fs::read_to_string(path).with_context(|| {
                    format!("Failed to read config file '{}'", path.display())
                })?;
                serde_json::from_str::<GraphOptions>(&text).with_context(|| {
                    format!("Failed to parse config file '{}'", path.display())
                })?
            }
            None => GraphOptions::default(),
        };

        if gap_x.is_some() || gap_y.is_some() {
            let base = options.gap;
            let x = gap_x
                .or(base.map(|g| g.x))
                .ok_or_else(|| anyhow!("--gap-x is required when the config has no gap"))?;
            let y = gap_y
                .or(base.map(|g| g.y))
                .ok_or_else(|| anyhow!("--gap-y is required when the config has no gap"))?;
            options.gap = Some(Gap::new(x, y));
        }
        if let Some(direction) = direction {
            options.direction = Some(direction.into());
        }

        options
            .resolve()
            .context("Invalid layout configuration (set a gap with --gap-x/--gap-y or --config)")
    }

    /// Handle the layout command
    fn layout_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        config: GraphConfig,
        paths: bool,
        pretty: bool,
        verbose: bool,
    ) -> Result<()> {
        let document = self.read_document(input)?;
        let engine = self.engine_for(&document, config)?;
        let layout = engine.compute(&document.root).context("Layout failed")?;

        if verbose {
            eprintln!(
                "Laid out {} nodes and {} edges",
                layout.nodes.len(),
                layout.edges.len()
            );
        }

        let rendered = render_layout(&engine, &layout, paths)?;
        let json = if pretty || writes_to_terminal(&output) {
            serde_json::to_string_pretty(&rendered)?
        } else {
            serde_json::to_string(&rendered)?
        };
        self.write_output(output, &json)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let document = self.read_document(input)?;

        if let Err(e) = document.root.validate_unique_ids() {
            println!("✗ Invalid tree: {}", e);
            return Err(e.into());
        }

        let mut registry = treeline::SizeRegistry::new();
        for (id, size) in &document.sizes {
            registry
                .register(id.as_str(), *size)
                .with_context(|| format!("Invalid size for '{}'", id))?;
        }

        let missing = registry.missing_ids(&document.root);
        if !missing.is_empty() {
            println!("✗ Missing sizes for: {}", missing.join(", "));
            bail!("{} node(s) have no registered size", missing.len());
        }

        let count = document.root.node_count();
        if verbose {
            eprintln!("Checked {} nodes and {} sizes", count, document.sizes.len());
        }
        println!("✓ Valid tree ({} nodes)", count);
        Ok(())
    }

    /// Handle the path command
    fn path_command(&self, points: &str) -> Result<()> {
        let waypoints = parse_points(points)?;
        let path = compile_path(&waypoints).context("Failed to compile path")?;
        println!("{}", path);
        Ok(())
    }

    fn engine_for(&self, document: &TreeDocument, config: GraphConfig) -> Result<LayoutEngine> {
        let mut engine = LayoutEngine::new(config)?;
        for (id, size) in &document.sizes {
            engine
                .register_size(id.as_str(), *size)
                .with_context(|| format!("Invalid size for '{}'", id))?;
        }
        debug!(sizes = document.sizes.len(), "Registered sizes");
        Ok(engine)
    }

    /// Read and parse a tree document from file or stdin
    pub fn read_document(&self, input: Option<PathBuf>) -> Result<TreeDocument> {
        let content = self.read_input(input)?;
        serde_json::from_str(&content).context("Failed to parse tree document")
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => fs::write(&path, content)
                .with_context(|| format!("Failed to write output file '{}'", path.display())),
            _ => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", content)?;
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

fn writes_to_terminal(output: &Option<PathBuf>) -> bool {
    match output {
        None => crossterm::tty::IsTty::is_tty(&io::stdout()),
        Some(p) if p.to_str() == Some("-") => crossterm::tty::IsTty::is_tty(&io::stdout()),
        Some(_) => false,
    }
}

fn render_layout<'a>(
    engine: &LayoutEngine,
    layout: &'a Layout<'_, serde_json::Value>,
    paths: bool,
) -> Result<LayoutOutput<'a>> {
    let nodes = layout
        .nodes
        .iter()
        .map(|placed| -> Result<NodeOutput<'a>> {
            let size = engine.registry().require(placed.id())?;
            Ok(NodeOutput {
                id: placed.id(),
                x: placed.position.x,
                y: placed.position.y,
                depth: placed.depth,
                width: size.width,
                height: size.height,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let edges = layout
        .edges
        .iter()
        .map(|edge| -> Result<EdgeOutput<'a>> {
            let path = if paths {
                Some(edge.path()?.to_string())
            } else {
                None
            };
            Ok(EdgeOutput {
                source: &edge.source,
                target: &edge.target,
                waypoints: &edge.waypoints,
                path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LayoutOutput {
        nodes,
        edges,
        bounds: layout.bounds,
    })
}

/// Parse `"x,y x,y ..."` into points
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    input
        .split_whitespace()
        .map(|pair| -> Result<Point> {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| anyhow!("Expected 'x,y', got '{}'", pair))?;
            let x: f64 = x
                .trim()
                .parse()
                .with_context(|| format!("Invalid x coordinate in '{}'", pair))?;
            let y: f64 = y
                .trim()
                .parse()
                .with_context(|| format!("Invalid y coordinate in '{}'", pair))?;
            Ok(Point::new(x, y))
        })
        .collect()
}
