use clap::Parser;
use log::{debug, info};
use persistence::{logger, Bipartite, Context};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Classify every edge of a bipartite graph as one-, weakly-, or zero-
/// persistent, i.e., whether it belongs to every, some, or no maximum
/// matching of the graph.
///
/// The graph is read from a YAML file of the form:
///
///   left: [a, b]      # optional, for isolated vertices
///   right: ["1"]      # optional, for isolated vertices
///   edges:
///     - [a, "1"]
///     - [b, "1"]
///
/// where each edge is given as '[left, right]'. Without a file, a small
/// built-in example graph is classified.
///
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML graph description
    #[arg(value_name = "FILE")]
    graph: Option<PathBuf>,

    /// Print the classification as YAML
    #[arg(short, long)]
    yaml: bool,

    /// Write (rotated) log files into this directory, instead of stderr
    #[arg(short = 'd', long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, or trace)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print more: the graph (-vvv), and the decomposition (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct GraphFile {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    left: Vec<String>,
    #[serde(default)]
    right: Vec<String>,
    #[serde(default)]
    edges: Vec<(String, String)>,
}

impl GraphFile {
    fn into_graph(self) -> persistence::Result<Bipartite<String>> {
        let mut graph = Bipartite::new();
        for node in self.left {
            graph.add_left_node(node)?;
        }
        for node in self.right {
            graph.add_right_node(node)?;
        }
        for (u, v) in self.edges {
            graph.add_edge(u, v)?;
        }
        Ok(match self.label {
            Some(label) => graph.with_label(label),
            None => graph,
        })
    }
}

fn load_graph(path: &Path) -> Result<Bipartite<String>, Box<dyn std::error::Error>> {
    debug!("Reading graph from: {}", path.display());
    let file: GraphFile = serde_yaml::from_reader(File::open(path)?)?;
    let label = path.display().to_string();
    let graph = file.into_graph()?;
    Ok(match graph.label() {
        Some(_) => graph,
        None => graph.with_label(label),
    })
}

/// Seven jobs and seven machines; e and g compete for machine 5, and machine
/// 4 is left over, so no matching is perfect.
fn example_graph() -> persistence::Result<Bipartite<String>> {
    let edges = [
        ("a", "1"),
        ("a", "3"),
        ("b", "1"),
        ("b", "2"),
        ("b", "4"),
        ("c", "1"),
        ("c", "3"),
        ("d", "3"),
        ("d", "5"),
        ("d", "6"),
        ("e", "5"),
        ("f", "4"),
        ("f", "7"),
        ("g", "5"),
    ];
    let graph = Bipartite::from_edges(edges.map(|(u, v)| (u.to_string(), v.to_string())))?;
    Ok(graph.with_label("example"))
}

/**
 * Main entry-point into the matching-persistence classifier.
 */
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();
    let level: String = args.log_level.unwrap_or("info".to_string());
    let _logger = logger::configure(level.as_str(), args.verbose > 0, args.log_dir.as_deref())?;

    let graph = match args.graph {
        Some(path) => load_graph(&path)?,
        None => example_graph()?,
    };
    if args.verbose > 2 {
        println!("{}", graph);
    }

    let context = Context::new(graph)?;
    println!("{}", context);

    if args.verbose > 1 {
        if let Some(decomposition) = context.decomposition()? {
            println!("{}", decomposition);
        }
    }

    let persistence = context.partition()?;
    info!("Classified {} edges", persistence.len());
    if args.yaml {
        print!("{}", serde_yaml::to_string(&persistence)?);
    } else {
        println!("{}", persistence);
    }
    Ok(())
}
