use indexmap::IndexMap;
use lamina::graph::{Graph, GraphError, Point, Rect};
use lamina::{GraphLayout, HierarchicalLayout, LayoutConfig, Orientation};
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Graph(GraphError),
    Layout(lamina::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Graph(err) => write!(f, "invalid graph: {err}"),
            CliError::Layout(err) => write!(f, "layout failed: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<GraphError> for CliError {
    fn from(value: GraphError) -> Self {
        Self::Graph(value)
    }
}

impl From<lamina::Error> for CliError {
    fn from(value: lamina::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    pretty: bool,
    orientation: Option<Orientation>,
    parent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VertexIn {
    id: String,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    parent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EdgeIn {
    id: String,
    source: String,
    target: String,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    vertices: Vec<VertexIn>,
    #[serde(default)]
    edges: Vec<EdgeIn>,
    #[serde(default)]
    config: LayoutConfig,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    vertices: IndexMap<&'a str, Rect>,
    edges: IndexMap<&'a str, &'a [Point]>,
}

fn usage() -> &'static str {
    "lamina-cli\n\
\n\
USAGE:\n\
  lamina-cli [--pretty] [--orientation north|south|east|west] [--parent <id>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON document: {\"vertices\": [{id, width, height, x?, y?, parent?}],\n\
    \"edges\": [{id, source, target}], \"config\": {...}}.\n\
  - Output maps every vertex to its geometry and every edge to its waypoints.\n\
  - --orientation overrides config.orientation.\n\
  - Set RUST_LOG (e.g. RUST_LOG=lamina=debug) to see layout diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--orientation" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.orientation = Some(
                    value
                        .parse::<Orientation>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--parent" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.parent = Some(id.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn build_graph(doc: &Document) -> Result<Graph, CliError> {
    let mut graph = Graph::new();
    for v in &doc.vertices {
        graph.add_vertex(v.id.clone(), Rect::new(v.x, v.y, v.width, v.height))?;
    }
    // Parents may be declared after their children.
    for v in &doc.vertices {
        if let Some(parent) = &v.parent {
            graph.set_parent(&v.id, parent)?;
        }
    }
    for e in &doc.edges {
        graph.add_edge(e.id.clone(), e.source.clone(), e.target.clone())?;
    }
    Ok(graph)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut doc: Document = serde_json::from_str(&text)?;
    if let Some(orientation) = args.orientation {
        doc.config.orientation = orientation;
    }

    let mut graph = build_graph(&doc)?;
    let layout = HierarchicalLayout::new(doc.config);
    layout.execute(&mut graph, args.parent.as_deref())?;

    let out = LayoutOut {
        vertices: graph.vertices().map(|v| (v.id(), v.geometry())).collect(),
        edges: graph.edges().map(|e| (e.id(), e.points())).collect(),
    };
    write_json(&out, args.pretty)
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
