use clap::{Arg, ArgAction, Command, value_parser};
use rg_layout::LayoutAlgorithm;
use rg_model::OwnerId;
use rg_pipeline::{
    sample_corpus, BuildRequest, GraphPipeline, MemoryCorpus, MemorySink, PipelineConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Command::new("rg-pipeline")
        .version(rg_pipeline::VERSION)
        .about("Research knowledge-graph build pipeline")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("build")
                .about("Build a graph from a generated sample corpus")
                .arg(
                    Arg::new("papers")
                        .long("papers")
                        .default_value("40")
                        .value_parser(value_parser!(usize))
                        .help("Number of papers in the sample corpus"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Seed for corpus generation and randomized stages"),
                )
                .arg(
                    Arg::new("owner")
                        .long("owner")
                        .default_value("demo")
                        .help("Owner recorded on the snapshot"),
                )
                .arg(
                    Arg::new("max-nodes")
                        .long("max-nodes")
                        .default_value("100")
                        .value_parser(value_parser!(usize))
                        .help("Node budget for the build"),
                )
                .arg(
                    Arg::new("layout")
                        .long("layout")
                        .default_value("force_directed")
                        .help("Layout algorithm (unknown names fall back to force_directed)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the snapshot as JSON"),
                ),
        )
        .subcommand(Command::new("layouts").about("List available layout algorithms"));

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("build", args)) => {
            let papers = *args.get_one::<usize>("papers").unwrap();
            let seed = *args.get_one::<u64>("seed").unwrap();
            let owner = args.get_one::<String>("owner").unwrap();
            let max_nodes = *args.get_one::<usize>("max-nodes").unwrap();
            let layout = LayoutAlgorithm::parse(args.get_one::<String>("layout").unwrap());
            let json = args.get_flag("json");

            if !json {
                println!("Building research knowledge graph...");
                println!("Papers: {papers}");
                println!("Seed: {seed}");
                println!("Layout: {layout}");
                println!();
            }

            let corpus = MemoryCorpus::with_papers(sample_corpus(seed, papers));
            let config = PipelineConfig::default()
                .with_max_nodes(max_nodes)
                .with_layout(layout)
                .with_layout_seed(seed);
            let pipeline =
                GraphPipeline::new(Arc::new(corpus), Arc::new(MemorySink::new()), config);

            let request = BuildRequest::new(OwnerId::new(owner.clone()));
            match pipeline.build_graph(request).await {
                Ok(outcome) => {
                    if json {
                        match serde_json::to_string_pretty(&outcome.snapshot) {
                            Ok(body) => println!("{body}"),
                            Err(error) => {
                                eprintln!("Failed to serialize snapshot: {error}");
                                std::process::exit(1);
                            }
                        }
                    } else {
                        let snapshot = &outcome.snapshot;
                        println!("Graph Build Report:");
                        println!("  Name: {}", snapshot.name);
                        println!("  Nodes: {}", snapshot.meta.node_count);
                        println!("  Edges: {}", snapshot.meta.edge_count);
                        println!("  Clusters: {}", snapshot.meta.cluster_count);
                        println!("  Density: {:.4}", snapshot.analysis.density);
                        println!("  Components: {}", snapshot.analysis.connected_components);
                        match outcome.stored {
                            Some(id) => println!("  Saved: {id}"),
                            None => println!("  Saved: no"),
                        }
                    }
                }
                Err(error) => {
                    eprintln!("Build failed: {error}");
                    std::process::exit(1);
                }
            }
        }
        Some(("layouts", _)) => {
            println!("Available layouts:");
            for algorithm in LayoutAlgorithm::all() {
                println!("  {}", algorithm.as_str());
            }
        }
        _ => {}
    }
}
