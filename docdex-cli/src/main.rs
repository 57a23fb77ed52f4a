//! Command-line launcher for docdex.
//!
//! Wires the OpenAI embedder and the Qdrant index into the library's
//! pipelines. `OPENAI_API_KEY` must be set for `index` and `search`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use docdex::{
    DocdexConfig, DocsTool, IndexPipeline, OpenAiEmbedder, QdrantIndex, QueryPipeline,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docdex", version, about = "Index and search a documentation knowledge base")]
struct Cli {
    /// Qdrant URL.
    #[arg(long, default_value = "http://localhost:6334")]
    url: String,

    /// Vector store collection name.
    #[arg(long, default_value = "docs")]
    collection: String,

    /// Embedding model name.
    #[arg(long, default_value = "text-embedding-3-small")]
    model: String,

    /// Embedding vector dimensionality.
    #[arg(long, default_value_t = 1536)]
    dimensions: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index a documentation corpus into the vector store.
    Index {
        /// Root directory of the corpus.
        source_dir: PathBuf,

        /// Maximum chunk size in characters.
        #[arg(long, default_value_t = 1000)]
        chunk_size: usize,

        /// Overlap between consecutive chunks in characters.
        #[arg(long, default_value_t = 200)]
        chunk_overlap: usize,

        /// File extension of corpus documents, without the dot.
        #[arg(long, default_value = "md")]
        extension: String,

        /// Only index the first --max-docs files.
        #[arg(long)]
        test_mode: bool,

        /// Cap on indexed files in test mode.
        #[arg(long, default_value_t = 10)]
        max_docs: usize,
    },
    /// Search the indexed documentation.
    Search {
        /// The natural-language query.
        query: String,

        /// Maximum number of results.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// List documentation topics.
    Topics {
        /// Topic label, repeatable.
        #[arg(long = "topic")]
        topics: Vec<String>,
    },
}

fn embedder(cli: &Cli) -> anyhow::Result<Arc<OpenAiEmbedder>> {
    Ok(Arc::new(
        OpenAiEmbedder::from_env()?.with_model(&cli.model).with_dimensions(cli.dimensions),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Index { source_dir, chunk_size, chunk_overlap, extension, test_mode, max_docs } => {
            let config = DocdexConfig::builder()
                .source_dir(source_dir.clone())
                .collection(&cli.collection)
                .embedding_model(&cli.model)
                .embedding_dimensions(cli.dimensions)
                .chunk_size(*chunk_size)
                .chunk_overlap(*chunk_overlap)
                .file_extension(extension.clone())
                .test_mode(*test_mode)
                .max_docs(*max_docs)
                .build()?;

            let pipeline = IndexPipeline::builder()
                .config(config)
                .embedder(embedder(&cli)?)
                .index(Arc::new(QdrantIndex::new(&cli.url)?))
                .build()?;

            let summary = pipeline.run().await?;
            println!(
                "Done! Indexed {} chunks from {} files into '{}'.",
                summary.chunks_indexed(),
                summary.files_indexed(),
                summary.collection
            );
            for (path, reason) in summary.skipped() {
                println!("  skipped {}: {reason}", path.display());
            }
        }
        Command::Search { query, limit } => {
            let config = DocdexConfig::builder()
                .collection(&cli.collection)
                .embedding_model(&cli.model)
                .embedding_dimensions(cli.dimensions)
                .top_k(*limit)
                .build()?;

            let pipeline = QueryPipeline::new(
                embedder(&cli)?,
                Arc::new(QdrantIndex::new(&cli.url)?),
                &config,
            );
            println!("{}", pipeline.search(query, *limit).await);
        }
        Command::Topics { topics } => {
            println!("{}", DocsTool::format_topics(topics));
        }
    }

    Ok(())
}
