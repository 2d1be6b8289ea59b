use anyhow::Context;
use clap::{Parser, Subcommand};
use oxrdf::NamedNode;
use textgrid_rdf::{Result, convert};

#[derive(Parser)]
#[command(name = "textgrid-rdf")]
#[command(about = "Convert MAUS TextGrid annotations to DADA RDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a TextGrid file and print the graph as N-Triples.
    Convert {
        /// Path to the MAUS TextGrid file.
        #[arg(long)]
        textgrid: String,

        /// IRI of the corpus the item belongs to.
        #[arg(long)]
        corpus: String,

        /// IRI of the annotated item (e.g. the recording).
        #[arg(long)]
        item: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Convert {
            textgrid,
            corpus,
            item,
        } => {
            // 1) Validate identifiers.
            let corpusid = NamedNode::new(corpus).context("corpus id must be a valid IRI")?;
            let itemid = NamedNode::new(item).context("item id must be a valid IRI")?;

            // 2) Parse the TextGrid and build the collection.
            let collection = convert::maus_annotations(&textgrid, corpusid, itemid)?;

            // 3) Emit triples and print them.
            let graph = collection.to_rdf()?;
            print!("{}", graph);
        }
    }

    Ok(())
}
