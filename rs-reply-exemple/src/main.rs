use clap::{Parser, Subcommand};
use rs_reply_core::{EngineConfig, ReplyEngine};

#[derive(Parser)]
#[command(name = "rs-reply")]
#[command(about = "Fallback reply generator demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Print a reply to a prompt")]
    Reply {
        #[arg(required = true, help = "Prompt words (joined with spaces)")]
        prompt: Vec<String>,

        #[arg(long, help = "Model hint ('markov' skips the generation service)")]
        model: Option<String>,
    },

    #[command(about = "Write binary snapshots of the configured artifacts")]
    Snapshot,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows which stage produced the reply
    env_logger::init();

    // Artifact paths and the generation service come from the environment:
    // AI_MODEL_PATH, AI_KNOWLEDGE_PATH, OLLAMA_URL, OLLAMA_MODEL,
    // OLLAMA_TIMEOUT_MS and OLLAMA_DEBUG
    let config = EngineConfig::from_env();
    let engine = ReplyEngine::new(&config);

    match Cli::parse().command {
        Command::Reply { prompt, model } => {
            // Never fails: without artifacts or service the templates answer
            let reply = engine.generate_reply(&prompt.join(" "), model.as_deref());
            println!("{reply}");
        }
        Command::Snapshot => {
            // The next load of each artifact reads the .bin file instead of the JSON
            let markov = engine.store().snapshot_markov()?;
            println!("Markov model snapshot: {}", markov.display());
            let knowledge = engine.store().snapshot_knowledge()?;
            println!("Knowledge corpus snapshot: {}", knowledge.display());
        }
    }

    Ok(())
}
