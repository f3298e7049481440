use agent::{Agent, Context, GraphKind, Invocation};
use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use providers::{BaseProvider, Message, Provider};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Per-run overrides of the config file
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Mode label passed to the model as a system message
    #[arg(long, global = true)]
    mode: Option<String>,

    /// Text appended to every reply
    #[arg(long, global = true)]
    suffix: Option<String>,

    /// Graph wiring: `chatbot` or `number-routed`
    #[arg(long, global = true)]
    graph: Option<GraphKind>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an interactive session, keeping the conversation between turns
    Interactive,

    /// Send a single message and print the reply
    Exec {
        /// The message to send
        #[arg(required = true)]
        prompt: String,
    },

    /// Run one invocation from JSON (`{"messages": [...]}`) and print the resulting JSON
    Invoke {
        /// Read the invocation from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatgraph=info,agent=info,providers=info,config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn apply_overrides(config: &mut Config, overrides: &Overrides) {
    if let Some(mode) = &overrides.mode {
        config.mode = Some(mode.clone());
    }
    if let Some(suffix) = &overrides.suffix {
        config.suffix = Some(suffix.clone());
    }
    if let Some(graph) = overrides.graph {
        config.graph = graph;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = config::load_config().context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli.overrides);

    let provider = Provider::try_from(&config)?;
    tracing::info!(
        provider = %provider.provider_type(),
        model = %provider.model(),
        graph = %config.graph,
        "Provider ready"
    );

    let agent = Agent::new(provider, config.graph_settings());
    let context = config.context();

    match cli.command {
        Some(Commands::Exec { prompt }) => {
            let reply = agent.run(&prompt, &context).await?;
            println!("{}", reply.unwrap_or_default());
        }
        Some(Commands::Invoke { input }) => {
            let raw = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut raw = String::new();
                    io::stdin().read_to_string(&mut raw)?;
                    raw
                }
            };
            let invocation: Invocation =
                serde_json::from_str(&raw).context("Invocation is not valid JSON")?;
            let output = agent.invoke(invocation, &context).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Some(Commands::Interactive) | None => {
            // Default to interactive mode if no command specified
            interactive_loop(&agent, &context).await?;
        }
    }

    Ok(())
}

async fn interactive_loop<P>(agent: &Agent<P>, context: &Context) -> Result<()>
where
    P: BaseProvider + Clone,
{
    println!("Interactive mode. Enter 'exit' or 'quit' to end the session.");

    let mut history: Vec<Message> = Vec::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if input.is_empty() {
            continue;
        }

        let seen = history.len() + 1;
        let mut messages = history.clone();
        messages.push(Message::user(input));

        match agent.invoke(Invocation { messages }, context).await {
            Ok(output) => {
                for reply in &output.messages[seen..] {
                    println!("{}", reply.content);
                }
                history = output.messages;
            }
            // The failed turn is dropped so the next line starts from the last good history
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    Ok(())
}
