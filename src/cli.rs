// command line interface

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::config::{self, Config, FallbackStatus};
use crate::core::ai::{self, Provider, ProviderSettings};
use crate::core::{ChatRelay, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use crate::{Server, chat};

#[derive(Parser)]
#[command(name = "solace", about = "Supportive chat relay with risk flagging")]
struct Cli {
    /// model provider (openai, claude, gemini)
    #[arg(
        long,
        short,
        env = "SOLACE_PROVIDER",
        default_value = "openai",
        global = true
    )]
    provider: Provider,

    /// api key for the provider, falls back to the provider's env var
    #[arg(long, short = 'k', global = true)]
    api_key: Option<String>,

    /// model name, defaults per provider
    #[arg(long, short, env = "SOLACE_MODEL", global = true)]
    model: Option<String>,

    /// override the provider endpoint
    #[arg(long, env = "SOLACE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// provider request timeout in seconds
    #[arg(
        long,
        env = "SOLACE_TIMEOUT_SECS",
        default_value_t = 30,
        global = true
    )]
    timeout_secs: u64,

    /// file holding the system prompt
    #[arg(long, env = "SOLACE_PERSONA_FILE", global = true)]
    persona_file: Option<PathBuf>,

    /// sampling temperature, 0 to 1
    #[arg(
        long,
        env = "SOLACE_TEMPERATURE",
        default_value_t = DEFAULT_TEMPERATURE,
        global = true
    )]
    temperature: f32,

    /// max tokens in a reply
    #[arg(
        long,
        env = "SOLACE_MAX_TOKENS",
        default_value_t = DEFAULT_MAX_OUTPUT_TOKENS,
        global = true
    )]
    max_tokens: u32,

    /// status sent with the fallback reply when the provider fails
    #[arg(
        long,
        value_enum,
        env = "SOLACE_FALLBACK_STATUS",
        default_value = "ok",
        global = true
    )]
    fallback_status: FallbackStatus,

    /// log as json lines
    #[arg(long, env = "SOLACE_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// start the http relay
    Serve {
        /// port number
        #[arg(long, env = "PORT", default_value = "3000")]
        port: u16,

        /// host to bind
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,
    },

    /// chat from the terminal
    Chat {
        /// session id used in logs
        #[arg(long)]
        session: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let persona = config::load_persona(
            self.persona_file.as_ref(),
            self.max_tokens,
            self.temperature,
        )?;

        let provider = ProviderSettings {
            provider: self.provider,
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        };

        Ok(Config {
            provider,
            persona,
            fallback_status: self.fallback_status,
        })
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = cli.config()?;

    match cli.command {
        Commands::Serve { port, host } => Ok(Server::run(config, &host, port).await?),

        Commands::Chat { session } => {
            // no point chatting without a model
            let provider = ai::connect(&config.provider)?;
            let relay = ChatRelay::new(config.persona, provider);
            let session = session.unwrap_or_else(|| format!("cli-{}", std::process::id()));

            Ok(chat::run(relay, session).await?)
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
