mod bot;
mod classifier;
mod config;
mod groq;

use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ReactionType};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use bot::{reactions, DialogueRouter};
use config::Config;
use groq::Client as GroqClient;

const WELCOME_PHOTO_URL: &str = "https://graph.org/vTelegraphBot-07-28-35";

const HELP_TEXT: &str = "📋 Available Commands:

/start - Start the bot
/help - Show this help message
/reset - Clear your conversation history

💬 How to Use:
Just send me any message and I'll respond with AI!

Ask me about anything - I'm here to help!";

struct BotState {
    router: DialogueRouter<GroqClient>,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "show help information")]
    Help,
    #[command(description = "clear your conversation history")]
    Reset,
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "groqbot.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {config_path}: {e}");
            std::process::exit(1);
        }
    };

    // Setup logging
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("groqbot.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    info!("🚀 Starting groqbot...");
    info!("Loaded config from {config_path}");
    info!("Model: {} ({})", config.current_model, config.model_id);
    info!("Max history per user: {}", config.max_history);

    let bot = Bot::new(&config.telegram_bot_token);

    let groq = GroqClient::new(config.groq_api_key.clone());
    let router = DialogueRouter::new(groq, config.model_id.clone(), config.max_history);
    let state = Arc::new(BotState { router });

    // Command menu registration is cosmetic; a failure must not stop the bot.
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to set command menu: {e}");
    }

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_message));

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            let first_name = msg
                .from
                .as_ref()
                .map(|u| u.first_name.clone())
                .unwrap_or_else(|| "there".to_string());

            // Welcome photo with caption; fall back to plain text if the
            // photo URL cannot be parsed or sent.
            let sent = match reqwest::Url::parse(WELCOME_PHOTO_URL) {
                Ok(url) => {
                    bot.send_photo(msg.chat.id, InputFile::url(url))
                        .caption(welcome_text(&first_name))
                        .await
                }
                Err(_) => bot.send_message(msg.chat.id, welcome_text(&first_name)).await,
            };

            match sent {
                Ok(sent) => react(&bot, msg.chat.id, sent.id, reactions::random_reaction(), 500).await,
                Err(e) => warn!("Failed to send welcome: {e}"),
            }
        }
        Command::Help => match bot.send_message(msg.chat.id, HELP_TEXT).await {
            Ok(sent) => react(&bot, msg.chat.id, sent.id, "❤️", 500).await,
            Err(e) => warn!("Failed to send help: {e}"),
        },
        Command::Reset => {
            let user = match msg.from {
                Some(ref u) => u.id.0 as i64,
                None => return Ok(()),
            };

            let reply = state.router.reset(user).await;
            if let Err(e) = bot.send_message(msg.chat.id, reply).await {
                warn!("Failed to send reset confirmation: {e}");
            }
        }
    }

    Ok(())
}

async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let user = match msg.from {
        Some(ref u) => u,
        None => return Ok(()),
    };

    let text = match msg.text() {
        Some(t) => t,
        None => return Ok(()),
    };

    // Unrecognized commands are not dialogue.
    if text.starts_with('/') {
        return Ok(());
    }

    let username = user.username.as_deref().unwrap_or(&user.first_name);
    let text_preview: String = text.chars().take(100).collect();
    info!("Message from {username} ({}): \"{text_preview}\"", user.id);

    let reply = state.router.handle(user.id.0 as i64, text).await;

    // Reaction is cosmetic; failures are logged and never block the reply.
    react(&bot, msg.chat.id, msg.id, reactions::random_reaction(), 300).await;

    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
        warn!("Failed to send reply: {e}");
    }

    Ok(())
}

/// Add a reaction emoji after a short delay, swallowing any error.
async fn react(bot: &Bot, chat_id: ChatId, message_id: MessageId, emoji: &str, delay_ms: u64) {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    let reaction = ReactionType::Emoji {
        emoji: emoji.to_string(),
    };

    if let Err(e) = bot
        .set_message_reaction(chat_id, message_id)
        .reaction(vec![reaction])
        .await
    {
        warn!("Reaction error: {e}");
    }
}

fn welcome_text(first_name: &str) -> String {
    format!(
        "👋 Welcome, {first_name}!

I'm your AI assistant powered by cutting-edge language models. I can help you with:

🤖 AI Conversations - Ask me anything and get intelligent responses
😂 Jokes - Brighten your day with random humor
📖 Stories - Enjoy creative tales

Quick Start:

• Just type any message and I'll respond with AI
• Use /help for all available commands

Let's get started! What would you like to talk about?"
    )
}
