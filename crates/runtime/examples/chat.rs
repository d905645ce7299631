//! Minimal chat: send one message and print the reply.
//!
//! ```sh
//! DEEPSEEK_API_KEY=sk-... cargo run --example chat
//! ```

use llm::{Client, General, Message};
use narwhal_runtime::{Chat, Provider, Runtime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let key = std::env::var("DEEPSEEK_API_KEY")?;
    let provider = Provider::new("deepseek-chat", Client::new(), &key)?;
    let runtime = Runtime::new(General::new("deepseek-chat"), provider);

    let mut chat = Chat::with_system("You are a concise assistant.");
    let answer = runtime
        .send(&mut chat, Message::user("Name three uses of a narwhal tusk."))
        .await?;

    println!("{answer}");
    println!(
        "tokens: {} prompt / {} completion",
        chat.usage.prompt_tokens, chat.usage.completion_tokens
    );
    Ok(())
}
