//! Tool calling: register a handler and let the loop run it.
//!
//! ```sh
//! DEEPSEEK_API_KEY=sk-... cargo run --example tools
//! ```

use llm::{Client, General, Message, Tool};
use narwhal_runtime::{Chat, Provider, Runtime};
use serde_json::{Value, json};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let key = std::env::var("DEEPSEEK_API_KEY")?;
    let provider = Provider::new("deepseek-chat", Client::new(), &key)?;
    let mut runtime = Runtime::new(General::new("deepseek-chat"), provider);

    let weather = Tool::new(
        "weather",
        "Current weather for a city",
        schemars::schema_for!(WeatherArgs),
    );
    runtime.register(weather, |args: Value| async move {
        let city = args["city"].as_str().unwrap_or("somewhere");
        Ok(json!({ "city": city, "temp_c": 21, "sky": "clear" }))
    });

    let mut chat = Chat::new();
    let answer = runtime
        .send(&mut chat, Message::user("What's the weather in Paris?"))
        .await?;

    println!("{answer}");
    Ok(())
}

#[derive(schemars::JsonSchema)]
#[allow(dead_code)]
struct WeatherArgs {
    /// City name.
    city: String,
}
