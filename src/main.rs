//! Interactive terminal chat with the Sky weather assistant

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use skychat::{ChatAgent, SkyChatConfig, WeatherApiClient, WeatherTool};

#[tokio::main]
async fn main() -> Result<()> {
    let config = SkyChatConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if !config.weather.has_valid_api_key() {
        warn!(
            "No plausible OpenWeatherMap API key configured; weather lookups will fail. \
             Set OPENWEATHERMAP_API_KEY to fix this."
        );
    }

    let client = WeatherApiClient::new(config.weather.clone())?;
    let mut agent = ChatAgent::new(config.agent.clone())?;
    agent.add_tool(Arc::new(WeatherTool::new(client)));

    println!("Sky: Hi, my name is Sky! How can I help you?");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("You: ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }

        match agent.ask(input).await {
            Ok(reply) => println!("Sky: {reply}"),
            Err(e) => println!("Sky: Sorry, something went wrong: {e}"),
        }
    }

    Ok(())
}
