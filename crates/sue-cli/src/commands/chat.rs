//! Interactive chat loop.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;
use sue_ai::Session;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::slash::SlashCommand;
use crate::welcome;

const FAREWELL: &str = "До свидания!";

/// What the loop should do after handling one line.
enum Flow {
    Continue,
    Quit,
}

pub async fn run(mut session: Session) -> Result<()> {
    welcome::print_welcome(session.model());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n{} ", "Вы:".green().bold());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                None
            }
        };

        let Some(line) = line else {
            println!("{FAREWELL}");
            break;
        };

        let Some(command) = SlashCommand::parse(&line) else {
            continue;
        };

        if let Flow::Quit = handle(&mut session, command).await {
            println!("{FAREWELL}");
            break;
        }
    }

    tracing::info!(exchanges = session.history().len() / 2, "Chat finished");
    Ok(())
}

async fn handle(session: &mut Session, command: SlashCommand) -> Flow {
    match command {
        SlashCommand::Quit => return Flow::Quit,
        SlashCommand::Help => println!("{}", welcome::COMMANDS),
        SlashCommand::Usage(usage) => println!("{}", usage.yellow()),
        SlashCommand::Context => print_context(session),
        SlashCommand::MdWeb(url) => {
            let response = session.load_markdown(&url).await;
            reply(&response);
        }
        SlashCommand::Web { url, query } => {
            let response = session.analyze_page(&url, &query, true).await;
            reply(&response);
        }
        SlashCommand::CWeb(urls) => {
            for load in session.load_pages(&urls).await {
                tracing::debug!(url = %load.url, response = %load.response, "Page load finished");
                println!("Загружена страница: {}", load.url);
            }
            reply("Страницы загружены в контекст. Можете задавать вопросы.");
        }
        SlashCommand::SWeb(query) => {
            reply("Ищу информацию...");
            let response = session.search_and_respond(&query).await;
            reply(&response);
        }
        SlashCommand::Chat(text) => {
            let response = session.chat_with_context(&text).await;
            reply(&response);
        }
    }
    Flow::Continue
}

fn reply(text: &str) {
    println!("\n{} {text}", "Sue:".cyan().bold());
}

fn print_context(session: &Session) {
    let context = session.context();
    if context.is_empty() {
        println!("Контекст пуст.");
        return;
    }

    println!("Страницы в контексте ({}):", context.len());
    for page in context.pages() {
        let loaded_at: DateTime<Local> = page.fetched_at.with_timezone(&Local);
        let marker = if context.last_url() == Some(page.url.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {} ({} символов, {})",
            page.url,
            page.content.chars().count(),
            loaded_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
}
