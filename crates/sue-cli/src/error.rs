use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = err.to_string().to_lowercase();

    if msg.contains("mistral_api_key") || msg.contains("api ключ") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Set your API key with:");
        eprintln!("  {} export MISTRAL_API_KEY=<value>", "$".dimmed());
        eprintln!("  or add it under [api_keys] in ~/.config/sue/config.toml");
    }

    if msg.contains("connection refused") || msg.contains("network") || msg.contains("timed out") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check your internet connection and try again.");
    }

    std::process::exit(1);
}
