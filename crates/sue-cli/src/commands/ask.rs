use anyhow::Result;
use serde_json::json;
use sue_ai::Session;

use crate::output::{OutputFormat, print_json};

/// Answer a single question and exit.
pub async fn run(mut session: Session, text: &[String], format: OutputFormat) -> Result<()> {
    let question = text.join(" ");
    let answer = session.chat(&question).await;

    if format.is_json() {
        return print_json(&json!({
            "model": session.model(),
            "question": question,
            "answer": answer,
        }));
    }

    println!("{answer}");
    Ok(())
}
