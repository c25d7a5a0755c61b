//! Prompt templates sent to the model.
//!
//! The persona answers in Russian, so the per-turn instructions are Russian too.

use crate::context::ContextPage;
use crate::web::SearchResult;

pub const SYSTEM_PROMPT: &str = "You are Sue, an AI assistant that can search the internet, solve examples, etc. \
Always respond in Russian language. Be polite and cultured, without any slang. \
But if the user asks you to be youthful, be more casual in your responses. \
Remember the context of the conversation and previous interactions.";

/// Instruction used when `/c_web` loads pages into context
pub const LOAD_PAGE_PROMPT: &str = "Загрузка страницы в контекст";

/// Plain conversational turn relying on history for continuity
pub fn plain_prompt(user_input: &str) -> String {
    format!(
        "Ответь на следующее сообщение пользователя, учитывая предыдущий контекст разговора.\n\
         Сообщение пользователя: {user_input}"
    )
}

/// Single-page analysis for `/web URL QUERY`
pub fn page_prompt(query: &str, markdown: &str) -> String {
    format!(
        "Проанализируй следующий текст и ответь на запрос, учитывая историю разговора.\n\
         Запрос: {query}\n\
         \n\
         Содержимое страницы:\n\
         {markdown}\n\
         \n\
         Пожалуйста, отвечай на основе предоставленного текста и истории разговора."
    )
}

/// Render search results as numbered blocks
pub fn format_search_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            format!(
                "\nРезультат {}:\nЗаголовок: {}\nURL: {}\nОписание: {}\n",
                i + 1,
                result.title,
                result.link,
                result.snippet
            )
        })
        .collect()
}

/// Search-grounded answer for `/s_web QUERY`
pub fn search_prompt(query: &str, results: &[SearchResult]) -> String {
    format!(
        "На основе следующих результатов поиска ответь на вопрос пользователя.\n\
         Дай полный и информативный ответ, используя найденную информацию.\n\
         \n\
         Вопрос: {query}\n\
         \n\
         Результаты поиска:\n\
         {}\n\
         \n\
         Пожалуйста, дай структурированный ответ на русском языке.",
        format_search_results(results)
    )
}

/// Concatenate every stored page, each under a header naming its URL
pub fn format_context<'a>(pages: impl IntoIterator<Item = &'a ContextPage>) -> String {
    pages
        .into_iter()
        .map(|page| format!("=== Контекст из {} ===\n{}", page.url, page.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Answer grounded in all loaded pages, falling back to history
pub fn context_prompt(user_input: &str, full_context: &str) -> String {
    format!(
        "Используй следующий контекст и историю разговора для ответа на вопрос.\n\
         Вопрос: {user_input}\n\
         \n\
         Контекст:\n\
         {full_context}\n\
         \n\
         Если вопрос не связан с контекстом или это общий вопрос, используй историю разговора."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prompt_embeds_input() {
        let prompt = plain_prompt("как дела?");
        assert!(prompt.ends_with("Сообщение пользователя: как дела?"));
    }

    #[test]
    fn test_search_results_are_numbered() {
        let results = vec![
            SearchResult {
                title: "Rust".to_string(),
                link: "https://rust-lang.org".to_string(),
                snippet: "A language".to_string(),
            },
            SearchResult {
                title: "Cargo".to_string(),
                link: "https://doc.rust-lang.org/cargo".to_string(),
                snippet: "Package manager".to_string(),
            },
        ];
        let formatted = format_search_results(&results);
        assert!(formatted.contains("Результат 1:\nЗаголовок: Rust\nURL: https://rust-lang.org"));
        assert!(formatted.contains("Результат 2:\nЗаголовок: Cargo"));

        let prompt = search_prompt("что такое rust", &results);
        assert!(prompt.contains("Вопрос: что такое rust"));
        assert!(prompt.contains("Описание: Package manager"));
    }

    #[test]
    fn test_page_prompt_layout() {
        let prompt = page_prompt("о чем статья?", "# Заголовок\nТекст");
        assert!(prompt.contains("Запрос: о чем статья?\n\nСодержимое страницы:\n# Заголовок\nТекст"));
    }
}
