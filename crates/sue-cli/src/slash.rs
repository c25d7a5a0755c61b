//! Parsing of chat input lines into commands.

/// One parsed line of chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Quit,
    Help,
    /// `/ctx`: list pages loaded into the context
    Context,
    /// `/md_web URL`
    MdWeb(String),
    /// `/web URL QUERY`
    Web { url: String, query: String },
    /// `/c_web URL1,URL2,...`
    CWeb(Vec<String>),
    /// `/s_web QUERY`
    SWeb(String),
    /// Free text, answered with the loaded context when there is one
    Chat(String),
    /// Known command with missing arguments; carries the usage hint
    Usage(&'static str),
}

pub const MD_WEB_USAGE: &str = "Использование: /md_web [URL]";
pub const WEB_USAGE: &str = "Использование: /web [URL] [ЗАПРОС]";
pub const C_WEB_USAGE: &str = "Использование: /c_web [URL1,URL2,...]";
pub const S_WEB_USAGE: &str = "Использование: /s_web [ЗАПРОС]";

impl SlashCommand {
    /// Parse a line; `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        if rest.is_empty() && matches!(head.to_lowercase().as_str(), "/q" | "/quit" | "/exit") {
            return Some(Self::Quit);
        }

        let command = match head {
            "/help" => Self::Help,
            "/ctx" => Self::Context,
            "/md_web" => {
                if rest.is_empty() {
                    Self::Usage(MD_WEB_USAGE)
                } else {
                    Self::MdWeb(rest.to_string())
                }
            }
            "/web" => match rest.split_once(char::is_whitespace) {
                Some((url, query)) if !query.trim().is_empty() => Self::Web {
                    url: url.to_string(),
                    query: query.trim().to_string(),
                },
                _ => Self::Usage(WEB_USAGE),
            },
            "/c_web" => {
                let urls: Vec<String> = rest
                    .split(',')
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string)
                    .collect();
                if urls.is_empty() {
                    Self::Usage(C_WEB_USAGE)
                } else {
                    Self::CWeb(urls)
                }
            }
            "/s_web" => {
                if rest.is_empty() {
                    Self::Usage(S_WEB_USAGE)
                } else {
                    Self::SWeb(rest.to_string())
                }
            }
            _ => Self::Chat(line.to_string()),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input() {
        assert_eq!(SlashCommand::parse("   "), None);
    }

    #[test]
    fn test_quit_aliases() {
        for input in ["/q", "/Q", "/quit", " /EXIT "] {
            assert_eq!(SlashCommand::parse(input), Some(SlashCommand::Quit));
        }
        assert_eq!(
            SlashCommand::parse("/q please"),
            Some(SlashCommand::Chat("/q please".into()))
        );
    }

    #[test]
    fn test_md_web_keeps_whole_argument() {
        assert_eq!(
            SlashCommand::parse("/md_web  https://a.test/search?q=a b  "),
            Some(SlashCommand::MdWeb("https://a.test/search?q=a b".into()))
        );
    }

    #[test]
    fn test_web_commands() {
        assert_eq!(
            SlashCommand::parse("/md_web https://a.test"),
            Some(SlashCommand::MdWeb("https://a.test".into()))
        );
        assert_eq!(
            SlashCommand::parse("/web https://a.test  о чём статья? "),
            Some(SlashCommand::Web {
                url: "https://a.test".into(),
                query: "о чём статья?".into(),
            })
        );
        assert_eq!(
            SlashCommand::parse("/c_web https://a.test, https://b.test,,"),
            Some(SlashCommand::CWeb(vec![
                "https://a.test".into(),
                "https://b.test".into()
            ]))
        );
        assert_eq!(
            SlashCommand::parse("/s_web погода в Москве"),
            Some(SlashCommand::SWeb("погода в Москве".into()))
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            SlashCommand::parse("/md_web"),
            Some(SlashCommand::Usage(MD_WEB_USAGE))
        );
        assert_eq!(
            SlashCommand::parse("/web https://a.test"),
            Some(SlashCommand::Usage(WEB_USAGE))
        );
        assert_eq!(
            SlashCommand::parse("/c_web , ,"),
            Some(SlashCommand::Usage(C_WEB_USAGE))
        );
        assert_eq!(
            SlashCommand::parse("/s_web"),
            Some(SlashCommand::Usage(S_WEB_USAGE))
        );
    }

    #[test]
    fn test_unknown_slash_is_chat() {
        assert_eq!(
            SlashCommand::parse("/unknown thing"),
            Some(SlashCommand::Chat("/unknown thing".into()))
        );
        assert_eq!(
            SlashCommand::parse("привет"),
            Some(SlashCommand::Chat("привет".into()))
        );
    }
}
