use regex::Regex;
use std::sync::LazyLock;

static AUTOMATED_CLIENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bot|crawl|slurp|spider").expect("valid regex"));

/// True when the user agent looks like a bot, crawler or spider.
pub fn is_automated_client(user_agent: &str) -> bool {
    AUTOMATED_CLIENT.is_match(user_agent)
}
