//! Post-processing of session chat replies.
//!
//! Helpers that turn the operation index into a compact prompt context, and
//! that clean up and check the text the backend sends back.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::chat::client::ChatLink;
use crate::search::fuzzy::fold_case;
use crate::search::{OperationIndex, OperationRecord};

/// Reply used when the documentation has nothing on the question
pub const NOT_FOUND_REPLY: &str = "Sorry. This could not be found in the Swagger documentation.";

/// Substrings that mark a reply as the not-found fallback
const NOT_FOUND_MARKERS: [&str; 2] = ["could not be found in the Swagger", "찾을 수 없습니다"];

/// Title of the link offered when no operation link applies
pub const SWAGGER_LINK_TITLE: &str = "View full Swagger documentation";

/// Domain words looked for in questions
#[rustfmt::skip]
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "상품", "제품", "product", "item", "goods",
    "주문", "order", "구매", "purchase",
    "회원", "사용자", "유저", "user", "member",
    "파일", "file", "업로드", "upload", "다운로드", "download",
    "인증", "auth", "로그인", "login", "로그아웃", "logout",
    "장바구니", "cart", "basket",
    "결제", "payment", "pay",
    "배송", "delivery", "shipping",
];

static NUMBERING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid numbering regex"));

static BACKTICKED_API_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(/api/[^`\s]+)`").expect("valid back-ticked path regex"));

static PLAIN_API_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(/api/[^\s,.:;)]+)").expect("valid plain path regex"));

/// One `[METHOD] /path - summary` line per operation, within `max_chars`
pub fn build_context(index: &OperationIndex, max_chars: usize) -> String {
    let mut context = String::new();
    let mut used = 0;

    for record in index {
        let mut line = format!("[{}] {}", record.method, record.path);
        if !record.summary.trim().is_empty() {
            line.push_str(" - ");
            line.push_str(&record.summary);
        }
        line.push('\n');

        let len = line.chars().count();
        if used + len > max_chars {
            break;
        }
        context.push_str(&line);
        used += len;
    }

    context.trim().to_string()
}

/// Drop blank lines and lines repeating an earlier one, ignoring `N.` numbering
pub fn remove_duplicate_lines(text: &str) -> String {
    let mut seen = HashSet::new();
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| {
            let normalized = NUMBERING_PREFIX.replace(line, "");
            seen.insert(normalized.trim().to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `/api/...` paths mentioned in `text`, back-ticked ones first, without repeats
pub fn extract_api_paths(text: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    let captured = BACKTICKED_API_PATH
        .captures_iter(text)
        .chain(PLAIN_API_PATH.captures_iter(text));

    for captures in captured {
        if let Some(path) = captures.get(1) {
            let path = path.as_str();
            if !paths.iter().any(|p| p == path) {
                paths.push(path.to_string());
            }
        }
    }
    paths
}

/// Dictionary keywords that occur in `question`
pub fn extract_keywords(question: &str) -> Vec<&'static str> {
    let question = fold_case(question);
    DOMAIN_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| question.contains(&fold_case(keyword)))
        .collect()
}

/// Whether `reply` talks about operations related to `question`.
///
/// Replies that mention no paths, and questions without any dictionary
/// keyword, are always accepted.
pub fn is_reply_relevant(question: &str, reply: &str, index: &OperationIndex) -> bool {
    if NOT_FOUND_MARKERS.iter().any(|marker| reply.contains(marker)) {
        return true;
    }

    let mentioned = extract_api_paths(reply);
    if mentioned.is_empty() {
        return true;
    }

    let keywords = extract_keywords(question);
    if keywords.is_empty() {
        return true;
    }

    let relevant = mentioned.iter().any(|path| {
        index.find_by_path(path).any(|record| {
            let text = fold_case(&format!(
                "{} {} {}",
                record.summary,
                record.description().unwrap_or_default(),
                record.path
            ));
            keywords.iter().any(|keyword| text.contains(&fold_case(keyword)))
        })
    });

    if !relevant {
        tracing::warn!(
            "Question keywords {:?} do not match reply paths {:?}",
            keywords,
            mentioned
        );
    }
    relevant
}

/// One link per (path, method), in record order
pub fn build_links<'a>(
    records: impl IntoIterator<Item = &'a OperationRecord>,
    base_url: &str,
) -> Vec<ChatLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for record in records {
        if record.path.trim().is_empty() || !seen.insert((record.path.as_str(), record.method)) {
            continue;
        }
        let title = if record.summary.trim().is_empty() {
            format!("{} {}", record.method, record.path)
        } else {
            record.summary.clone()
        };
        links.push(ChatLink {
            title: Some(title),
            method: Some(record.method.to_string()),
            path: Some(record.path.clone()),
            url: Some(format!("{}{}", base_url, record.path)),
        });
    }
    links
}

/// Link to the Swagger UI, offered when nothing more specific applies
pub fn swagger_link(swagger_ui_url: String) -> ChatLink {
    ChatLink {
        title: Some(SWAGGER_LINK_TITLE.to_string()),
        url: Some(swagger_ui_url),
        ..ChatLink::default()
    }
}

/// Links for the operations a reply mentions, at most `limit`
pub fn links_for_reply(
    reply: &str,
    index: &OperationIndex,
    base_url: &str,
    limit: usize,
) -> Vec<ChatLink> {
    let mentioned = extract_api_paths(reply);
    let records = index
        .iter()
        .filter(|record| mentioned.iter().any(|path| *path == record.path))
        .take(limit);
    build_links(records, base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDocument;
    use serde_json::json;

    fn sample_index() -> OperationIndex {
        OperationIndex::build(&ApiDocument::from_value(json!({
            "paths": {
                "/api/v1/users": {
                    "get": {"summary": "List users"},
                    "post": {"summary": "Sign up", "description": "Creates a member account"}
                },
                "/api/v1/orders": {"get": {"summary": "List orders"}},
                "/api/v1/ping": {"get": {}}
            }
        })))
    }

    #[test]
    fn context_lines_respect_budget() {
        let index = sample_index();
        assert_eq!(
            build_context(&index, 3000),
            "[GET] /api/v1/ping\n[GET] /api/v1/orders - List orders\n[GET] /api/v1/users - List users\n[POST] /api/v1/users - Sign up"
        );

        // "[GET] /api/v1/ping\n" is 19 chars; the next line does not fit
        assert_eq!(build_context(&index, 30), "[GET] /api/v1/ping");
        assert_eq!(build_context(&index, 5), "");
    }

    #[test]
    fn duplicate_lines_ignore_numbering() {
        let text = "1. Use POST /api/v1/users\n\n2. Use POST /api/v1/users\nDone\n   \nDone";
        assert_eq!(remove_duplicate_lines(text), "1. Use POST /api/v1/users\nDone");
        assert_eq!(remove_duplicate_lines(""), "");
    }

    #[test]
    fn api_paths_from_backticks_and_plain_text() {
        let text = "Call /api/v1/orders, then `/api/v1/users` or (/api/v1/nope) /api/v1/users.";
        assert_eq!(
            extract_api_paths(text),
            vec!["/api/v1/users".to_string(), "/api/v1/orders".to_string()]
        );
        assert_eq!(
            extract_api_paths("/api/v1/ping: health check"),
            vec!["/api/v1/ping".to_string()]
        );
        assert!(extract_api_paths("see docs at x/api/v1/users").is_empty());
    }

    #[test]
    fn keywords_are_matched_case_insensitively() {
        assert_eq!(extract_keywords("How do I list USERS?"), vec!["user"]);
        assert_eq!(extract_keywords("회원 주문 내역"), vec!["주문", "회원"]);
        assert!(extract_keywords("hello").is_empty());
    }

    #[test]
    fn relevance_checks_mentioned_operations() {
        let index = sample_index();

        assert!(is_reply_relevant("member sign up", NOT_FOUND_REPLY, &index));
        assert!(is_reply_relevant("member sign up", "No paths here.", &index));
        assert!(is_reply_relevant("hello", "Try `/api/v1/orders`", &index));

        // description mentions "member"
        assert!(is_reply_relevant("member sign up", "Use `/api/v1/users`", &index));
        assert!(!is_reply_relevant("how to pay", "Use `/api/v1/users`", &index));
        assert!(!is_reply_relevant("user list", "Use `/api/v1/unknown`", &index));
    }

    #[test]
    fn links_deduplicate_operations() {
        let index = sample_index();
        let records: Vec<_> = index.iter().chain(index.iter()).collect();
        let links = build_links(records, "http://localhost:8080");

        assert_eq!(links.len(), 4);
        assert_eq!(links[0].title.as_deref(), Some("GET /api/v1/ping"));
        assert_eq!(
            links[1].url.as_deref(),
            Some("http://localhost:8080/api/v1/orders")
        );
        assert_eq!(links[3].method.as_deref(), Some("POST"));
    }

    #[test]
    fn reply_links_follow_mentions() {
        let index = sample_index();
        let links = links_for_reply("Use `/api/v1/users`", &index, "http://h", 8);
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.path.as_deref() == Some("/api/v1/users")));

        let limited = links_for_reply("Use `/api/v1/users`", &index, "http://h", 1);
        assert_eq!(limited.len(), 1);

        assert!(links_for_reply("nothing", &index, "http://h", 8).is_empty());
    }
}
