use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 占位符标记的统一模式，两个后端共用
    static ref TOKEN_RE: Regex = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap();
}

/// 根据占位符名称构造 `{{name}}` 标记
pub fn placeholder_token(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// 检查一段文本是否整体就是一个占位符标记
///
/// 只有当整段文本恰好等于 `{{name}}` 时返回名称，否则返回 None
pub fn whole_placeholder_token(text: &str) -> Option<&str> {
    let caps = TOKEN_RE.captures(text)?;
    let full = caps.get(0)?;
    if full.start() == 0 && full.end() == text.len() {
        Some(caps.get(1)?.as_str())
    } else {
        None
    }
}

/// 收集内容中残留的占位符名称，用于替换结束后的告警
pub fn unresolved_tokens(content: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// HTML 转义
///
/// 与 Python 的 html.escape 行为保持一致（含引号）
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_token_matches_exact_text_only() {
        assert_eq!(whole_placeholder_token("{{Note}}"), Some("Note"));
        assert_eq!(whole_placeholder_token("见 {{Note}}"), None);
        assert_eq!(whole_placeholder_token("{{Note}} 后记"), None);
        assert_eq!(whole_placeholder_token("普通文本"), None);
    }

    #[test]
    fn unresolved_tokens_are_collected_in_order() {
        let names = unresolved_tokens("a {{X}} b {{Y_2}} c");
        assert_eq!(names, vec!["X".to_string(), "Y_2".to_string()]);
    }

    #[test]
    fn escape_html_covers_quotes() {
        assert_eq!(escape_html("<a b=\"c\">&'"), "&lt;a b=&quot;c&quot;&gt;&amp;&#x27;");
    }
}
