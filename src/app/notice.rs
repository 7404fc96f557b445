//! Notice（用户提示）模块。
//!
//! 用法：
//! - 前端：统一监听 `notice:notify` 事件并展示状态条
//! - Rust 后台：调用 `notice::emit(app, payload)` 触发通知事件

use tauri::Emitter;

pub const NOTICE_EVENT_NAME: &str = "notice:notify";

const NOTICE_PREFIX: &str = "PWA Store";

#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NoticeEventPayload {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

fn default_title(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "提示",
        NoticeLevel::Success => "成功",
        NoticeLevel::Warning => "提醒",
        NoticeLevel::Error => "错误",
    }
}

fn normalize_optional_title(title: Option<String>) -> Option<String> {
    let title = title?;
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn format_title(level: NoticeLevel, title: Option<String>) -> String {
    let title = normalize_optional_title(title).unwrap_or_else(|| default_title(level).to_string());
    format!("{NOTICE_PREFIX} · {title}")
}

pub fn build(level: NoticeLevel, title: Option<String>, body: String) -> NoticeEventPayload {
    NoticeEventPayload {
        level,
        title: format_title(level, title),
        body,
    }
}

pub fn emit(app: &tauri::AppHandle, payload: NoticeEventPayload) -> Result<(), String> {
    app.emit(NOTICE_EVENT_NAME, payload)
        .map_err(|e| format!("NOTICE_EMIT: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_prefixes_and_defaults_title() {
        let payload = build(NoticeLevel::Success, None, "done".to_string());
        assert_eq!(payload.title, "PWA Store · 成功");
        assert_eq!(payload.body, "done");
    }

    #[test]
    fn blank_custom_title_falls_back_to_default() {
        let payload = build(NoticeLevel::Error, Some("  ".to_string()), "x".to_string());
        assert_eq!(payload.title, "PWA Store · 错误");

        let payload = build(NoticeLevel::Info, Some(" 安装 ".to_string()), "x".to_string());
        assert_eq!(payload.title, "PWA Store · 安装");
    }
}
