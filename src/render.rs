//! HTML rendering for the page and its htmx fragments.
//!
//! Element ids follow the page layout the widget has always used:
//! `chatbot-btn`, `chatbot-window`, `close-chat`, `chat-messages`,
//! `user-input` and `send-btn`. Fragments returned by the server replace
//! these elements with `outerHTML` swaps, except message submission: the
//! user bubble and typing indicator are appended first, and the indicator
//! then fetches its own reply, which replaces it out of band.

use std::fmt::Write as _;

use crate::config::SiteConfig;
use crate::nav::{NavMenu, SiteNav};
use crate::widget::{
    CompletedSubmission, Message, PendingSubmission, SubmissionId, TranscriptEntry, WidgetSnapshot,
};

/// Keeps the newest bubble in view once htmx has inserted it.
const SCROLL_INTO_VIEW: &str =
    r#" hx-on::load="this.parentElement.scrollTop = this.parentElement.scrollHeight""#;

/// Escape HTML special characters. Message text is never interpreted as markup.
pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

fn session_path(session_id: &str, path: &str) -> String {
    format!("/s/{session_id}/{path}")
}

/// Full page for a fresh visitor session.
pub fn page(
    site: &SiteConfig,
    nav: &SiteNav,
    session_id: &str,
    menu: NavMenu,
    widget: &WidgetSnapshot,
) -> String {
    let mut sections = String::new();
    for section in nav.sections() {
        let _ = write!(
            sections,
            r#"
        <section id="{id}" class="section">
            <h2>{title}</h2>
            <p>{body}</p>
        </section>"#,
            id = html_escape(&section.id),
            title = html_escape(&section.title),
            body = html_escape(&section.body),
        );
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <script src="https://unpkg.com/htmx.org@2.0.8"></script>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <main>
        <header class="hero">
            <h1>{owner}</h1>
            <p>{tagline}</p>
        </header>{sections}
    </main>
    <div class="chatbot">
        <button id="chatbot-btn" class="chatbot-btn" aria-label="Open chat"
            hx-post="{open}" hx-target="#chatbot-window" hx-swap="outerHTML">&#128172;</button>
        {window}
    </div>
</body>
</html>"##,
        title = html_escape(&site.title),
        owner = html_escape(&site.owner),
        tagline = html_escape(&site.tagline),
        nav = nav_bar(session_id, site, nav, menu),
        open = session_path(session_id, "widget/open"),
        window = chat_window(session_id, widget),
    )
}

/// Navigation bar with the hamburger menu.
pub fn nav_bar(session_id: &str, site: &SiteConfig, nav: &SiteNav, menu: NavMenu) -> String {
    let close = session_path(session_id, "nav/close");
    let mut links = String::new();
    for section in nav.sections() {
        let href = section.href();
        // Links without a matching section keep their default behaviour.
        let onclick = nav
            .scroll_target(&href)
            .map(|target| {
                format!(
                    r#" onclick="{}""#,
                    html_escape(&format!(
                        "document.getElementById('{}')?.scrollIntoView({}); return false;",
                        target.id,
                        target.options.to_json()
                    ))
                )
            })
            .unwrap_or_default();
        let _ = write!(
            links,
            r##"
            <li><a href="{href}" class="nav-link" hx-post="{close}" hx-target="#site-nav" hx-swap="outerHTML"{onclick}>{label}</a></li>"##,
            href = html_escape(&href),
            label = html_escape(&section.title),
        );
    }

    format!(
        r##"<nav id="site-nav" class="navbar">
        <a href="#" class="brand">{owner}</a>
        <ul class="{menu_class}">{links}
        </ul>
        <div class="{hamburger_class}" hx-post="{toggle}" hx-target="#site-nav" hx-swap="outerHTML">
            <span class="bar"></span><span class="bar"></span><span class="bar"></span>
        </div>
    </nav>"##,
        owner = html_escape(&site.owner),
        menu_class = menu.class("nav-menu"),
        hamburger_class = menu.class("hamburger"),
        toggle = session_path(session_id, "nav/toggle"),
    )
}

/// The chat window, shown or hidden according to the panel state.
pub fn chat_window(session_id: &str, widget: &WidgetSnapshot) -> String {
    format!(
        r##"<div id="chatbot-window" class="chatbot-window" style="display: {display};">
            <div class="chat-header">
                <h3>Chat with me</h3>
                <button id="close-chat" aria-label="Close chat"
                    hx-post="{close}" hx-target="#chatbot-window" hx-swap="outerHTML">&times;</button>
            </div>
            {messages}
            <form class="chat-input" hx-post="{send}" hx-target="#chat-messages" hx-swap="beforeend">
                {input}
                <button id="send-btn" type="submit">Send</button>
            </form>
        </div>"##,
        display = widget.panel.display(),
        close = session_path(session_id, "widget/close"),
        send = session_path(session_id, "widget/messages"),
        messages = chat_messages(widget),
        input = message_input(&widget.input, false),
    )
}

/// The transcript container.
pub fn chat_messages(widget: &WidgetSnapshot) -> String {
    let mut entries = String::new();
    for entry in &widget.entries {
        entries.push_str("\n                ");
        entries.push_str(&transcript_entry(entry));
    }
    let scroll = if widget.scrolled_to_bottom {
        r#" hx-on::load="this.scrollTop = this.scrollHeight""#
    } else {
        ""
    };
    format!(r#"<div id="chat-messages" class="chat-messages"{scroll}>{entries}</div>"#)
}

/// One message bubble, or the typing indicator.
pub fn transcript_entry(entry: &TranscriptEntry) -> String {
    match entry {
        TranscriptEntry::Message(message) => format!(
            r#"<div class="message {}">{}</div>"#,
            message.sender.css_class(),
            html_escape(&message.text)
        ),
        TranscriptEntry::Pending(id) => pending_marker(*id, ""),
    }
}

fn pending_marker(id: SubmissionId, attrs: &str) -> String {
    format!(
        r#"<div id="pending-{id}" class="message bot-message" data-pending="{id}"{attrs}><div class="typing-indicator"></div></div>"#
    )
}

/// The text input. `oob` marks it for an htmx out-of-band swap.
pub fn message_input(value: &str, oob: bool) -> String {
    let oob = if oob { r#" hx-swap-oob="true""# } else { "" };
    format!(
        r#"<input type="text" id="user-input" name="message" placeholder="Type your message..." autocomplete="off" value="{}"{oob}>"#,
        html_escape(value)
    )
}

/// Response to a new submission, appended to the transcript: the user
/// bubble, a typing indicator that requests the reply as soon as it loads,
/// and the cleared input.
pub fn submission_started(session_id: &str, pending: &PendingSubmission) -> String {
    let fetch = format!(
        r#" hx-post="{}" hx-trigger="load" hx-swap="none"{SCROLL_INTO_VIEW}"#,
        session_path(session_id, &format!("widget/replies/{}", pending.id))
    );
    format!(
        "{}\n{}\n{}",
        transcript_entry(&TranscriptEntry::Message(Message::user(pending.text.as_str()))),
        pending_marker(pending.id, &fetch),
        message_input("", true)
    )
}

/// The bot message that replaces a submission's typing indicator.
pub fn submission_reply(completed: &CompletedSubmission) -> String {
    format!(
        r#"<div id="pending-{id}" class="message {class}" hx-swap-oob="outerHTML"{SCROLL_INTO_VIEW}>{text}</div>"#,
        id = completed.id,
        class = completed.reply.sender.css_class(),
        text = html_escape(&completed.reply.text),
    )
}

const STYLE: &str = r"
body { margin: 0; font-family: system-ui, sans-serif; scroll-behavior: smooth; }
.navbar { display: flex; align-items: center; justify-content: space-between; padding: 1rem 2rem; position: sticky; top: 0; background: #fff; }
.nav-menu { display: flex; gap: 1.5rem; list-style: none; margin: 0; }
.hamburger { display: none; cursor: pointer; }
.hamburger .bar { display: block; width: 25px; height: 3px; margin: 5px auto; background: #333; }
@media (max-width: 768px) {
  .hamburger { display: block; }
  .nav-menu { display: none; flex-direction: column; }
  .nav-menu.active { display: flex; }
}
.section { min-height: 60vh; padding: 4rem 2rem; }
.chatbot { position: fixed; right: 2rem; bottom: 2rem; }
.chatbot-btn { width: 3.5rem; height: 3.5rem; border-radius: 50%; font-size: 1.5rem; }
.chatbot-window { flex-direction: column; width: 22rem; height: 28rem; background: #fff; box-shadow: 0 4px 16px rgba(0,0,0,.2); border-radius: .75rem; }
.chat-header { display: flex; justify-content: space-between; align-items: center; padding: .5rem 1rem; }
.chat-messages { flex: 1; overflow-y: auto; padding: 1rem; }
.message { margin: .5rem 0; padding: .5rem .75rem; border-radius: .75rem; max-width: 80%; white-space: pre-wrap; }
.user-message { margin-left: auto; background: #2563eb; color: #fff; }
.bot-message { background: #f1f5f9; }
.typing-indicator { width: 2rem; height: .5rem; border-radius: .25rem; background: #cbd5e1; animation: pulse 1s infinite; }
@keyframes pulse { 50% { opacity: .4; } }
.chat-input { display: flex; gap: .5rem; padding: .5rem; }
.chat-input input { flex: 1; }
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Section;
    use crate::widget::PanelVisibility;

    fn site() -> SiteConfig {
        SiteConfig {
            title: "Portfolio".into(),
            owner: "Ada <Dev>".into(),
            tagline: "Builder".into(),
            sections: vec![Section {
                id: "about".into(),
                title: "About".into(),
                body: "Hello".into(),
            }],
        }
    }

    fn snapshot(entries: Vec<TranscriptEntry>) -> WidgetSnapshot {
        WidgetSnapshot {
            panel: PanelVisibility::Hidden,
            entries,
            input: String::new(),
            scrolled_to_bottom: true,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_message_text_is_escaped() {
        let entry = TranscriptEntry::Message(Message::bot("<img src=x onerror=alert(1)>"));
        let html = transcript_entry(&entry);
        assert_eq!(
            html,
            r#"<div class="message bot-message">&lt;img src=x onerror=alert(1)&gt;</div>"#
        );
    }

    #[test]
    fn test_pending_marker_renders_typing_indicator() {
        let id = SubmissionId::new();
        let html = transcript_entry(&TranscriptEntry::Pending(id));
        assert!(html.contains(r#"class="typing-indicator""#));
        assert!(html.starts_with(&format!(r#"<div id="pending-{id}""#)));
        // Only the fragment that created the marker requests the reply.
        assert!(!html.contains("hx-trigger"));
    }

    #[test]
    fn test_chat_window_display_follows_panel() {
        let mut widget = snapshot(vec![]);
        assert!(chat_window("abc", &widget).contains("display: none;"));

        widget.panel = PanelVisibility::Visible;
        let html = chat_window("abc", &widget);
        assert!(html.contains("display: flex;"));
        assert!(html.contains(r#"hx-post="/s/abc/widget/close""#));
        assert!(html.contains(r#"hx-post="/s/abc/widget/messages""#));
    }

    #[test]
    fn test_submission_started_requests_its_reply() {
        let pending = PendingSubmission {
            id: SubmissionId::new(),
            text: "<hi>".into(),
        };
        let html = submission_started("abc", &pending);

        assert!(html.starts_with(r#"<div class="message user-message">&lt;hi&gt;</div>"#));
        assert!(html.contains(&format!(r#"id="pending-{}""#, pending.id)));
        assert!(html.contains(r#"class="typing-indicator""#));
        assert!(html.contains(&format!(
            r#"hx-post="/s/abc/widget/replies/{}" hx-trigger="load" hx-swap="none""#,
            pending.id
        )));
        assert!(html.contains(r#"value="" hx-swap-oob="true""#));
    }

    #[test]
    fn test_submission_reply_replaces_marker() {
        let completed = CompletedSubmission {
            id: SubmissionId::new(),
            outcome: crate::widget::SubmissionOutcome::Replied,
            reply: Message::bot("a & b"),
        };
        let html = submission_reply(&completed);
        assert!(html.starts_with(&format!(
            r#"<div id="pending-{}" class="message bot-message" hx-swap-oob="outerHTML""#,
            completed.id
        )));
        assert!(html.ends_with(">a &amp; b</div>"));
    }

    #[test]
    fn test_nav_bar_classes_and_scroll() {
        let site = site();
        let nav = SiteNav::new(site.sections.clone());
        let mut menu = NavMenu::default();

        let closed = nav_bar("abc", &site, &nav, menu);
        assert!(closed.contains(r#"class="nav-menu""#));
        assert!(closed.contains(r#"class="hamburger""#));
        assert!(closed.contains("scrollIntoView({&quot;behavior&quot;:&quot;smooth&quot;,&quot;block&quot;:&quot;start&quot;})"));
        assert!(closed.contains("Ada &lt;Dev&gt;"));

        menu.toggle();
        let open = nav_bar("abc", &site, &nav, menu);
        assert!(open.contains(r#"class="nav-menu active""#));
        assert!(open.contains(r#"class="hamburger active""#));
    }

    #[test]
    fn test_page_contains_widget_ids() {
        let site = site();
        let nav = SiteNav::new(site.sections.clone());
        let html = page(&site, &nav, "abc", NavMenu::default(), &snapshot(vec![]));
        for id in [
            "chatbot-btn",
            "chatbot-window",
            "close-chat",
            "chat-messages",
            "user-input",
            "send-btn",
            "site-nav",
            "about",
        ] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing {id}");
        }
    }
}
