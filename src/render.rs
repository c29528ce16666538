//! Human-readable rendering of stored events.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::event::{Action, EventDocument};
use crate::timestamp::format_utc;

/// One sentence describing `event`, e.g. `alice pushed to main on 15 January 2024 - 10:30 AM UTC`.
pub fn format_event_for_ui(event: &EventDocument) -> String {
    let author = event.author.as_deref().unwrap_or("Unknown");
    let from_branch = event.from_branch.as_deref().unwrap_or("unknown");
    let to_branch = event.to_branch.as_deref().unwrap_or("unknown");

    match &event.action {
        Some(Action::Push) => format!(
            "{author} pushed to {to_branch} on {}",
            format_utc(event.timestamp.as_deref())
        ),
        Some(Action::PullRequest) => format!(
            "{author} submitted a pull request from {from_branch} to {to_branch} on {}",
            format_utc(event.timestamp.as_deref())
        ),
        Some(Action::Merge) => format!(
            "{author} merged branch {from_branch} to {to_branch} on {}",
            format_utc(event.timestamp.as_deref())
        ),
        Some(Action::Other(raw)) => format!("Unknown action: {raw}"),
        None => "Unknown action: UNKNOWN".to_string(),
    }
}

const PAGE_CSS: &str = "
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 2rem auto; max-width: 48rem; color: #24292f; }
h1 { font-size: 1.5rem; }
ul { list-style: none; padding: 0; }
li { padding: 0.75rem 1rem; border: 1px solid #d0d7de; border-radius: 6px; margin-bottom: 0.5rem; }
.empty { color: #57606a; }
";

/// Full HTML page listing the given event lines. Reloads itself every 15 seconds.
pub fn events_page(lines: &[String]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta http-equiv="refresh" content="15";
                title { "Repository Activity" }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                h1 { "Latest Repository Activity" }
                @if lines.is_empty() {
                    p class="empty" { "No events received yet." }
                } @else {
                    ul class="events" {
                        @for line in lines {
                            li { (line) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(action: Action) -> EventDocument {
        EventDocument {
            request_id: Some("7".to_string()),
            author: Some("bob".to_string()),
            action: Some(action),
            from_branch: Some("feature".to_string()),
            to_branch: Some("main".to_string()),
            timestamp: Some("2024-02-03T15:04:00Z".to_string()),
        }
    }

    #[test]
    fn push_line() {
        let event = EventDocument {
            request_id: Some("abc123".to_string()),
            author: Some("alice".to_string()),
            action: Some(Action::Push),
            from_branch: None,
            to_branch: Some("main".to_string()),
            timestamp: Some("2024-01-15T10:30:00Z".to_string()),
        };
        assert_eq!(
            format_event_for_ui(&event),
            "alice pushed to main on 15 January 2024 - 10:30 AM UTC"
        );
    }

    #[test]
    fn pull_request_line() {
        assert_eq!(
            format_event_for_ui(&document(Action::PullRequest)),
            "bob submitted a pull request from feature to main on 3 February 2024 - 3:04 PM UTC"
        );
    }

    #[test]
    fn merge_line() {
        assert_eq!(
            format_event_for_ui(&document(Action::Merge)),
            "bob merged branch feature to main on 3 February 2024 - 3:04 PM UTC"
        );
    }

    #[test]
    fn unknown_action() {
        assert_eq!(
            format_event_for_ui(&document(Action::Other("FROBNICATE".to_string()))),
            "Unknown action: FROBNICATE"
        );
        assert_eq!(
            format_event_for_ui(&EventDocument::default()),
            "Unknown action: UNKNOWN"
        );
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let event = EventDocument {
            action: Some(Action::Merge),
            ..Default::default()
        };
        assert_eq!(
            format_event_for_ui(&event),
            "Unknown merged branch unknown to unknown on Unknown time"
        );
    }

    #[test]
    fn bad_timestamp_degrades() {
        let mut event = document(Action::PullRequest);
        event.timestamp = Some("yesterday-ish".to_string());
        assert!(format_event_for_ui(&event).ends_with("on Invalid time"));
    }

    #[test]
    fn page_escapes_lines() {
        let page = events_page(&["<b>eve</b> pushed to main".to_string()]).into_string();
        assert!(page.contains("&lt;b&gt;eve&lt;/b&gt; pushed to main"));
        assert!(!page.contains("No events received yet."));
    }

    #[test]
    fn empty_page() {
        let page = events_page(&[]).into_string();
        assert!(page.contains("No events received yet."));
    }
}
