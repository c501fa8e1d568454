// Plain-text rendering of a session view

use crate::services::{SegmentControl, SessionView};

const TITLE: &str = "Version Updater";

/// Draw `view` as text, one block per control group
pub fn render_view(view: &SessionView) -> String {
    let mut lines = vec![TITLE.to_string(), "-".repeat(TITLE.len())];

    match view {
        SessionView::Uninitialized => lines.push("No version loaded".to_string()),
        SessionView::Unsupported { message } => lines.push(message.clone()),
        SessionView::Parsed {
            settings_label,
            updater_label,
            apply,
            segments,
            ..
        } => {
            let marker = if apply.enabled { "*" } else { " " };
            lines.push(format!("[{marker}] {}", apply.label));
            lines.push(String::new());
            lines.extend(segments.iter().map(render_segment));
            lines.push(String::new());
            lines.push(settings_label.clone());
            lines.push(updater_label.clone());
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_segment(segment: &SegmentControl) -> String {
    let name = segment.name.as_deref().unwrap_or("");
    let up = if segment.can_increment { "[+]" } else { "[ ]" };
    let down = if segment.can_decrement { "[-]" } else { "[ ]" };
    format!(
        "  {index:>2} {name:<8} {up} {value:>6} {down}",
        index = segment.index,
        value = segment.value
    )
}
