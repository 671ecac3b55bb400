use rollcall_core::{AppViewModel, RosterRowView};

pub fn render(view: &AppViewModel) -> Vec<String> {
    if view.loading {
        return vec!["Loading...".to_string()];
    }

    let mut lines = Vec::with_capacity(view.rows.len() + 4);

    let count = match view.participant_count {
        Some(n) => format!("{n} joined"),
        None => "check needed".to_string(),
    };
    let mut status = format!(
        "{count} | {}/{} present",
        view.present_count, view.roster_len
    );
    if let Some(at) = &view.last_checked_at {
        status.push_str(&format!(" | last check {at}"));
    }
    if view.scrape_in_flight {
        status.push_str(" | checking...");
    }
    lines.push(status);

    if let Some(err) = &view.last_error {
        lines.push(format!("! {err}"));
    }

    if view.rows.is_empty() {
        lines.push("No users added yet".to_string());
    } else {
        lines.extend(view.rows.iter().map(render_row));
    }
    lines
}

fn render_row(row: &RosterRowView) -> String {
    let mut line = if row.present {
        format!("[x] {}  (attended)", row.name)
    } else {
        format!("[ ] {}", row.name)
    };
    if let (true, Some(url)) = (row.present, &row.avatar_url) {
        line.push_str(&format!("  <{url}>"));
    }
    line
}
