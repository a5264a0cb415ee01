// src/render/html.rs
//! Markup for the results section. Server-provided strings are escaped
//! before insertion.

use std::fmt::Write;

use super::view::{Tab, View};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn recommendation_item(text: &str) -> String {
    format!("<li>{}</li>", escape_html(text))
}

/// Results section as it stands in `view`.
pub fn results_html(view: &View) -> String {
    let mut html = String::new();
    let hidden = if view.results_visible { "" } else { " hidden" };

    let _ = writeln!(html, "<section id=\"results\" class=\"results{}\">", hidden);

    let _ = writeln!(html, "  <div class=\"score-card\">");
    let _ = writeln!(
        html,
        "    <svg class=\"score-ring\" viewBox=\"0 0 200 200\"><circle class=\"progress-ring\" r=\"90\" cx=\"100\" cy=\"100\" style=\"stroke-dashoffset: {:.2}\"/></svg>",
        view.score.ring_offset
    );
    let _ = writeln!(
        html,
        "    <div id=\"scoreValue\" class=\"score-value\">{}</div>",
        view.score.readout
    );
    let _ = writeln!(
        html,
        "    <div id=\"scoreStatus\" class=\"score-status {}\">{}</div>",
        view.score.status_class,
        escape_html(&view.score.status_label)
    );
    let _ = writeln!(html, "  </div>");

    let _ = writeln!(html, "  <div class=\"metrics\">");
    for bar in &view.metrics {
        let _ = writeln!(
            html,
            "    <div class=\"metric\" data-metric=\"{}\"><span class=\"metric-label\">{}</span><span class=\"metric-value\">{}/5</span><div class=\"metric-bar\" style=\"width: {:.0}%\"></div></div>",
            bar.metric.id(),
            bar.metric.label(),
            bar.value,
            if bar.visible { bar.width_percent } else { 0.0 }
        );
    }
    let _ = writeln!(html, "  </div>");

    let _ = writeln!(html, "  <ul id=\"recommendations\" class=\"recommendations\">");
    for item in &view.recommendations {
        let _ = writeln!(html, "    {}", recommendation_item(item));
    }
    let _ = writeln!(html, "  </ul>");

    let _ = writeln!(html, "  <div class=\"tabs\">");
    for tab in Tab::ALL {
        let active = if view.tabs.is_active(tab) { " active" } else { "" };
        let _ = writeln!(
            html,
            "    <button class=\"tab{}\" data-tab=\"{}\">{}</button>",
            active,
            tab.id(),
            tab.title()
        );
    }
    let _ = writeln!(html, "  </div>");

    for tab in Tab::ALL {
        let active = if view.tabs.is_active(tab) { " active" } else { "" };
        let _ = writeln!(
            html,
            "  <div class=\"tab-content{}\" id=\"{}\"><pre>{}</pre></div>",
            active,
            tab.id(),
            escape_html(view.panes.get(tab))
        );
    }

    html.push_str("</section>\n");
    html
}
