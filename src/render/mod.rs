// src/render/mod.rs
//! Paints normalized results into the [`View`].

pub mod animation;
pub mod html;
pub mod view;

pub use view::{Tab, UploadZone, View};

use std::fmt::Write;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::app_log;
use crate::normalizer::NormalizedResult;
use animation::{bar_width_percent, reveal_duration, reveal_frame, ring_offset, COUNTER_TICK};

pub struct Renderer;

impl Renderer {
    /// Fill panes, status, recommendations and bar values. The counter, ring
    /// and bars start from their empty state; [`Renderer::play_reveal`] or
    /// [`Renderer::settle`] brings them to the final values.
    pub fn paint(view: &mut View, result: &NormalizedResult) {
        view.panes.cleaned = pane_text(result.cleaned.as_deref(), "cleaned");
        view.panes.optimized = pane_text(result.optimized.as_deref(), "optimized");
        view.panes.final_text = pane_text(result.final_text.as_deref(), "final");
        view.panes.evaluation = evaluation_text(&result.evaluation);

        view.score.readout = 0;
        view.score.ring_offset = animation::ring_circumference();
        view.score.status_label = result.score.tier.label().to_string();
        view.score.status_class = result.score.tier.css_class().to_string();

        for (metric, value) in result.breakdown.iter() {
            let bar = view.metric_mut(metric);
            bar.value = value;
            bar.width_percent = bar_width_percent(value);
            bar.visible = false;
        }

        view.recommendations = result
            .recommendations
            .iter()
            .map(|r| r.text())
            .collect();

        app_log!(
            debug,
            "Painted results: score {} ({}), {} recommendations",
            result.score.value,
            result.score.tier,
            view.recommendations.len()
        );
    }

    /// Apply the reveal state reached `elapsed` after painting.
    pub fn apply_frame(view: &mut View, target: i64, elapsed: std::time::Duration) {
        let frame = reveal_frame(target, elapsed);
        view.score.readout = frame.readout;
        if frame.ring_applied {
            view.score.ring_offset = ring_offset(target);
        }
        for bar in view.metrics.iter_mut() {
            bar.visible = frame.bars_visible;
        }
    }

    /// Jump straight to the end of the reveal.
    pub fn settle(view: &mut View, target: i64) {
        Self::apply_frame(view, target, reveal_duration());
    }

    /// Drive the reveal on the counter tick, calling `on_frame` after each
    /// update.
    pub async fn play_reveal<F>(view: &mut View, target: i64, mut on_frame: F)
    where
        F: FnMut(&View),
    {
        let start = Instant::now();
        let mut ticker = interval(COUNTER_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let elapsed = start.elapsed();
            Self::apply_frame(view, target, elapsed);
            on_frame(view);
            if elapsed >= reveal_duration() {
                break;
            }
        }
    }

    /// Plain-text report of the results section for the terminal.
    pub fn render_text(view: &View) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "ATS Score: {}/100  [{}]",
            view.score.readout, view.score.status_label
        );
        let _ = writeln!(out);

        for bar in &view.metrics {
            let filled = if bar.visible { bar.value.clamp(0, 5) as usize } else { 0 };
            let _ = writeln!(
                out,
                "  {:<22} {}{} {}/5",
                bar.metric.label(),
                "#".repeat(filled),
                "-".repeat(5 - filled),
                bar.value
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendations:");
        for item in &view.recommendations {
            let _ = writeln!(out, "  - {}", item);
        }

        let active = view.tabs.active();
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", active.title());
        let _ = writeln!(out, "{}", view.panes.get(active));

        out
    }
}

fn pane_text(text: Option<&str>, kind: &str) -> String {
    match text {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => format!("No {} text available", kind),
    }
}

fn evaluation_text(evaluation: &serde_json::Value) -> String {
    match evaluation {
        serde_json::Value::Null => "No evaluation available".to_string(),
        serde_json::Value::Object(map) if map.len() == 1 && map.contains_key("raw") => map
            .get("raw")
            .and_then(|raw| raw.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| evaluation.to_string()),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{normalize, Metric};
    use crate::types::AnalysisResult;
    use serde_json::json;
    use std::time::Duration;

    fn sample() -> NormalizedResult {
        let result: AnalysisResult = serde_json::from_value(json!({
            "cleaned": "Jane Doe",
            "rewritten": "Jane Doe, Rust engineer",
            "evaluation": {
                "overall_score": 72,
                "breakdown": {"keywords": 5, "action_verbs": 2},
                "quick_wins": ["Use <b>metrics</b>"]
            }
        }))
        .unwrap();
        normalize(&result)
    }

    #[test]
    fn test_paint_fills_panes_with_placeholders() {
        let mut view = View::default();
        Renderer::paint(&mut view, &sample());

        assert_eq!(view.panes.cleaned, "Jane Doe");
        assert_eq!(view.panes.optimized, "Jane Doe, Rust engineer");
        assert_eq!(view.panes.final_text, "No final text available");
        assert_eq!(view.score.status_label, "Good Match");
        assert_eq!(view.score.readout, 0);
        assert_eq!(
            view.recommendations,
            vec!["Use <b>metrics</b>".to_string()]
        );
    }

    #[test]
    fn test_paint_leaves_bars_hidden_until_revealed() {
        let mut view = View::default();
        Renderer::paint(&mut view, &sample());
        assert_eq!(view.metric(Metric::Keywords).value, 5);
        assert!(!view.metric(Metric::Keywords).visible);

        Renderer::settle(&mut view, 72);
        assert_eq!(view.score.readout, 72);
        assert_eq!(view.metric(Metric::Keywords).width_percent, 100.0);
        assert!(view.metrics.iter().all(|bar| bar.visible));
        assert!((view.score.ring_offset - ring_offset(72)).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_reveal_ends_on_target() {
        let mut view = View::default();
        let result = sample();
        Renderer::paint(&mut view, &result);

        let mut frames = Vec::new();
        Renderer::play_reveal(&mut view, 72, |v| frames.push(v.score.readout)).await;

        assert_eq!(view.score.readout, 72);
        assert_eq!(*frames.last().unwrap(), 72);
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert!(view.metrics.iter().all(|bar| bar.visible));
    }

    #[test]
    fn test_ring_waits_for_delay() {
        let mut view = View::default();
        Renderer::paint(&mut view, &sample());
        Renderer::apply_frame(&mut view, 72, Duration::from_millis(50));
        assert_eq!(view.score.ring_offset, animation::ring_circumference());

        Renderer::apply_frame(&mut view, 72, Duration::from_millis(100));
        assert!((view.score.ring_offset - ring_offset(72)).abs() < 1e-9);
    }

    #[test]
    fn test_evaluation_pane_shows_raw_text() {
        assert_eq!(evaluation_text(&json!({"raw": "Score: 70"})), "Score: 70");
        assert!(evaluation_text(&json!({"overall_score": 70})).contains("\"overall_score\": 70"));
    }

    #[test]
    fn test_render_text_report() {
        let mut view = View::default();
        Renderer::paint(&mut view, &sample());
        Renderer::settle(&mut view, 72);

        let text = Renderer::render_text(&view);
        assert!(text.starts_with("ATS Score: 72/100  [Good Match]"));
        assert!(text.contains("  - Use <b>metrics</b>"));
        assert!(text.contains("== Cleaned Resume =="));
    }
}
