// src/render/view.rs
//! Owned model of every element the page reads from or writes to.

use crate::form::word_count_label;
use crate::normalizer::Metric;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadZone {
    DropTarget,
    FileSummary { name: String, size_label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Cleaned,
    Optimized,
    Final,
    Evaluation,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Cleaned, Tab::Optimized, Tab::Final, Tab::Evaluation];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned",
            Self::Optimized => "optimized",
            Self::Final => "final",
            Self::Evaluation => "evaluation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Cleaned => "Cleaned Resume",
            Self::Optimized => "Optimized Resume",
            Self::Final => "Final Resume",
            Self::Evaluation => "ATS Evaluation",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == id)
    }
}

/// Tab buttons and content panes share one active key, so exactly one of
/// each is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStrip {
    active: Tab,
}

impl Default for TabStrip {
    fn default() -> Self {
        Self { active: Tab::Cleaned }
    }
}

impl TabStrip {
    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPanes {
    pub cleaned: String,
    pub optimized: String,
    pub final_text: String,
    pub evaluation: String,
}

impl TextPanes {
    pub fn get(&self, tab: Tab) -> &str {
        match tab {
            Tab::Cleaned => &self.cleaned,
            Tab::Optimized => &self.optimized,
            Tab::Final => &self.final_text,
            Tab::Evaluation => &self.evaluation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreView {
    pub readout: i64,
    pub status_label: String,
    pub status_class: String,
    pub ring_offset: f64,
}

impl Default for ScoreView {
    fn default() -> Self {
        Self {
            readout: 0,
            status_label: String::new(),
            status_class: String::new(),
            ring_offset: super::animation::ring_circumference(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBar {
    pub metric: Metric,
    pub value: i64,
    pub width_percent: f64,
    pub visible: bool,
}

impl MetricBar {
    fn empty(metric: Metric) -> Self {
        Self {
            metric,
            value: 0,
            width_percent: 0.0,
            visible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub upload_zone: UploadZone,
    pub word_count: String,
    pub submit_enabled: bool,
    pub submit_visible: bool,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub results_scrolled_into_view: bool,
    pub panes: TextPanes,
    pub score: ScoreView,
    pub metrics: [MetricBar; 5],
    /// Plain text, one entry per recommendation; escaped when written as markup.
    pub recommendations: Vec<String>,
    pub tabs: TabStrip,
}

impl Default for View {
    fn default() -> Self {
        Self {
            upload_zone: UploadZone::DropTarget,
            word_count: word_count_label(0),
            submit_enabled: false,
            submit_visible: true,
            loading_visible: false,
            results_visible: false,
            results_scrolled_into_view: false,
            panes: TextPanes::default(),
            score: ScoreView::default(),
            metrics: Metric::ALL.map(MetricBar::empty),
            recommendations: Vec::new(),
            tabs: TabStrip::default(),
        }
    }
}

impl View {
    pub fn metric(&self, metric: Metric) -> &MetricBar {
        // `metrics` follows `Metric::ALL` order
        &self.metrics[metric as usize]
    }

    pub fn metric_mut(&mut self, metric: Metric) -> &mut MetricBar {
        &mut self.metrics[metric as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_tab_active() {
        let mut tabs = TabStrip::default();
        assert!(tabs.is_active(Tab::Cleaned));

        tabs.select(Tab::Final);
        let active: Vec<Tab> = Tab::ALL.into_iter().filter(|t| tabs.is_active(*t)).collect();
        assert_eq!(active, vec![Tab::Final]);
    }

    #[test]
    fn test_tab_from_id() {
        assert_eq!(Tab::from_id("optimized"), Some(Tab::Optimized));
        assert_eq!(Tab::from_id("evaluation"), Some(Tab::Evaluation));
        assert_eq!(Tab::from_id("bogus"), None);
    }

    #[test]
    fn test_metric_slots_follow_metric_order() {
        let view = View::default();
        for metric in Metric::ALL {
            assert_eq!(view.metric(metric).metric, metric);
        }
    }
}
