use crate::WordFrequencies;

pub type ChartId = u64;

pub const CHART_TITLE: &str = "Top 10 Word Frequencies";
pub const DATASET_LABEL: &str = "Word Frequency";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartColors {
    pub background: &'static str,
    pub border: &'static str,
    pub border_width: u32,
    pub title: &'static str,
    pub ticks: &'static str,
    pub grid: &'static str,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            background: "rgba(0, 255, 136, 0.7)",
            border: "rgba(0, 255, 136, 1)",
            border_width: 1,
            title: "#fff",
            ticks: "#fff",
            grid: "#555",
        }
    }
}

/// Everything a chart surface needs to build one bar-chart instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: ChartColors,
    pub show_legend: bool,
    pub label_rotation_degrees: u32,
}

impl ChartSpec {
    /// Bar chart of the given frequencies; categories keep the mapping's order.
    pub fn word_frequencies(frequencies: &WordFrequencies) -> Self {
        let (labels, values): (Vec<String>, Vec<u64>) = frequencies
            .iter()
            .map(|(word, count)| (word.to_string(), count))
            .unzip();
        Self {
            title: CHART_TITLE.to_string(),
            dataset_label: DATASET_LABEL.to_string(),
            labels,
            values,
            colors: ChartColors::default(),
            show_legend: false,
            label_rotation_degrees: 45,
        }
    }
}

/// Lifecycle instruction for the chart surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartCommand {
    Create { chart_id: ChartId, spec: ChartSpec },
    Destroy { chart_id: ChartId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LiveChart {
    pub(crate) chart_id: ChartId,
    pub(crate) spec: ChartSpec,
}

/// Owns the single chart handle. At most one instance is live at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ChartSlot {
    live: Option<LiveChart>,
    last_id: ChartId,
}

impl ChartSlot {
    pub(crate) fn live(&self) -> Option<&LiveChart> {
        self.live.as_ref()
    }

    /// Destroys the current instance (if any) before creating the new one.
    pub(crate) fn replace(&mut self, spec: ChartSpec, commands: &mut Vec<ChartCommand>) {
        self.destroy(commands);
        self.last_id += 1;
        let chart_id = self.last_id;
        commands.push(ChartCommand::Create {
            chart_id,
            spec: spec.clone(),
        });
        self.live = Some(LiveChart { chart_id, spec });
    }

    /// No-op when nothing is live, so repeated resets never double-destroy.
    pub(crate) fn destroy(&mut self, commands: &mut Vec<ChartCommand>) {
        if let Some(live) = self.live.take() {
            commands.push(ChartCommand::Destroy {
                chart_id: live.chart_id,
            });
        }
    }
}
