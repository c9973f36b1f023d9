use std::collections::BTreeMap;

use enricher_core::{ChartCommand, ChartId, ChartSpec};
use enricher_logging::{enricher_debug, enricher_warn};

use super::constants::{BAR_GLYPH, BAR_WIDTH};

/// Chart surface for the terminal: each instance is pre-drawn on creation.
#[derive(Debug, Default)]
pub struct TerminalChart {
    live: BTreeMap<ChartId, Vec<String>>,
}

impl TerminalChart {
    pub fn apply(&mut self, command: ChartCommand) {
        match command {
            ChartCommand::Create { chart_id, spec } => {
                if !self.live.is_empty() {
                    enricher_warn!(
                        "Creating chart {} while {:?} still live",
                        chart_id,
                        self.live.keys().collect::<Vec<_>>()
                    );
                }
                enricher_debug!("Chart {} created with {} bars", chart_id, spec.labels.len());
                self.live.insert(chart_id, draw_bars(&spec));
            }
            ChartCommand::Destroy { chart_id } => {
                if self.live.remove(&chart_id).is_some() {
                    enricher_debug!("Chart {} destroyed", chart_id);
                } else {
                    enricher_warn!("Chart {} was not live", chart_id);
                }
            }
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn rows(&self, chart_id: ChartId) -> Option<&[String]> {
        self.live.get(&chart_id).map(Vec::as_slice)
    }
}

fn draw_bars(spec: &ChartSpec) -> Vec<String> {
    let label_width = spec
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    let max_value = spec.values.iter().copied().max().unwrap_or(0);

    let mut rows = Vec::with_capacity(spec.labels.len() + 1);
    rows.push(spec.title.clone());
    for (label, value) in spec.labels.iter().zip(&spec.values) {
        let bar: String = std::iter::repeat(BAR_GLYPH)
            .take(bar_len(*value, max_value))
            .collect();
        rows.push(format!("  {label:<label_width$} {bar} {value}"));
    }
    rows
}

/// Bar length scaled against the largest count; non-zero counts get at least one glyph.
fn bar_len(value: u64, max_value: u64) -> usize {
    let scaled = u128::from(value) * u128::from(BAR_WIDTH) / u128::from(max_value.max(1));
    let len = usize::try_from(scaled).unwrap_or(usize::MAX);
    if value > 0 {
        len.max(1)
    } else {
        len
    }
}

#[cfg(test)]
mod tests {
    use enricher_core::WordFrequencies;

    use super::*;

    fn spec(entries: &[(&str, u64)]) -> ChartSpec {
        ChartSpec::word_frequencies(
            &entries
                .iter()
                .map(|(word, count)| (word.to_string(), *count))
                .collect::<WordFrequencies>(),
        )
    }

    #[test]
    fn tracks_live_instances() {
        let mut charts = TerminalChart::default();
        charts.apply(ChartCommand::Create {
            chart_id: 1,
            spec: spec(&[("a", 1)]),
        });
        assert_eq!(charts.live_count(), 1);

        charts.apply(ChartCommand::Destroy { chart_id: 1 });
        charts.apply(ChartCommand::Destroy { chart_id: 1 });
        assert_eq!(charts.live_count(), 0);
        assert!(charts.rows(1).is_none());
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let rows = draw_bars(&spec(&[("long", 30), ("ab", 15), ("z", 0)]));

        assert_eq!(rows[0], "Top 10 Word Frequencies");
        assert_eq!(rows[1], format!("  long {} 30", "█".repeat(30)));
        assert_eq!(rows[2], format!("  ab   {} 15", "█".repeat(15)));
        assert_eq!(rows[3], "  z     0");
    }

    #[test]
    fn huge_counts_scale_without_overflow() {
        let rows = draw_bars(&spec(&[("a", u64::MAX), ("b", u64::MAX / 2), ("c", 1)]));

        assert_eq!(rows[1], format!("  a {} {}", "█".repeat(30), u64::MAX));
        assert_eq!(rows[2], format!("  b {} {}", "█".repeat(14), u64::MAX / 2));
        assert_eq!(rows[3], "  c █ 1");
    }
}
