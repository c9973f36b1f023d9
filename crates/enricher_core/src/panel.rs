//! Output regions of the popup and the rules for filling them from a response.
//!
//! Each `apply_*` step touches only its own region, so one malformed field
//! never blocks the others.

use crate::chart::{ChartCommand, ChartSlot};
use crate::view_model::{ChartView, LinksView};
use crate::{ChartSpec, EnrichmentResponse, Language};

pub const NO_LINKS_TEXT: &str = "No internal links found";
pub const NO_SUMMARY_TEXT: &str = "No summary available";
pub const NO_TRANSLATION_TEXT: &str = "No translation available";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Panel {
    status: Option<String>,
    links: LinksView,
    summary: Option<String>,
    translation: Option<String>,
    chart: ChartSlot,
    graph_url: Option<String>,
}

impl Panel {
    pub(crate) fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
    }

    /// Renders every region of a successful response, in display order.
    pub(crate) fn apply_response(
        &mut self,
        response: &EnrichmentResponse,
        language: Language,
    ) -> Vec<ChartCommand> {
        let mut commands = Vec::new();
        self.apply_links(response.links.as_deref());
        self.apply_summary(response.summary.as_deref());
        self.apply_translation(response.translated.as_deref(), language);
        self.apply_chart(response, &mut commands);
        self.apply_graph(response.graph_url.as_deref());
        commands
    }

    /// Clears and hides all regions and releases the chart unconditionally.
    pub(crate) fn reset(&mut self) -> Vec<ChartCommand> {
        let mut commands = Vec::new();
        self.chart.destroy(&mut commands);
        self.status = None;
        self.links = LinksView::Hidden;
        self.summary = None;
        self.translation = None;
        self.graph_url = None;
        commands
    }

    fn apply_links(&mut self, links: Option<&[String]>) {
        match links {
            Some([]) => self.links = LinksView::NoneFound,
            Some(links) => self.links = LinksView::List(links.to_vec()),
            // absent: leave whatever the region currently shows
            None => {}
        }
    }

    fn apply_summary(&mut self, summary: Option<&str>) {
        let text = present(summary).unwrap_or(NO_SUMMARY_TEXT);
        self.summary = Some(format!("Summary: {text}"));
    }

    fn apply_translation(&mut self, translated: Option<&str>, language: Language) {
        let text = present(translated).unwrap_or(NO_TRANSLATION_TEXT);
        self.translation = Some(format!("Translated ({}): {text}", language.code()));
    }

    fn apply_chart(&mut self, response: &EnrichmentResponse, commands: &mut Vec<ChartCommand>) {
        match response
            .word_freq_data
            .as_ref()
            .filter(|frequencies| !frequencies.is_empty())
        {
            Some(frequencies) => self
                .chart
                .replace(ChartSpec::word_frequencies(frequencies), commands),
            None => self.chart.destroy(commands),
        }
    }

    fn apply_graph(&mut self, graph_url: Option<&str>) {
        self.graph_url = present(graph_url).map(ToOwned::to_owned);
    }

    pub(crate) fn status(&self) -> Option<&String> {
        self.status.as_ref()
    }

    pub(crate) fn links(&self) -> &LinksView {
        &self.links
    }

    pub(crate) fn summary(&self) -> Option<&String> {
        self.summary.as_ref()
    }

    pub(crate) fn translation(&self) -> Option<&String> {
        self.translation.as_ref()
    }

    pub(crate) fn chart_view(&self) -> Option<ChartView> {
        self.chart.live().map(|live| ChartView {
            chart_id: live.chart_id,
            spec: live.spec.clone(),
        })
    }

    pub(crate) fn graph_url(&self) -> Option<&String> {
        self.graph_url.as_ref()
    }
}

fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.is_empty())
}
