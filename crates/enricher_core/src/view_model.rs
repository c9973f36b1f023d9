use crate::{ChartId, ChartSpec, Language, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinksView {
    /// Region empty and hidden.
    #[default]
    Hidden,
    /// The service returned an empty link list.
    NoneFound,
    /// Links in service order; each opens in a new browsing context.
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartView {
    pub chart_id: ChartId,
    pub spec: ChartSpec,
}

/// Snapshot of the popup panel. `None` regions are empty and hidden.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub capture_enabled: bool,
    pub process_enabled: bool,
    pub language: Language,
    pub phase: Phase,
    pub status: Option<String>,
    pub links: LinksView,
    pub summary: Option<String>,
    pub translation: Option<String>,
    pub chart: Option<ChartView>,
    pub graph_url: Option<String>,
    pub dirty: bool,
}

impl PanelViewModel {
    /// True when every output region is empty/hidden and no chart is live.
    pub fn is_cleared(&self) -> bool {
        self.status.is_none()
            && self.links == LinksView::Hidden
            && self.summary.is_none()
            && self.translation.is_none()
            && self.chart.is_none()
            && self.graph_url.is_none()
    }
}
