use enricher_core::{LinksView, PanelViewModel, NO_LINKS_TEXT};

use super::chart::TerminalChart;
use super::constants::*;

/// Lines of the popup panel; hidden regions produce nothing.
pub fn render(view: &PanelViewModel, charts: &TerminalChart) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "[capture: {} | language: {} ({}) | process: {}]",
        if view.capture_enabled { "on" } else { "off" },
        view.language.code(),
        view.language.display_name(),
        if view.process_enabled {
            "enabled"
        } else {
            "disabled"
        },
    ));

    if let Some(status) = &view.status {
        lines.push(status.clone());
    }

    match &view.links {
        LinksView::Hidden => {}
        LinksView::NoneFound => lines.push(NO_LINKS_TEXT.to_string()),
        LinksView::List(links) => {
            lines.push(LINKS_HEADING.to_string());
            lines.extend(
                links
                    .iter()
                    .map(|link| format!("  - {link} {NEW_CONTEXT_MARK}")),
            );
        }
    }

    lines.extend(view.summary.iter().cloned());
    lines.extend(view.translation.iter().cloned());

    if let Some(rows) = view
        .chart
        .as_ref()
        .and_then(|chart| charts.rows(chart.chart_id))
    {
        lines.extend(rows.iter().cloned());
    }

    if let Some(url) = &view.graph_url {
        lines.push(format!("Graph: {}", abbreviate_graph_url(url)));
    }

    lines
}

fn abbreviate_graph_url(url: &str) -> String {
    if !url.starts_with("data:") || url.chars().count() <= MAX_GRAPH_URL_CHARS {
        return url.to_string();
    }
    let head = url.split(',').next().unwrap_or(url);
    format!("{head},... ({} bytes inline)", url.len())
}

#[cfg(test)]
mod tests {
    use enricher_core::{ChartCommand, ChartSpec, ChartView, Language, Phase, WordFrequencies};
    use pretty_assertions::assert_eq;

    use super::*;

    fn completed_view(charts: &mut TerminalChart) -> PanelViewModel {
        let spec = ChartSpec::word_frequencies(&WordFrequencies::new(vec![(
            "hello".to_string(),
            3,
        )]));
        charts.apply(ChartCommand::Create {
            chart_id: 1,
            spec: spec.clone(),
        });
        PanelViewModel {
            capture_enabled: true,
            process_enabled: true,
            language: Language::Es,
            phase: Phase::Complete,
            status: Some("Processing complete!".to_string()),
            links: LinksView::List(vec!["https://a".to_string()]),
            summary: Some("Summary: S".to_string()),
            translation: Some("Translated (es): T".to_string()),
            chart: Some(ChartView { chart_id: 1, spec }),
            graph_url: Some("https://g/img.png".to_string()),
            dirty: false,
        }
    }

    #[test]
    fn renders_regions_in_display_order() {
        let mut charts = TerminalChart::default();
        let lines = render(&completed_view(&mut charts), &charts);

        assert_eq!(
            lines,
            vec![
                "[capture: on | language: es (Spanish) | process: enabled]".to_string(),
                "Processing complete!".to_string(),
                "Internal Links:".to_string(),
                "  - https://a (opens in new window)".to_string(),
                "Summary: S".to_string(),
                "Translated (es): T".to_string(),
                "Top 10 Word Frequencies".to_string(),
                format!("  hello {} 3", "█".repeat(30)),
                "Graph: https://g/img.png".to_string(),
            ]
        );
    }

    #[test]
    fn cleared_view_renders_only_the_control_line() {
        let charts = TerminalChart::default();
        let lines = render(&PanelViewModel::default(), &charts);

        assert_eq!(
            lines,
            vec!["[capture: off | language: en (English) | process: disabled]".to_string()]
        );
    }

    #[test]
    fn inline_graph_images_are_abbreviated() {
        let url = format!("data:image/png;base64,{}", "A".repeat(200));
        let shown = abbreviate_graph_url(&url);
        assert_eq!(shown, format!("data:image/png;base64,... ({} bytes inline)", url.len()));
        assert_eq!(abbreviate_graph_url("https://g/img.png"), "https://g/img.png");
    }
}
