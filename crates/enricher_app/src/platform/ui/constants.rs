pub const LINKS_HEADING: &str = "Internal Links:";
pub const NEW_CONTEXT_MARK: &str = "(opens in new window)";
pub const BAR_WIDTH: u64 = 30;
pub const BAR_GLYPH: char = '█';
/// Data URLs longer than this are abbreviated in the graph region.
pub const MAX_GRAPH_URL_CHARS: usize = 96;
