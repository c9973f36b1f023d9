use clap::{Parser, ValueEnum};
use enricher_core::Language;
use enricher_engine::DEFAULT_ENDPOINT;
use enricher_logging::LogDestination;

/// Capture a page, send it for enrichment and render the result in the terminal.
#[derive(Debug, Parser)]
#[command(name = "enricher", version)]
pub struct Cli {
    /// Page that plays the role of the active tab.
    #[arg(long)]
    pub url: String,

    /// Target language for the translation (en, es, fr, de, hi).
    #[arg(long, env = "ENRICHER_LANGUAGE", default_value = "en")]
    pub language: Language,

    /// Enrichment service endpoint.
    #[arg(long, env = "ENRICHER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Read on/off/lang/process commands from stdin instead of running once.
    #[arg(long)]
    pub interactive: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_local_service() {
        let cli = Cli::try_parse_from(["enricher", "--url", "https://example.com"]).unwrap();
        assert_eq!(cli.endpoint, "http://localhost:5000/process");
        assert_eq!(cli.log, LogTarget::Terminal);
        assert!(!cli.interactive);
    }

    #[test]
    fn language_is_validated() {
        let cli = Cli::try_parse_from(["enricher", "--url", "u", "--language", "hi"]).unwrap();
        assert_eq!(cli.language, Language::Hi);
        assert!(Cli::try_parse_from(["enricher", "--url", "u", "--language", "xx"]).is_err());
    }
}
