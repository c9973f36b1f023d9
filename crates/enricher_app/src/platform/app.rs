use std::io::{self, Write};
use std::sync::{mpsc, Arc};

use anyhow::Context;
use log::LevelFilter;

use enricher_core::{update, AppState, Msg, PanelViewModel, Phase};
use enricher_engine::{
    ClientSettings, EnrichmentClient, FetchSettings, FetchedTab, ReqwestEnrichmentClient,
    TabSource,
};
use enricher_logging::enricher_info;

use super::effects::EffectRunner;
use super::input::{self, Command, HELP};
use super::ui;
use crate::cli::Cli;

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    enricher_logging::initialize(cli.log.into(), level);

    let client = ReqwestEnrichmentClient::new(ClientSettings {
        endpoint: cli.endpoint.clone(),
        ..ClientSettings::default()
    })
    .context("configuring the enrichment client")?;
    enricher_info!("Enrichment endpoint {}", client.endpoint());
    let tab = FetchedTab::new(cli.url.clone(), FetchSettings::default());

    let (mut controller, commands) =
        PopupController::new(Arc::new(tab), Arc::new(client), io::stdout().lock())
            .context("starting the engine runtime")?;
    controller.dispatch_msg(Msg::CaptureToggled(true))?;
    controller.dispatch_msg(Msg::LanguageSelected(cli.language))?;

    if cli.interactive {
        controller.print_line(HELP)?;
        input::spawn_stdin_reader(commands);
        controller.run_interactive()?;
    } else {
        // Only the engine may wake the loop from here on.
        drop(commands);
        controller.dispatch_msg(Msg::ProcessClicked)?;
        let phase = controller.run_until_settled()?;
        enricher_info!("Run settled in {:?}", phase);
    }
    Ok(())
}

/// Single entry point for every state change: user commands and engine
/// completions are queued as [`Command`]s and applied one at a time.
pub struct PopupController<W: Write> {
    state: AppState,
    effects: EffectRunner,
    commands: mpsc::Receiver<Command>,
    out: W,
}

impl<W: Write> PopupController<W> {
    pub fn new(
        tab_source: Arc<dyn TabSource>,
        client: Arc<dyn EnrichmentClient>,
        out: W,
    ) -> io::Result<(Self, mpsc::Sender<Command>)> {
        let (tx, rx) = mpsc::channel();
        let controller = Self {
            state: AppState::new(),
            effects: EffectRunner::new(tab_source, client, tx.clone())?,
            commands: rx,
            out,
        };
        Ok((controller, tx))
    }

    pub fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.effects.run(effects);
        if was_dirty {
            self.render(&view)?;
        }
        Ok(())
    }

    /// Processes queued commands while a run is in flight.
    pub fn run_until_settled(&mut self) -> io::Result<Phase> {
        while self.state.phase().is_busy() {
            match self.commands.recv() {
                Ok(Command::Dispatch(msg)) => self.dispatch_msg(msg)?,
                Ok(Command::Show) => self.render_current()?,
                Ok(Command::Notice(message)) => self.print_line(&message)?,
                Ok(Command::Quit) | Err(_) => break,
            }
        }
        Ok(self.state.phase())
    }

    pub fn run_interactive(&mut self) -> io::Result<()> {
        while let Ok(command) = self.commands.recv() {
            match command {
                Command::Dispatch(msg) => self.dispatch_msg(msg)?,
                Command::Show => self.render_current()?,
                Command::Notice(message) => self.print_line(&message)?,
                Command::Quit => break,
            }
        }
        Ok(())
    }

    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    fn render_current(&mut self) -> io::Result<()> {
        let view = self.state.view();
        self.render(&view)
    }

    fn render(&mut self, view: &PanelViewModel) -> io::Result<()> {
        for line in ui::render::render(view, self.effects.charts()) {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    #[cfg(test)]
    fn live_charts(&self) -> usize {
        self.effects.charts().live_count()
    }
}
