use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use enricher_core::{Language, Msg};
use enricher_logging::enricher_warn;

pub const HELP: &str = "commands: on | off | lang <en|es|fr|de|hi> | process | status | quit";

/// Everything the dispatch loop can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Show,
    /// Feedback for the user, printed by the dispatch loop.
    Notice(String),
    Quit,
}

/// Maps one line of user input to a command; blank lines map to nothing.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let command = match (verb.to_ascii_lowercase().as_str(), words.next()) {
        ("on", None) => Command::Dispatch(Msg::CaptureToggled(true)),
        ("off", None) => Command::Dispatch(Msg::CaptureToggled(false)),
        ("process" | "p", None) => Command::Dispatch(Msg::ProcessClicked),
        ("lang" | "language", Some(code)) => {
            let language = code.parse::<Language>().map_err(|err| err.to_string())?;
            Command::Dispatch(Msg::LanguageSelected(language))
        }
        ("status" | "show", None) => Command::Show,
        ("quit" | "exit" | "q", None) => Command::Quit,
        _ => return Err(format!("unrecognised input {line:?}; {HELP}")),
    };
    Ok(Some(command))
}

/// Forwards stdin commands until EOF, then asks the loop to quit.
pub fn spawn_stdin_reader(commands: mpsc::Sender<Command>) {
    thread::spawn(move || forward_commands(std::io::stdin().lock(), &commands));
}

/// Rejected lines become notices so the user sees them on the panel's output.
fn forward_commands(input: impl BufRead, commands: &mpsc::Sender<Command>) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                enricher_warn!("Rejected input {:?}", line);
                Command::Notice(message)
            }
        };
        if commands.send(command).is_err() {
            return;
        }
    }
    let _ = commands.send(Command::Quit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toggle_language_and_trigger() {
        assert_eq!(
            parse_command(" on "),
            Ok(Some(Command::Dispatch(Msg::CaptureToggled(true))))
        );
        assert_eq!(
            parse_command("LANG fr"),
            Ok(Some(Command::Dispatch(Msg::LanguageSelected(Language::Fr))))
        );
        assert_eq!(
            parse_command("process"),
            Ok(Some(Command::Dispatch(Msg::ProcessClicked)))
        );
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_command("lang klingon").is_err());
        assert!(parse_command("off now").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn rejected_lines_become_notices_and_eof_quits() {
        let (tx, rx) = mpsc::channel();
        forward_commands(std::io::Cursor::new("on\ndance\n\nquit\n"), &tx);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 4);
        assert_eq!(received[0], Command::Dispatch(Msg::CaptureToggled(true)));
        assert!(matches!(&received[1], Command::Notice(text) if text.contains("dance")));
        assert_eq!(received[2], Command::Quit);
        assert_eq!(received[3], Command::Quit);
    }
}
