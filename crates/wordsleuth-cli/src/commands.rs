/// Interactive scan control from stdin.
///
/// A dedicated thread reads lines and forwards recognised commands over a
/// channel that the event loop drains each tick. The thread blocks on stdin
/// for the life of the process.
use crossbeam_channel::Receiver;
use std::io::{self, BufRead};
use std::thread;
use tracing::warn;
use wordsleuth_core::scanner::ScanCommand;

/// Map one input line to a command. Case and surrounding blanks are ignored.
pub fn parse_command(line: &str) -> Option<ScanCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "p" | "pause" => Some(ScanCommand::Pause),
        "r" | "resume" => Some(ScanCommand::Resume),
        "s" | "stop" | "q" | "quit" => Some(ScanCommand::Stop),
        _ => None,
    }
}

pub fn spawn_stdin_reader() -> io::Result<Receiver<ScanCommand>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::Builder::new()
        .name("wordsleuth-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => warn!("Unknown command {:?} (use p, r, or s)", line.trim()),
                }
            }
        })?;
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms() {
        assert_eq!(parse_command("p"), Some(ScanCommand::Pause));
        assert_eq!(parse_command("pause"), Some(ScanCommand::Pause));
        assert_eq!(parse_command("r"), Some(ScanCommand::Resume));
        assert_eq!(parse_command("resume"), Some(ScanCommand::Resume));
        assert_eq!(parse_command("s"), Some(ScanCommand::Stop));
        assert_eq!(parse_command("quit"), Some(ScanCommand::Stop));
    }

    #[test]
    fn whitespace_and_case_ignored() {
        assert_eq!(parse_command("  PAUSE \r"), Some(ScanCommand::Pause));
    }

    #[test]
    fn unknown_input_is_none() {
        assert_eq!(parse_command("go"), None);
        assert_eq!(parse_command(""), None);
    }
}
