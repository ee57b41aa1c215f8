//! Console line commands
//!
//! Parsing stays dumb on purpose: numbers are numbers and paths are paths.
//! Semantic range checks (channel 1..=124, digit 0..=8) belong to the
//! engine, which is the single authority on what the rig accepts.

use std::path::PathBuf;

use cat_wire::OperatingMode;

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// `freq`: print the current frequency
    ShowFrequency,
    /// `up <digit>` / `dn <digit>`: nudge one frequency digit
    AdjustDigit { digit_index: usize, direction: i32 },
    /// `mem+` / `mem-`: step to the next programmed channel
    StepMemory { direction: i32 },
    /// `mem <ch>`: recall a channel directly
    Recall { channel: u32 },
    /// `mode <name>`: change the operating mode
    Mode(OperatingMode),
    /// `vm`: toggle between VFO and memory tuning
    ToggleVfoMemory,
    /// `apply <file>`: apply a JSON preset file
    Apply(PathBuf),
    /// `snapshot <file>`: write a JSON menu snapshot
    Snapshot(PathBuf),
    /// `raw <text>`: send a CAT command verbatim and print the reply
    Raw(String),
    /// `status`: print the rig state summary
    Status,
    /// `help`: print the command list
    Help,
    /// `quit`: shut down
    Quit,
}

/// Parse one console line
pub fn parse(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    match word {
        "freq" => Ok(ConsoleCommand::ShowFrequency),
        "up" => parse_digit(rest).map(|digit_index| ConsoleCommand::AdjustDigit {
            digit_index,
            direction: 1,
        }),
        "dn" | "down" => parse_digit(rest).map(|digit_index| ConsoleCommand::AdjustDigit {
            digit_index,
            direction: -1,
        }),
        "mem+" => Ok(ConsoleCommand::StepMemory { direction: 1 }),
        "mem-" => Ok(ConsoleCommand::StepMemory { direction: -1 }),
        "mem" => rest
            .parse::<u32>()
            .map(|channel| ConsoleCommand::Recall { channel })
            .map_err(|_| "usage: mem <channel>".to_string()),
        "mode" => OperatingMode::from_label(rest)
            .map(ConsoleCommand::Mode)
            .map_err(|e| e.to_string()),
        "vm" => Ok(ConsoleCommand::ToggleVfoMemory),
        "apply" => parse_path(rest, "apply").map(ConsoleCommand::Apply),
        "snapshot" => parse_path(rest, "snapshot").map(ConsoleCommand::Snapshot),
        "raw" => {
            if rest.is_empty() {
                Err("usage: raw <command>".to_string())
            } else {
                Ok(ConsoleCommand::Raw(rest.to_string()))
            }
        }
        "status" => Ok(ConsoleCommand::Status),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(format!("unknown command {:?}; try help", other)),
    }
}

fn parse_digit(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>()
        .map_err(|_| "usage: up <digit> / dn <digit>, where 0 is 100 MHz and 8 is 1 Hz".to_string())
}

fn parse_path(arg: &str, verb: &str) -> Result<PathBuf, String> {
    if arg.is_empty() {
        Err(format!("usage: {} <file.json>", verb))
    } else {
        Ok(PathBuf::from(arg))
    }
}
