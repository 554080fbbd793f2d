//! Line commands of the OTP prompt

/// One line typed at the OTP prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Digits filling slots from the focused one
    Digits(String),
    /// Backspace on the focused slot
    Backspace,
    /// Empty line: Enter
    Submit,
    Resend,
    Status,
    /// Snapshot as JSON
    Json,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Submit,
        "<" => Command::Backspace,
        "resend" => Command::Resend,
        "status" => Command::Status,
        "json" => Command::Json,
        "quit" | "exit" => Command::Quit,
        digits if digits.chars().all(|c| c.is_ascii_digit()) => {
            Command::Digits(digits.to_string())
        }
        other => Command::Unknown(other.to_string()),
    }
}

pub const HELP: &str = "digits fill the code, '<' deletes, Enter verifies, \
                        'resend', 'status', 'json', 'quit'";
