//! Watch-mode commands read from stdin, one per line.

/// A parsed watch-mode command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Refresh,
    /// Open the filter panel with this keyword (may be empty).
    Search(String),
    /// Close the filter panel.
    Collapse,
    List,
    Quit,
    Help,
    /// Blank line, nothing to do.
    Empty,
    Unknown(String),
}

impl WatchCommand {
    pub fn parse(line: &str) -> WatchCommand {
        let line = line.trim();
        if let Some(keyword) = line.strip_prefix('/') {
            return WatchCommand::Search(keyword.trim().to_string());
        }
        match line {
            "" => WatchCommand::Empty,
            "r" | "refresh" => WatchCommand::Refresh,
            "x" | "close" => WatchCommand::Collapse,
            "l" | "list" => WatchCommand::List,
            "q" | "quit" | "exit" => WatchCommand::Quit,
            "h" | "?" | "help" => WatchCommand::Help,
            other => WatchCommand::Unknown(other.to_string()),
        }
    }
}
