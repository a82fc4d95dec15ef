//! Display state of the record list.

use std::fmt;

/// What the record list should currently show.
///
/// Exactly one value is current at a time. The next value depends only on the
/// inputs of the operation that produced it, never on the previous value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    /// A fetch is in progress.
    #[default]
    Refreshing,
    /// All records shown, unfiltered.
    ShowAll,
    /// Filter panel open with no keyword yet.
    Hide,
    /// The keyword matched at least one record.
    Found,
    /// The keyword matched nothing.
    NotFound(String),
    /// The last refresh found no connectivity.
    NoNetwork,
    /// The last fetch exceeded its time budget.
    Timeout,
    /// The last fetch failed for another reason; carries a user-facing message.
    Failed(String),
}

impl ListState {
    /// Decide the state for a filter interaction.
    ///
    /// | expanded | keyword empty | item_count | state |
    /// |----------|---------------|------------|-------|
    /// | false    | -             | -          | ShowAll |
    /// | true     | yes           | -          | Hide |
    /// | true     | no            | 0          | NotFound(keyword) |
    /// | true     | no            | > 0        | Found |
    pub fn for_filter(expanded: bool, item_count: usize, keyword: &str) -> ListState {
        if !expanded {
            ListState::ShowAll
        } else if keyword.is_empty() {
            ListState::Hide
        } else if item_count == 0 {
            ListState::NotFound(keyword.to_string())
        } else {
            ListState::Found
        }
    }

    /// Whether this state reports a failed refresh.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ListState::NoNetwork | ListState::Timeout | ListState::Failed(_)
        )
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ListState::Refreshing => "refreshing",
            ListState::ShowAll => "show_all",
            ListState::Hide => "hide",
            ListState::Found => "found",
            ListState::NotFound(_) => "not_found",
            ListState::NoNetwork => "no_network",
            ListState::Timeout => "timeout",
            ListState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for ListState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListState::NotFound(keyword) => write!(f, "not_found({})", keyword),
            ListState::Failed(message) => write!(f, "failed({})", message),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_always_show_all() {
        for count in [0, 1, 5, 1000] {
            for keyword in ["", "smog", " "] {
                assert_eq!(ListState::for_filter(false, count, keyword), ListState::ShowAll);
            }
        }
    }

    #[test]
    fn test_expanded_empty_keyword_hides() {
        assert_eq!(ListState::for_filter(true, 0, ""), ListState::Hide);
        assert_eq!(ListState::for_filter(true, 7, ""), ListState::Hide);
    }

    #[test]
    fn test_expanded_keyword_without_matches() {
        assert_eq!(
            ListState::for_filter(true, 0, "smog"),
            ListState::NotFound("smog".to_string())
        );
    }

    #[test]
    fn test_expanded_keyword_with_matches() {
        assert_eq!(ListState::for_filter(true, 5, "smog"), ListState::Found);
        assert_eq!(ListState::for_filter(true, 1, "smog"), ListState::Found);
    }

    #[test]
    fn test_whitespace_keyword_is_not_empty() {
        assert_eq!(
            ListState::for_filter(true, 0, " "),
            ListState::NotFound(" ".to_string())
        );
    }

    #[test]
    fn test_default_is_refreshing() {
        assert_eq!(ListState::default(), ListState::Refreshing);
    }

    #[test]
    fn test_is_error() {
        assert!(ListState::NoNetwork.is_error());
        assert!(ListState::Timeout.is_error());
        assert!(ListState::Failed("x".to_string()).is_error());
        assert!(!ListState::ShowAll.is_error());
        assert!(!ListState::NotFound("x".to_string()).is_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(ListState::ShowAll.to_string(), "show_all");
        assert_eq!(
            ListState::NotFound("pm10".to_string()).to_string(),
            "not_found(pm10)"
        );
    }
}
