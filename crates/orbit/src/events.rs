use derive_more::Display;
use orbitcam::content::TopicId;

/// Requests coming from outside the GTK thread. `Display` gives the socket line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AppEvent {
    #[display("show")]
    Show,
    #[display("hide")]
    Hide,
    #[display("focus {_0}")]
    Focus(TopicId),
    #[display("unfocus")]
    Unfocus,
    #[display("reload")]
    ConfigReload,
}

impl AppEvent {
    pub fn parse_command(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let event = match (parts.next()?, parts.next()) {
            ("show", None) => Self::Show,
            ("hide", None) => Self::Hide,
            ("unfocus", None) => Self::Unfocus,
            ("reload", None) => Self::ConfigReload,
            ("focus", Some(id)) => Self::Focus(id.parse().ok()?),
            _ => return None,
        };
        parts.next().is_none().then_some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cases = vec![
            ("show", Some(AppEvent::Show)),
            ("  hide ", Some(AppEvent::Hide)),
            ("focus 3", Some(AppEvent::Focus(TopicId::new(3)))),
            ("unfocus", Some(AppEvent::Unfocus)),
            ("reload", Some(AppEvent::ConfigReload)),
            ("focus", None),
            ("focus x", None),
            ("focus 3 4", None),
            ("show now", None),
            ("", None),
        ];

        for (line, expected) in cases {
            assert_eq!(AppEvent::parse_command(line), expected, "line {line:?}");
        }
    }

    #[test]
    fn test_display_matches_wire_format() {
        for event in [
            AppEvent::Show,
            AppEvent::Focus(TopicId::new(12)),
            AppEvent::ConfigReload,
        ] {
            assert_eq!(AppEvent::parse_command(&event.to_string()), Some(event));
        }
    }
}
