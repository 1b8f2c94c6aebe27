use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/orbital.sock";

/// A toggleable part of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Layer {
    #[strum(to_string = "lines", serialize = "spokes")]
    Lines,
    #[strum(to_string = "inner-circle", serialize = "inner", serialize = "inner_circle")]
    InnerCircle,
    #[strum(to_string = "rotate-circle", serialize = "rotate", serialize = "rotate_circle")]
    RotateCircle,
}

/// One line of the control socket protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Play,
    Stop,
    Pause,
    Toggle,
    Show(Layer),
    Hide(Layer),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{0}' needs a layer (lines, inner-circle, rotate-circle)")]
    MissingLayer(String),
    #[error("unknown layer '{0}'")]
    UnknownLayer(String),
    #[error("unexpected argument '{0}'")]
    Trailing(String),
}

impl FromStr for ControlCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let mut layer = || {
            let word = words
                .next()
                .ok_or_else(|| CommandError::MissingLayer(verb.clone()))?;
            Layer::from_str(word).map_err(|_| CommandError::UnknownLayer(word.to_string()))
        };

        let command = match verb.as_str() {
            "play" => Self::Play,
            "stop" => Self::Stop,
            "pause" => Self::Pause,
            "toggle" => Self::Toggle,
            "show" => Self::Show(layer()?),
            "hide" => Self::Hide(layer()?),
            _ => return Err(CommandError::UnknownVerb(verb.clone())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => f.write_str("play"),
            Self::Stop => f.write_str("stop"),
            Self::Pause => f.write_str("pause"),
            Self::Toggle => f.write_str("toggle"),
            Self::Show(layer) => write!(f, "show {}", layer),
            Self::Hide(layer) => write!(f, "hide {}", layer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_layer_parsing() {
        let cases = vec![
            ("lines", Layer::Lines),
            ("Spokes", Layer::Lines),
            ("inner", Layer::InnerCircle),
            ("INNER-CIRCLE", Layer::InnerCircle),
            ("inner_circle", Layer::InnerCircle),
            ("rotate", Layer::RotateCircle),
            ("rotate-circle", Layer::RotateCircle),
        ];
        for (s, expected) in cases {
            assert_eq!(Layer::from_str(s).unwrap(), expected);
        }
    }

    #[test]
    fn test_command_parsing() {
        let cases = vec![
            ("play", ControlCommand::Play),
            ("  STOP  ", ControlCommand::Stop),
            ("pause", ControlCommand::Pause),
            ("toggle\n", ControlCommand::Toggle),
            ("show lines", ControlCommand::Show(Layer::Lines)),
            ("hide rotate", ControlCommand::Hide(Layer::RotateCircle)),
        ];
        for (s, expected) in cases {
            assert_eq!(s.parse::<ControlCommand>().unwrap(), expected);
        }
    }

    #[test]
    fn test_command_errors() {
        let cases = vec![
            ("", CommandError::Empty),
            ("jump", CommandError::UnknownVerb("jump".into())),
            ("show", CommandError::MissingLayer("show".into())),
            ("hide balls", CommandError::UnknownLayer("balls".into())),
            ("play now", CommandError::Trailing("now".into())),
        ];
        for (s, expected) in cases {
            assert_eq!(s.parse::<ControlCommand>().unwrap_err(), expected);
        }
    }

    #[test]
    fn test_command_display_parses_back() {
        let mut commands = vec![
            ControlCommand::Play,
            ControlCommand::Stop,
            ControlCommand::Pause,
            ControlCommand::Toggle,
        ];
        for layer in Layer::iter() {
            commands.push(ControlCommand::Show(layer));
            commands.push(ControlCommand::Hide(layer));
        }
        for command in commands {
            assert_eq!(command.to_string().parse::<ControlCommand>(), Ok(command));
        }
    }
}
