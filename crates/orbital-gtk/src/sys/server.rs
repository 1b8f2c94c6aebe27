use crate::events::AppEvent;
use async_channel::Sender;
use orbital::ControlCommand;
use orbital::control::{CommandError, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_client(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Parses one protocol line. Blank lines carry no command and get no reply.
fn parse_line(line: &str) -> Option<Result<ControlCommand, CommandError>> {
    (!line.trim().is_empty()).then(|| line.parse())
}

fn reply(result: &Result<ControlCommand, CommandError>) -> String {
    match result {
        Ok(_) => "ok\n".to_string(),
        Err(e) => format!("error: {}\n", e),
    }
}

async fn handle_client(mut stream: UnixStream, tx: Sender<AppEvent>) {
    let (reader, mut writer) = stream.split();
    let mut lines = BufReader::new(reader).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let Some(result) = parse_line(&line) else {
            continue;
        };
        match &result {
            Ok(command) => {
                if tx.send(AppEvent::Command(*command)).await.is_err() {
                    return;
                }
            }
            Err(e) => log::warn!("Rejected control command '{}': {}", line.trim(), e),
        }
        if writer.write_all(reply(&result).as_bytes()).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbital::Layer;

    #[test]
    fn test_line_replies() {
        let cases = vec![
            ("play", Some(Ok(ControlCommand::Play)), "ok\n"),
            ("show inner\r", Some(Ok(ControlCommand::Show(Layer::InnerCircle))), "ok\n"),
            (
                "jump",
                Some(Err(CommandError::UnknownVerb("jump".into()))),
                "error: unknown command 'jump'\n",
            ),
            (
                "hide",
                Some(Err(CommandError::MissingLayer("hide".into()))),
                "error: 'hide' needs a layer (lines, inner-circle, rotate-circle)\n",
            ),
        ];
        for (line, expected, text) in cases {
            let parsed = parse_line(line);
            assert_eq!(parsed, expected);
            assert_eq!(reply(&parsed.unwrap()), text);
        }
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        for line in ["", "   ", "\t"] {
            assert_eq!(parse_line(line), None);
        }
    }
}
