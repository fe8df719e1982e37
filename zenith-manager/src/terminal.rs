//! Terminal renderer for dialog overlays.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use zenith_dialog::{ConfirmResponder, Overlay, OverlayHost};

/// The prompt a typed answer goes to. Taken by the first line read.
type Target = Arc<Mutex<Option<ConfirmResponder>>>;

/// Draws overlays on stderr and answers confirmations from stdin.
///
/// One reader task serves every prompt; a redraw only retargets it.
#[derive(Debug, Default)]
pub struct TerminalHost {
    presenting: bool,
    target: Target,
    reader: Option<JoinHandle<()>>,
}

impl TerminalHost {
    fn answer_with(&mut self, responder: ConfirmResponder) {
        *lock(&self.target) = Some(responder);
        if self.reader.as_ref().is_some_and(|r| !r.is_finished()) {
            return;
        }
        let input = BufReader::new(tokio::io::stdin());
        self.reader = Some(tokio::spawn(read_answers(input, self.target.clone())));
    }
}

impl OverlayHost for TerminalHost {
    fn present(&mut self, overlay: Overlay) {
        self.presenting = true;
        match overlay {
            Overlay::Loading => eprintln!("Loading..."),
            Overlay::Confirm { visuals, responder } => {
                eprintln!();
                eprintln!("{}", visuals.title);
                if let Some(content) = visuals.content.as_deref() {
                    eprintln!("{content}");
                }
                eprint!("[y] {} / [n] {}: ", visuals.confirm_text(), visuals.dismiss_text());
                let _ = std::io::stderr().flush();
                self.answer_with(responder);
            }
        }
    }

    fn clear(&mut self) {
        lock(&self.target).take();
        if std::mem::take(&mut self.presenting) {
            tracing::debug!("overlay cleared");
        }
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

/// Answer the current prompt with each line read.
///
/// Anything but yes dismisses. Lines typed with no prompt up are ignored.
/// End of input (or a read error) dismisses the prompt and stops.
async fn read_answers<R>(input: R, target: Target)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read answer: {}", e);
                None
            }
        };
        let responder = lock(&target).take();
        match (line, responder) {
            (Some(line), Some(responder)) if is_yes(&line) => responder.confirm(),
            (Some(_), Some(responder)) => responder.dismiss(),
            (Some(line), None) => tracing::debug!(line = %line, "no prompt up, ignoring input"),
            (None, responder) => {
                if let Some(responder) = responder {
                    responder.dismiss();
                }
                break;
            }
        }
    }
}

fn lock(target: &Target) -> std::sync::MutexGuard<'_, Option<ConfirmResponder>> {
    target.lock().unwrap_or_else(|e| e.into_inner())
}

fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
