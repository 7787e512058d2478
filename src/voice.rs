//! Voice command channel — decodes utterances into pointer actions on a
//! background thread.
//!
//! Speech-to-text is an external collaborator behind [`SpeechRecognizer`];
//! its `listen` call may block for multiple seconds per utterance, so the
//! decoder runs on its own thread and hands actions to the tick loop over
//! a channel.  The thread is daemon-like: it must never stall the tick
//! loop or prevent process exit.

use std::fmt;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use calloop::channel::Sender;
use tracing::{debug, info, warn};

use crate::action::Action;

/// Backoff after a transient recognizer failure.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

// ── Recognizer seam ────────────────────────────────────────

/// Errors a speech recognizer can signal.  None of these escape the
/// voice channel: transients are retried, fatals disable the channel.
#[derive(Debug)]
pub enum VoiceError {
    /// Nothing intelligible in the captured segment; not an error.
    NoSpeech,
    /// A failure worth retrying after a short backoff.
    Transient(String),
    /// The recognizer is gone for good (device unavailable).
    Fatal(String),
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpeech => write!(f, "no speech recognized"),
            Self::Transient(reason) => write!(f, "transient recognizer error: {}", reason),
            Self::Fatal(reason) => write!(f, "recognizer unavailable: {}", reason),
        }
    }
}

impl std::error::Error for VoiceError {}

/// External speech-to-text collaborator.  `listen` blocks on the next
/// audio segment and returns a lowercase utterance.
pub trait SpeechRecognizer {
    fn listen(&mut self) -> Result<String, VoiceError>;
}

/// Recognizer that reads utterances as lines from stdin — the headless
/// stand-in for a microphone pipeline.
#[derive(Debug, Default)]
pub struct StdinRecognizer;

impl StdinRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechRecognizer for StdinRecognizer {
    fn listen(&mut self) -> Result<String, VoiceError> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => Err(VoiceError::Fatal("stdin closed".into())),
            Ok(_) => Ok(line.trim().to_lowercase()),
            Err(e) => Err(VoiceError::Transient(e.to_string())),
        }
    }
}

// ── Command vocabulary ─────────────────────────────────────

/// A decoded utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    /// Forward an action to the arbiter.
    Dispatch(Action),
    /// Terminate the voice channel (only — the engine keeps running).
    Stop,
}

/// Map an utterance to a command by case-insensitive substring matching.
/// Unrecognized phrases return `None` and are silently discarded.
///
/// Precedence matters: "right click" must not fall through to a plain
/// click, and "double" wins over the bare "click" it usually contains.
pub fn parse_command(utterance: &str, scroll_step: i32) -> Option<VoiceCommand> {
    let cmd = utterance.trim().to_lowercase();
    if cmd.is_empty() {
        return None;
    }
    if cmd.contains("right") && cmd.contains("click") {
        Some(VoiceCommand::Dispatch(Action::RightClick))
    } else if cmd.contains("double") {
        Some(VoiceCommand::Dispatch(Action::DoubleClick))
    } else if cmd.contains("click") || cmd.contains("left") {
        Some(VoiceCommand::Dispatch(Action::Click))
    } else if cmd.contains("scroll") && cmd.contains("up") {
        Some(VoiceCommand::Dispatch(Action::Scroll(scroll_step)))
    } else if cmd.contains("scroll") && cmd.contains("down") {
        Some(VoiceCommand::Dispatch(Action::Scroll(-scroll_step)))
    } else if cmd.contains("stop") || cmd.contains("exit mouse") {
        Some(VoiceCommand::Stop)
    } else {
        None
    }
}

// ── Listener ───────────────────────────────────────────────

/// Core listen loop, separated from the thread wrapper so the failure
/// policy is testable synchronously.  `dispatch` returns `false` when the
/// receiving side is gone, which also ends the loop.
fn listen_loop(
    recognizer: &mut dyn SpeechRecognizer,
    stop: &AtomicBool,
    scroll_step: i32,
    dispatch: &mut dyn FnMut(Action) -> bool,
) {
    while !stop.load(Ordering::SeqCst) {
        match recognizer.listen() {
            Ok(utterance) => {
                debug!(%utterance, "voice heard");
                match parse_command(&utterance, scroll_step) {
                    Some(VoiceCommand::Stop) => {
                        info!("voice stop phrase received, closing voice channel");
                        break;
                    }
                    Some(VoiceCommand::Dispatch(action)) => {
                        if !dispatch(action) {
                            break;
                        }
                    }
                    None => {}
                }
            }
            Err(VoiceError::NoSpeech) => {}
            Err(VoiceError::Transient(reason)) => {
                debug!(%reason, "transient recognizer error, retrying");
                thread::sleep(RETRY_BACKOFF);
            }
            Err(VoiceError::Fatal(reason)) => {
                // Logged once; gesture control continues unaffected.
                warn!(%reason, "voice recognizer unavailable, disabling voice channel");
                break;
            }
        }
    }
}

/// Spawn the voice listener thread.  Actions flow to the tick loop over
/// `sender`; raising `stop` ends the loop before the next listen.
pub fn spawn_listener(
    mut recognizer: Box<dyn SpeechRecognizer + Send>,
    sender: Sender<Action>,
    stop: Arc<AtomicBool>,
    scroll_step: i32,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("voice-listener".into())
        .spawn(move || {
            info!("voice listener ready (say: left click, right click, double click, scroll up, scroll down, stop)");
            listen_loop(recognizer.as_mut(), &stop, scroll_step, &mut |action| {
                sender.send(action).is_ok()
            });
            info!("voice listener exited");
        })
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Recognizer replaying a fixed script of results.
    struct ScriptedRecognizer {
        script: Vec<Result<String, VoiceError>>,
    }

    impl ScriptedRecognizer {
        fn new(mut script: Vec<Result<String, VoiceError>>) -> Self {
            script.reverse();
            Self { script }
        }
    }

    impl SpeechRecognizer for ScriptedRecognizer {
        fn listen(&mut self) -> Result<String, VoiceError> {
            self.script
                .pop()
                .unwrap_or(Err(VoiceError::Fatal("script exhausted".into())))
        }
    }

    fn run_script(script: Vec<Result<String, VoiceError>>) -> Vec<Action> {
        let mut recognizer = ScriptedRecognizer::new(script);
        let stop = AtomicBool::new(false);
        let mut actions = Vec::new();
        listen_loop(&mut recognizer, &stop, 500, &mut |action| {
            actions.push(action);
            true
        });
        actions
    }

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!(
            parse_command("left click", 500),
            Some(VoiceCommand::Dispatch(Action::Click)),
        );
        assert_eq!(
            parse_command("click", 500),
            Some(VoiceCommand::Dispatch(Action::Click)),
        );
        assert_eq!(
            parse_command("double click", 500),
            Some(VoiceCommand::Dispatch(Action::DoubleClick)),
        );
        assert_eq!(
            parse_command("right click", 500),
            Some(VoiceCommand::Dispatch(Action::RightClick)),
        );
        assert_eq!(
            parse_command("scroll up", 500),
            Some(VoiceCommand::Dispatch(Action::Scroll(500))),
        );
        assert_eq!(
            parse_command("scroll down", 500),
            Some(VoiceCommand::Dispatch(Action::Scroll(-500))),
        );
        assert_eq!(parse_command("stop", 500), Some(VoiceCommand::Stop));
        assert_eq!(parse_command("exit mouse", 500), Some(VoiceCommand::Stop));
    }

    #[test]
    fn test_parse_precedence() {
        // "right click" contains "click" but must stay a right click.
        assert_eq!(
            parse_command("please right click now", 500),
            Some(VoiceCommand::Dispatch(Action::RightClick)),
        );
        // "double click" contains "click" but must stay a double click.
        assert_eq!(
            parse_command("do a double click", 500),
            Some(VoiceCommand::Dispatch(Action::DoubleClick)),
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            parse_command("RIGHT Click", 500),
            Some(VoiceCommand::Dispatch(Action::RightClick)),
        );
    }

    #[test]
    fn test_parse_unrecognized_discarded() {
        assert_eq!(parse_command("open the browser", 500), None);
        assert_eq!(parse_command("", 500), None);
        assert_eq!(parse_command("   ", 500), None);
    }

    #[test]
    fn test_parse_scroll_step() {
        assert_eq!(
            parse_command("scroll up", 250),
            Some(VoiceCommand::Dispatch(Action::Scroll(250))),
        );
    }

    #[test]
    fn test_listen_loop_dispatches_and_ignores() {
        let actions = run_script(vec![
            Ok("left click".into()),
            Err(VoiceError::NoSpeech),
            Ok("what time is it".into()),
            Ok("scroll down".into()),
            Ok("stop".into()),
            // Never reached: the stop phrase ends the loop.
            Ok("click".into()),
        ]);
        assert_eq!(actions, vec![Action::Click, Action::Scroll(-500)]);
    }

    #[test]
    fn test_listen_loop_fatal_disables_channel() {
        let actions = run_script(vec![
            Ok("click".into()),
            Err(VoiceError::Fatal("no microphone".into())),
            Ok("click".into()),
        ]);
        assert_eq!(actions, vec![Action::Click]);
    }

    #[test]
    fn test_listen_loop_stop_flag() {
        let mut recognizer = ScriptedRecognizer::new(vec![Ok("click".into())]);
        let stop = AtomicBool::new(true);
        let mut actions = Vec::new();
        listen_loop(&mut recognizer, &stop, 500, &mut |action| {
            actions.push(action);
            true
        });
        assert!(actions.is_empty(), "pre-raised stop flag skips listening");
    }

    #[test]
    fn test_listen_loop_ends_when_receiver_gone() {
        let actions = run_once_then_refuse();
        assert_eq!(actions, vec![Action::Click]);
    }

    fn run_once_then_refuse() -> Vec<Action> {
        let mut recognizer = ScriptedRecognizer::new(vec![
            Ok("click".into()),
            Ok("click".into()),
            Ok("click".into()),
        ]);
        let stop = AtomicBool::new(false);
        let mut actions = Vec::new();
        let mut first = true;
        listen_loop(&mut recognizer, &stop, 500, &mut |action| {
            if first {
                first = false;
                actions.push(action);
                true
            } else {
                false
            }
        });
        actions
    }
}
