//! Tick loop and process lifecycle.
//!
//! One synchronous loop drives frame acquisition, the engine tick, and
//! arbiter dispatch; the voice listener runs on its own thread and feeds
//! actions in through a channel drained between ticks.  The loop itself
//! is the single writer on the pointer sink and on all shared tick state,
//! so the two producers can never race.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use calloop::channel::{self, Event as ChannelEvent};
use calloop::EventLoop;
use tracing::{debug, info};

use crate::action::PointerSink;
use crate::arbiter::{ActionSource, CommandArbiter};
use crate::capture::{CaptureError, PoseSource};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::voice::{self, SpeechRecognizer};

/// Global flag set by SIGTERM/SIGINT handlers.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Install signal handlers for graceful shutdown (SIGTERM, SIGINT).
fn install_signal_handlers() {
    unsafe {
        libc::signal(libc::SIGTERM, signal_handler as libc::sighandler_t);
        libc::signal(libc::SIGINT, signal_handler as libc::sighandler_t);
    }
}

extern "C" fn signal_handler(_sig: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Loop state handed to calloop callbacks.
struct RuntimeState<S: PointerSink> {
    engine: Engine,
    arbiter: CommandArbiter<S>,
    voice_active: bool,
}

/// Run the engine until the pose source ends, a shutdown signal arrives,
/// or the exit timer fires.
///
/// Resources are released deterministically on every exit path: the
/// voice stop flag is raised and the channel sender dropped before
/// return, and the source/sink are owned values dropped on scope exit.
pub fn run<P, S>(
    config: EngineConfig,
    mut source: P,
    sink: S,
    recognizer: Option<Box<dyn SpeechRecognizer + Send>>,
    exit_after: Option<u64>,
) -> anyhow::Result<()>
where
    P: PoseSource,
    S: PointerSink + 'static,
{
    config
        .validate()
        .map_err(|reason| anyhow::anyhow!("invalid configuration: {}", reason))?;

    let mut event_loop: EventLoop<RuntimeState<S>> = EventLoop::try_new()?;
    let mut state = RuntimeState {
        engine: Engine::new(&config),
        arbiter: CommandArbiter::new(sink),
        voice_active: false,
    };

    // Voice channel: the listener thread owns the recognizer and sends
    // decoded actions here; the loop drains them between ticks.
    let voice_stop = Arc::new(AtomicBool::new(false));
    if let Some(recognizer) = recognizer {
        let (sender, channel) = channel::channel();
        event_loop
            .handle()
            .insert_source(channel, |event, _, state: &mut RuntimeState<S>| {
                match event {
                    ChannelEvent::Msg(action) => {
                        state.arbiter.submit(ActionSource::Voice, action);
                    }
                    ChannelEvent::Closed => {
                        debug!("voice channel closed");
                        state.voice_active = false;
                    }
                }
            })
            .map_err(|e| anyhow::anyhow!("failed to register voice channel: {}", e))?;
        voice::spawn_listener(recognizer, sender, voice_stop.clone(), config.scroll_step)?;
        state.voice_active = true;
    }

    install_signal_handlers();

    let start = Instant::now();
    let exit_duration = exit_after.map(Duration::from_secs);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    let mut was_moving = false;
    info!(
        "tick loop starting (poll interval: {}ms, voice: {})",
        config.poll_interval_ms,
        if state.voice_active { "on" } else { "off" },
    );

    loop {
        // Check global shutdown flag (set by signal handler)
        if SHUTDOWN_REQUESTED.load(Ordering::SeqCst) {
            info!("shutdown signal received, exiting");
            break;
        }

        // Exit timer for CI
        if let Some(dur) = exit_duration {
            if start.elapsed() >= dur {
                info!("exit timer fired after {}s", dur.as_secs());
                break;
            }
        }

        let frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(CaptureError::EndOfStream) => {
                info!("pose source ended, exiting");
                break;
            }
            Err(e) => return Err(anyhow::Error::new(e).context("pose source failure")),
        };

        let now_s = start.elapsed().as_secs_f64();
        let output = state.engine.tick(frame.as_ref(), now_s);
        if output.moving != was_moving {
            debug!(moving = output.moving, "cursor motion mode changed");
            was_moving = output.moving;
        }
        state.arbiter.begin_tick();
        for action in output.actions {
            state.arbiter.submit(ActionSource::Gesture, action);
        }

        // Drain voice actions (and pace the loop).
        event_loop.dispatch(Some(poll_interval), &mut state)?;
    }

    // The listener is not forcibly cancellable mid-listen; raising the
    // flag ends it before the next listen, and a daemon-style thread
    // never blocks process exit.
    voice_stop.store(true, Ordering::SeqCst);

    info!(
        dispatched = state.arbiter.dispatched(),
        cursor = ?state.engine.cursor(),
        "engine stopped"
    );
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────
