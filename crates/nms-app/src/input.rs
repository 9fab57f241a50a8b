use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use flume::{Receiver, Sender, TrySendError};
use nms_core::traits::CancelGate;

/// How long the listener waits for an event before checking the gate is
/// still alive.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Pending key presses kept for the gate. One is enough to cancel.
const CHANNEL_CAPACITY: usize = 4;

/// Cancellation gate fed by the terminal input listener.
pub struct KeyGate {
    rx: Receiver<KeyEvent>,
}

impl KeyGate {
    /// Gate draining `rx`.
    #[must_use]
    pub fn new(rx: Receiver<KeyEvent>) -> Self {
        Self { rx }
    }
}

impl CancelGate for KeyGate {
    type Event = KeyEvent;

    fn poll(&mut self) -> Option<KeyEvent> {
        self.rx.try_recv().ok()
    }

    fn wait(&mut self) -> Option<KeyEvent> {
        self.rx.recv().ok()
    }
}

/// Start the input listener thread.
///
/// The thread forwards key presses to the returned gate and exits once the
/// gate is dropped, or on the first read error.
#[must_use]
pub fn spawn_listener() -> (KeyGate, JoinHandle<()>) {
    let (tx, rx) = flume::bounded(CHANNEL_CAPACITY);
    let handle = thread::spawn(move || listen(&tx));
    (KeyGate::new(rx), handle)
}

fn listen(tx: &Sender<KeyEvent>) {
    while !tx.is_disconnected() {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => {}
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if !forward(tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("input read failed: {e}");
                    break;
                }
            },
            Err(e) => {
                log::warn!("input poll failed: {e}");
                break;
            }
        }
    }
    log::debug!("input listener stopped");
}

/// Queue `key` for the gate. `false` once the gate is gone.
fn forward(tx: &Sender<KeyEvent>, key: KeyEvent) -> bool {
    match tx.try_send(key) {
        Ok(()) => true,
        Err(TrySendError::Full(dropped)) => {
            log::trace!("input queue full, dropping {dropped:?}");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn poll_never_blocks() {
        let (_tx, rx) = flume::bounded(1);
        let mut gate = KeyGate::new(rx);
        assert!(gate.poll().is_none());
    }

    #[test]
    fn forwarded_keys_reach_the_gate() {
        let (tx, rx) = flume::bounded(CHANNEL_CAPACITY);
        let mut gate = KeyGate::new(rx);
        assert!(forward(&tx, key('q')));
        assert_eq!(gate.poll().map(|k| k.code), Some(KeyCode::Char('q')));
        assert!(gate.poll().is_none());
    }

    #[test]
    fn full_queue_drops_extra_keys() {
        let (tx, rx) = flume::bounded(1);
        let mut gate = KeyGate::new(rx);
        assert!(forward(&tx, key('a')));
        assert!(forward(&tx, key('b')));
        assert_eq!(gate.poll().map(|k| k.code), Some(KeyCode::Char('a')));
        assert!(gate.poll().is_none());
    }

    #[test]
    fn forward_reports_dropped_gate() {
        let (tx, rx) = flume::bounded(1);
        drop(KeyGate::new(rx));
        assert!(!forward(&tx, key('x')));
    }

    #[test]
    fn wait_returns_none_once_listener_is_gone() {
        let (tx, rx) = flume::bounded::<KeyEvent>(1);
        let mut gate = KeyGate::new(rx);
        drop(tx);
        assert!(gate.wait().is_none());
    }

    #[test]
    fn wait_blocks_until_a_key_arrives() {
        let (tx, rx) = flume::bounded(1);
        let mut gate = KeyGate::new(rx);
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            forward(&tx, key('z'))
        });
        assert_eq!(gate.wait().map(|k| k.code), Some(KeyCode::Char('z')));
        assert!(sender.join().unwrap());
    }
}
