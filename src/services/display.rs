//! Clock face output

use tokio::sync::watch;
use tracing::{debug, warn};

/// Receives the formatted clock face (`MM:SS`)
pub trait DisplaySink: Send + Sync {
    fn show(&self, text: &str);
}

/// Publishes the clock face on a watch channel so the status endpoint can read it
#[derive(Debug)]
pub struct WatchDisplay {
    tx: watch::Sender<String>,
}

impl WatchDisplay {
    /// Create a display and the receiver that observes it
    pub fn new(initial: String) -> (Self, watch::Receiver<String>) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, rx)
    }
}

impl DisplaySink for WatchDisplay {
    fn show(&self, text: &str) {
        debug!("Display: {}", text);
        if let Err(e) = self.tx.send(text.to_string()) {
            warn!("Failed to publish display update: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{DisplaySink, WatchDisplay};

    #[test]
    fn receiver_sees_latest_face() {
        let (display, rx) = WatchDisplay::new("10:00".to_string());
        assert_eq!(*rx.borrow(), "10:00");

        display.show("09:59");
        display.show("09:58");
        assert_eq!(*rx.borrow(), "09:58");
    }
}
