//! Phone connectivity indicator.
//!
//! Tracks whether the paired phone is reachable and decides what the date band
//! shows for it. Losing the connection can raise a single haptic pulse; the
//! host decides how (or whether) to deliver it.

use log::info;

/// Text shown while the phone is connected.
pub const CONNECTED_INDICATOR: &str = "BT";

/// Haptic feedback the host should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alert {
    SinglePulse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectivityIndicator {
    connected: bool,
    notify_on_disconnect: bool,
}

/// Result of feeding a connectivity event to the indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityUpdate {
    /// The indicator text changed and the date band needs a redraw
    pub changed: bool,
    pub alert: Option<Alert>,
}

impl ConnectivityIndicator {
    pub fn new(connected: bool, notify_on_disconnect: bool) -> Self {
        Self {
            connected,
            notify_on_disconnect,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn text(&self) -> &'static str {
        if self.connected {
            CONNECTED_INDICATOR
        } else {
            ""
        }
    }

    /// Record the new state. Repeated events with the same state are no-ops.
    pub fn update(&mut self, connected: bool) -> ConnectivityUpdate {
        if connected == self.connected {
            return ConnectivityUpdate::default();
        }

        let was_connected = self.connected;
        self.connected = connected;
        info!(
            "phone {}",
            if connected { "connected" } else { "disconnected" }
        );

        ConnectivityUpdate {
            changed: true,
            alert: (was_connected && self.notify_on_disconnect).then_some(Alert::SinglePulse),
        }
    }
}
