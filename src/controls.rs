//! Operator controls polled between frames.
//!
//! A [`ControlSource`] also receives every rendered frame, because a
//! HighGUI window only delivers key presses while it is being drawn.

use crate::{
    constants::{KEY_ESCAPE, KEY_POLL_DELAY_MS, KEY_QUIT, KEY_RESET},
    Result,
};
use log::{debug, info};
use opencv::{
    core::Mat,
    highgui::{self, WINDOW_NORMAL},
};
use std::sync::mpsc::{Receiver, TryRecvError};

/// Discrete command issued by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Stop the session
    Quit,
    /// Return the tracked extremes to zero
    Reset,
}

impl ControlSignal {
    /// Map a full `highgui::wait_key_ex` code to a signal
    ///
    /// Codes are compared exactly; special keys such as arrows report
    /// values whose low byte collides with letters.
    #[must_use]
    pub fn from_key(key: i32) -> Option<Self> {
        if key == KEY_ESCAPE || key == KEY_QUIT {
            Some(Self::Quit)
        } else if key == KEY_RESET {
            Some(Self::Reset)
        } else {
            None
        }
    }
}

/// Source of operator signals, polled once per completed frame
pub trait ControlSource {
    /// Present the rendered frame to the operator
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be displayed
    fn show(&mut self, _frame: &Mat) -> Result<()> {
        Ok(())
    }

    /// Non-blocking check for a pending signal
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input device fails
    fn poll(&mut self) -> Result<Option<ControlSignal>>;
}

impl<T: ControlSource + ?Sized> ControlSource for Box<T> {
    fn show(&mut self, frame: &Mat) -> Result<()> {
        (**self).show(frame)
    }

    fn poll(&mut self) -> Result<Option<ControlSignal>> {
        (**self).poll()
    }
}

/// Headless source that never signals
#[derive(Debug, Default)]
pub struct NoControls;

impl ControlSource for NoControls {
    fn poll(&mut self) -> Result<Option<ControlSignal>> {
        Ok(None)
    }
}

/// Signals delivered over a channel from another part of the program
pub struct ChannelControls {
    receiver: Receiver<ControlSignal>,
}

impl ChannelControls {
    /// Wrap the receiving end of a control channel
    #[must_use]
    pub fn new(receiver: Receiver<ControlSignal>) -> Self {
        Self { receiver }
    }
}

impl ControlSource for ChannelControls {
    fn poll(&mut self) -> Result<Option<ControlSignal>> {
        match self.receiver.try_recv() {
            Ok(signal) => Ok(Some(signal)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                debug!("Control channel closed, stopping");
                Ok(Some(ControlSignal::Quit))
            }
        }
    }
}

/// HighGUI window that displays frames and reads key presses
pub struct HighGuiWindow {
    name: String,
}

impl HighGuiWindow {
    /// Open a resizable window
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created
    pub fn new(name: &str) -> Result<Self> {
        info!("Opening window '{}'", name);
        highgui::named_window(name, WINDOW_NORMAL)?;
        Ok(Self {
            name: name.to_string(),
        })
    }
}

impl ControlSource for HighGuiWindow {
    fn show(&mut self, frame: &Mat) -> Result<()> {
        highgui::imshow(&self.name, frame)?;
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<ControlSignal>> {
        let key = highgui::wait_key_ex(KEY_POLL_DELAY_MS)?;
        Ok(ControlSignal::from_key(key))
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.name) {
            debug!("Failed to destroy window '{}': {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_key_mapping() {
        assert_eq!(ControlSignal::from_key(i32::from(b'q')), Some(ControlSignal::Quit));
        assert_eq!(ControlSignal::from_key(KEY_ESCAPE), Some(ControlSignal::Quit));
        assert_eq!(ControlSignal::from_key(i32::from(b'r')), Some(ControlSignal::Reset));
        assert_eq!(ControlSignal::from_key(i32::from(b'x')), None);
        assert_eq!(ControlSignal::from_key(-1), None);
    }

    #[test]
    fn test_special_keys_are_ignored() {
        // GTK arrow codes: Left 0xFF51, Up 0xFF52
        assert_eq!(ControlSignal::from_key(0xFF51), None);
        assert_eq!(ControlSignal::from_key(0xFF52), None);
        assert_eq!(ControlSignal::from_key(i32::from(b'Q')), None);
        assert_eq!(ControlSignal::from_key(i32::from(b'R')), None);
    }

    #[test]
    fn test_channel_controls() {
        let (sender, receiver) = mpsc::channel();
        let mut controls = ChannelControls::new(receiver);

        assert_eq!(controls.poll().unwrap(), None);

        sender.send(ControlSignal::Reset).unwrap();
        assert_eq!(controls.poll().unwrap(), Some(ControlSignal::Reset));
        assert_eq!(controls.poll().unwrap(), None);

        drop(sender);
        assert_eq!(controls.poll().unwrap(), Some(ControlSignal::Quit));
    }
}
