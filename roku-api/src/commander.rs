//! Chainable remote-control scripts
//!
//! A [`Commander`] records an ordered plan of key presses, text entry and
//! pauses without touching the network, then replays it with [`Commander::send`].

use std::fmt;
use std::thread;
use std::time::Duration;

use ecp_client::Transport;
use tracing::debug;

use crate::client::RokuClient;
use crate::error::{ApiError, Result};
use crate::keys::{Key, KeyInput};

/// One recorded step of a command chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press `input` `times` times in a row
    Key { input: KeyInput, times: u32 },
    /// Type a string character by character
    Text(String),
    /// Pause before the next step
    Wait(Duration),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Key { input, times } => write!(f, "keypress {} x{}", input, times),
            Command::Text(text) => write!(f, "text {:?}", text),
            Command::Wait(duration) => write!(f, "wait {:?}", duration),
        }
    }
}

/// Builder for a sequence of remote-control commands
///
/// ```rust,ignore
/// client
///     .command()
///     .home()
///     .wait(Duration::from_secs(2))
///     .down_times(3)
///     .select()
///     .text("stranger things")
///     .send()?;
/// ```
#[derive(Debug)]
#[must_use = "a command chain does nothing until `send` is called"]
pub struct Commander<'a, T: Transport> {
    client: &'a RokuClient<T>,
    commands: Vec<Command>,
}

impl<'a, T: Transport> Commander<'a, T> {
    pub(crate) fn new(client: &'a RokuClient<T>) -> Self {
        Self {
            client,
            commands: Vec::new(),
        }
    }

    /// Queue `times` presses of `input`. A count of zero is treated as one.
    pub fn key(mut self, input: impl Into<KeyInput>, times: u32) -> Self {
        self.commands.push(Command::Key {
            input: input.into(),
            times: times.max(1),
        });
        self
    }

    /// Queue a string to be typed
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.commands.push(Command::Text(text.into()));
        self
    }

    /// Queue a pause
    pub fn wait(mut self, duration: Duration) -> Self {
        self.commands.push(Command::Wait(duration));
        self
    }

    /// The recorded plan, in order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay the plan against the device, front to back.
    ///
    /// Stops at the first failure and reports the index of the failing step.
    /// Steps already sent are not undone. The plan is kept, so calling `send`
    /// again replays it in full.
    pub fn send(&self) -> Result<()> {
        debug!(steps = self.commands.len(), "Sending command chain");

        for (step, command) in self.commands.iter().enumerate() {
            self.run(command).map_err(|source| ApiError::Chain {
                step,
                command: command.to_string(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    fn run(&self, command: &Command) -> Result<()> {
        match command {
            Command::Key { input, times } => {
                for _ in 0..*times {
                    self.client.keypress(*input)?;
                }
                Ok(())
            }
            Command::Text(text) => self.client.send_text(text),
            Command::Wait(duration) => {
                thread::sleep(*duration);
                Ok(())
            }
        }
    }
}

macro_rules! key_methods {
    ($(($variant:ident, $method:ident, $token:literal)),* $(,)?) => {
        paste::paste! {
            impl<'a, T: Transport> Commander<'a, T> {
                $(
                    #[doc = concat!("Queue one `", $token, "` press")]
                    pub fn $method(self) -> Self {
                        self.key(Key::$variant, 1)
                    }

                    #[doc = concat!("Queue `times` `", $token, "` presses")]
                    pub fn [<$method _times>](self, times: u32) -> Self {
                        self.key(Key::$variant, times)
                    }
                )*
            }
        }
    };
}

for_each_key!(key_methods);
