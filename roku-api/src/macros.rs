//! Declarative macros over the ECP key table
//!
//! The key table is written once here and expanded twice: into the [`Key`]
//! enum (see `keys.rs`) and into one chainable method per key on
//! [`Commander`] (see `commander.rs`).
//!
//! [`Key`]: crate::Key
//! [`Commander`]: crate::Commander

/// Invoke `$callback!` with every ECP key as `(Variant, method_name, "WireToken")`.
///
/// # Example
/// ```rust,ignore
/// macro_rules! count_keys {
///     ($(($variant:ident, $method:ident, $token:literal)),* $(,)?) => {
///         [$(stringify!($variant)),*].len()
///     };
/// }
/// let n = for_each_key!(count_keys);
/// ```
macro_rules! for_each_key {
    ($callback:ident) => {
        $callback! {
            (Home, home, "Home"),
            (Rev, rev, "Rev"),
            (Fwd, fwd, "Fwd"),
            (Play, play, "Play"),
            (Select, select, "Select"),
            (Left, left, "Left"),
            (Right, right, "Right"),
            (Down, down, "Down"),
            (Up, up, "Up"),
            (Back, back, "Back"),
            (InstantReplay, instant_replay, "InstantReplay"),
            (Info, info, "Info"),
            (Backspace, backspace, "Backspace"),
            (Search, search, "Search"),
            (Enter, enter, "Enter"),
            (FindRemote, find_remote, "FindRemote"),
            (VolumeDown, volume_down, "VolumeDown"),
            (VolumeMute, volume_mute, "VolumeMute"),
            (VolumeUp, volume_up, "VolumeUp"),
            (PowerOff, power_off, "PowerOff"),
            (PowerOn, power_on, "PowerOn"),
            (ChannelUp, channel_up, "ChannelUp"),
            (ChannelDown, channel_down, "ChannelDown"),
            (InputTuner, input_tuner, "InputTuner"),
            (InputHdmi1, input_hdmi1, "InputHDMI1"),
            (InputHdmi2, input_hdmi2, "InputHDMI2"),
            (InputHdmi3, input_hdmi3, "InputHDMI3"),
            (InputHdmi4, input_hdmi4, "InputHDMI4"),
            (InputAv1, input_av1, "InputAV1"),
        }
    };
}
