//! Virtual FT-991A state machine
//!
//! Answers the CAT command subset the engine speaks, with the same reply
//! shapes the hardware produces. Commands arrive with the `;` terminator
//! already stripped; replies carry their own terminator.

use std::collections::{BTreeMap, BTreeSet};

use cat_wire::{freq, ident, memory, menu_table, OperatingMode};
use serde::{Deserialize, Serialize};

/// One programmed memory channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryChannel {
    /// Channel number, 1 through 124
    pub channel: u32,
    /// Tag text shown on the radio display
    pub tag: String,
    /// Stored frequency in Hz
    pub frequency_hz: u64,
    /// Stored operating mode
    pub mode: OperatingMode,
}

/// Configuration for creating a virtual rig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualRigConfig {
    /// Initial tuned frequency in Hz
    pub initial_frequency_hz: u64,
    /// Initial operating mode
    pub initial_mode: OperatingMode,
    /// Programmed memory channels
    pub channels: Vec<MemoryChannel>,
    /// Menu values keyed by three-digit code
    pub menus: BTreeMap<String, String>,
    /// Whether `TX` queries get a reply; disable to force the
    /// controller onto its fallback status sources
    pub tx_status_replies: bool,
    /// Whether `IF` queries get a reply
    pub info_replies: bool,
    /// Menu codes that never answer a query
    pub silent_menu_codes: Vec<String>,
}

impl Default for VirtualRigConfig {
    fn default() -> Self {
        Self {
            initial_frequency_hz: 14_250_000, // 20m
            initial_mode: OperatingMode::Usb,
            channels: Vec::new(),
            menus: BTreeMap::new(),
            tx_status_replies: true,
            info_replies: true,
            silent_menu_codes: Vec::new(),
        }
    }
}

/// Stored per-channel state inside the rig
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChannelData {
    tag: String,
    frequency_hz: u64,
    mode: OperatingMode,
}

/// Outcome of processing one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Complete reply frame including the terminator, if any
    pub reply: Option<String>,
    /// Whether tuning or transmit state changed
    pub state_changed: bool,
}

impl CommandOutcome {
    fn reply(text: String) -> Self {
        Self {
            reply: Some(text),
            state_changed: false,
        }
    }
}

/// A simulated FT-991A
///
/// The rig keeps a single tuned frequency shared between VFO and memory
/// tune, so leaving memory mode does not restore an earlier VFO setting.
#[derive(Debug)]
pub struct VirtualRig {
    frequency_hz: u64,
    mode: OperatingMode,
    memory_mode: bool,
    current_channel: u32,
    channels: BTreeMap<u32, ChannelData>,
    menus: BTreeMap<String, String>,
    transmit: bool,
    signal_raw: u16,
    power_raw: u16,
    tx_status_replies: bool,
    info_replies: bool,
    silent_menus: BTreeSet<String>,
    command_log: Vec<String>,
}

impl Default for VirtualRig {
    fn default() -> Self {
        Self::from_config(VirtualRigConfig::default())
    }
}

impl VirtualRig {
    /// Create a rig with default state and no programmed channels
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rig from configuration
    pub fn from_config(config: VirtualRigConfig) -> Self {
        let mut rig = Self {
            frequency_hz: freq::clip(config.initial_frequency_hz),
            mode: config.initial_mode,
            memory_mode: false,
            current_channel: memory::CHANNEL_MIN,
            channels: BTreeMap::new(),
            menus: config.menus,
            transmit: false,
            signal_raw: 0,
            power_raw: 0,
            tx_status_replies: config.tx_status_replies,
            info_replies: config.info_replies,
            silent_menus: config.silent_menu_codes.into_iter().collect(),
            command_log: Vec::new(),
        };
        for ch in config.channels {
            rig.program_channel(ch.channel, &ch.tag, ch.frequency_hz, ch.mode);
        }
        rig
    }

    /// Get the current tuned frequency in Hz
    pub fn frequency_hz(&self) -> u64 {
        self.frequency_hz
    }

    /// Set the tuned frequency, as if turned at the front panel
    pub fn set_frequency(&mut self, hz: u64) {
        self.frequency_hz = freq::clip(hz);
    }

    /// Get the current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Set the operating mode
    pub fn set_mode(&mut self, mode: OperatingMode) {
        self.mode = mode;
    }

    /// Whether the rig is in memory mode
    pub fn memory_mode(&self) -> bool {
        self.memory_mode
    }

    /// The selected memory channel number
    pub fn current_channel(&self) -> u32 {
        self.current_channel
    }

    /// Get the transmit state
    pub fn transmit(&self) -> bool {
        self.transmit
    }

    /// Key or unkey the transmitter
    pub fn set_transmit(&mut self, active: bool) {
        self.transmit = active;
    }

    /// Set the raw S-meter reading, 0 through 255
    pub fn set_signal_raw(&mut self, raw: u16) {
        self.signal_raw = raw;
    }

    /// Set the raw power meter reading, reported only while transmitting
    pub fn set_power_raw(&mut self, raw: u16) {
        self.power_raw = raw;
    }

    /// Program a memory channel; out-of-range channel numbers are ignored
    pub fn program_channel(&mut self, channel: u32, tag: &str, frequency_hz: u64, mode: OperatingMode) {
        if memory::in_range(channel) {
            self.channels.insert(
                channel,
                ChannelData {
                    tag: tag.to_string(),
                    frequency_hz: freq::clip(frequency_hz),
                    mode,
                },
            );
        }
    }

    /// Erase a memory channel
    pub fn clear_channel(&mut self, channel: u32) {
        self.channels.remove(&channel);
    }

    /// Get a stored menu value
    pub fn menu_value(&self, code: &str) -> Option<&str> {
        self.menus.get(code).map(String::as_str)
    }

    /// Store a menu value directly
    pub fn set_menu_value(&mut self, code: &str, value: &str) {
        self.menus.insert(code.to_string(), value.to_string());
    }

    /// Control whether `TX` queries are answered
    pub fn set_tx_status_replies(&mut self, enabled: bool) {
        self.tx_status_replies = enabled;
    }

    /// Control whether `IF` queries are answered
    pub fn set_info_replies(&mut self, enabled: bool) {
        self.info_replies = enabled;
    }

    /// Make one menu code stop answering queries
    pub fn silence_menu(&mut self, code: &str) {
        self.silent_menus.insert(code.to_string());
    }

    /// Drain the log of commands processed so far, oldest first
    pub fn take_command_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.command_log)
    }

    /// Process one terminator-stripped command and produce the rig's response
    pub fn handle_command(&mut self, cmd: &str) -> CommandOutcome {
        let cmd = cmd.trim();
        if !cmd.is_empty() {
            self.command_log.push(cmd.to_string());
        }
        match cmd {
            "" => CommandOutcome::default(),
            "FA" => CommandOutcome::reply(format!("FA{:011};", self.frequency_hz)),
            "MC" => CommandOutcome::reply(self.channel_reply()),
            "MD" => CommandOutcome::reply(format!("MD{};", self.mode.code())),
            "VM0" => self.leave_memory_mode(),
            "VM1" => self.enter_memory_mode(),
            // Clears a pending tag edit; no state the simulation tracks
            "MT0" => CommandOutcome::default(),
            "TX" => self.tx_reply(),
            "IF" => self.info_outcome(),
            "ID" => CommandOutcome::reply(format!("ID{};", ident::FT_991A)),
            _ => self.handle_with_args(cmd),
        }
    }

    fn handle_with_args(&mut self, cmd: &str) -> CommandOutcome {
        if let Some(digits) = cmd.strip_prefix("FA") {
            return self.set_frequency_text(digits);
        }
        if let Some(digits) = cmd.strip_prefix("MC") {
            return self.select_channel_text(digits);
        }
        if let Some(code) = cmd.strip_prefix("MD") {
            return self.set_mode_text(code);
        }
        if let Some(digits) = cmd.strip_prefix("MT") {
            return self.tag_reply(digits);
        }
        if let Some(digits) = cmd.strip_prefix("MR") {
            return self.contents_reply(digits);
        }
        if let Some(arg) = cmd.strip_prefix("RM") {
            return self.meter_reply(arg);
        }
        if let Some(rest) = cmd.strip_prefix("EX") {
            return self.menu_command(rest);
        }
        CommandOutcome::reply("?;".to_string())
    }

    fn set_frequency_text(&mut self, digits: &str) -> CommandOutcome {
        if digits.len() != freq::FREQ_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CommandOutcome::reply("?;".to_string());
        }
        match digits.parse::<u64>() {
            Ok(hz) if (freq::MIN_HZ..=freq::MAX_HZ).contains(&hz) => {
                let changed = self.frequency_hz != hz;
                self.frequency_hz = hz;
                CommandOutcome {
                    reply: None,
                    state_changed: changed,
                }
            }
            // Out-of-range settings are dropped, as the hardware does
            _ => CommandOutcome::default(),
        }
    }

    fn select_channel_text(&mut self, digits: &str) -> CommandOutcome {
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CommandOutcome::reply("?;".to_string());
        }
        let channel = match digits.parse::<u32>() {
            Ok(ch) => ch,
            Err(_) => return CommandOutcome::default(),
        };
        // Unprogrammed or out-of-range selections are silently refused;
        // a following MC query still reports the previous channel
        if !memory::in_range(channel) || !self.channels.contains_key(&channel) {
            return CommandOutcome::default();
        }
        let before = (self.current_channel, self.frequency_hz, self.mode);
        self.current_channel = channel;
        if self.memory_mode {
            self.load_channel(channel);
        }
        CommandOutcome {
            reply: None,
            state_changed: before != (self.current_channel, self.frequency_hz, self.mode),
        }
    }

    fn set_mode_text(&mut self, code: &str) -> CommandOutcome {
        match OperatingMode::from_code(code) {
            Some(mode) => {
                let changed = self.mode != mode;
                self.mode = mode;
                CommandOutcome {
                    reply: None,
                    state_changed: changed,
                }
            }
            None => CommandOutcome::reply("?;".to_string()),
        }
    }

    fn enter_memory_mode(&mut self) -> CommandOutcome {
        // With an empty bank the rig refuses to leave the VFO, and MC
        // queries keep reporting VFO operation
        if self.channels.is_empty() {
            return CommandOutcome::default();
        }
        let before = (self.memory_mode, self.frequency_hz, self.mode);
        self.memory_mode = true;
        self.load_channel(self.current_channel);
        CommandOutcome {
            reply: None,
            state_changed: before != (true, self.frequency_hz, self.mode),
        }
    }

    fn leave_memory_mode(&mut self) -> CommandOutcome {
        let changed = self.memory_mode;
        self.memory_mode = false;
        CommandOutcome {
            reply: None,
            state_changed: changed,
        }
    }

    fn load_channel(&mut self, channel: u32) {
        if let Some(data) = self.channels.get(&channel) {
            self.frequency_hz = data.frequency_hz;
            self.mode = data.mode;
        }
    }

    fn channel_reply(&self) -> String {
        if self.memory_mode {
            format!("MC{:03};", self.current_channel)
        } else {
            "MC000;".to_string()
        }
    }

    fn tag_reply(&self, digits: &str) -> CommandOutcome {
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CommandOutcome::reply("?;".to_string());
        }
        let channel: u32 = match digits.parse() {
            Ok(ch) => ch,
            Err(_) => return CommandOutcome::reply("?;".to_string()),
        };
        match self.channels.get(&channel) {
            Some(data) => CommandOutcome::reply(format!("MT{digits}{};", data.tag)),
            None => CommandOutcome::reply("?;".to_string()),
        }
    }

    fn contents_reply(&self, digits: &str) -> CommandOutcome {
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CommandOutcome::reply("?;".to_string());
        }
        let channel: u32 = match digits.parse() {
            Ok(ch) => ch,
            Err(_) => return CommandOutcome::reply("?;".to_string()),
        };
        match self.channels.get(&channel) {
            Some(data) => CommandOutcome::reply(format!(
                "MR{digits}{:011}+000000{}0;",
                data.frequency_hz,
                data.mode.code().chars().last().unwrap_or('1'),
            )),
            None => CommandOutcome::reply("?;".to_string()),
        }
    }

    fn meter_reply(&self, arg: &str) -> CommandOutcome {
        let raw = match arg {
            "1" => self.signal_raw,
            "5" if self.transmit => self.power_raw,
            "5" => 0,
            _ => return CommandOutcome::reply("?;".to_string()),
        };
        CommandOutcome::reply(format!("RM{arg}{:03};", raw.min(999)))
    }

    fn tx_reply(&self) -> CommandOutcome {
        if !self.tx_status_replies {
            return CommandOutcome::default();
        }
        let state = if self.transmit { '1' } else { '0' };
        CommandOutcome::reply(format!("TX{state};"))
    }

    fn info_outcome(&self) -> CommandOutcome {
        if !self.info_replies {
            return CommandOutcome::default();
        }
        CommandOutcome::reply(self.info_reply())
    }

    /// Full status reply; transmit state fills payload characters 27 through 31
    /// (counting after the `IF` echo), where controllers look for it
    fn info_reply(&self) -> String {
        let channel = if self.memory_mode {
            self.current_channel
        } else {
            0
        };
        let mode_char = self.mode.code().chars().last().unwrap_or('1');
        let vfo_char = if self.memory_mode { '1' } else { '0' };
        let tx_field = if self.transmit { "11111" } else { "00000" };
        format!(
            "IF{channel:03}{:011}+000000{mode_char}{vfo_char}0000{tx_field};",
            self.frequency_hz
        )
    }

    fn menu_command(&mut self, rest: &str) -> CommandOutcome {
        if rest.len() < 3 || !rest.as_bytes()[..3].iter().all(u8::is_ascii_digit) {
            return CommandOutcome::reply("?;".to_string());
        }
        let (code, value) = rest.split_at(3);
        if menu_table::describe(code).is_none() {
            return CommandOutcome::reply("?;".to_string());
        }
        if value.is_empty() {
            if self.silent_menus.contains(code) {
                return CommandOutcome::default();
            }
            let current = self.menus.get(code).map(String::as_str).unwrap_or("0");
            CommandOutcome::reply(format!("EX{code}{current};"))
        } else {
            self.menus.insert(code.to_string(), value.to_string());
            CommandOutcome::default()
        }
    }
}
