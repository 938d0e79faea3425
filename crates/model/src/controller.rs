use uuid::Uuid;

use crate::graph::NodeId;
use crate::midi::MidiMessage;

/// How an incoming value is compared against a control's toggle value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlToggleMode {
    #[default]
    EqualsOrHigher,
    Equals,
}

impl ControlToggleMode {
    /// Unknown strings fall back to `EqualsOrHigher`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "eq" => ControlToggleMode::Equals,
            _ => ControlToggleMode::EqualsOrHigher,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlToggleMode::EqualsOrHigher => "eqorhi",
            ControlToggleMode::Equals => "eq",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventType {
    Note,
    #[default]
    Controller,
}

impl EventType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "note" => Some(EventType::Note),
            "controller" => Some(EventType::Controller),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Note => "note",
            EventType::Controller => "controller",
        }
    }
}

/// One mapping from a MIDI note or controller event to a toggle.
///
/// `device` is the uuid of the owning [`ControllerDevice`]. It is a plain id,
/// written by [`ControllerDevice::add_control`]; resolve it through
/// [`crate::Session::controller_for`].
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub uuid: Uuid,
    pub name: String,
    device: Uuid,
    pub event_type: EventType,
    pub event_id: u8,
    /// 0 means any channel
    pub midi_channel: u8,
    pub toggle_value: i32,
    pub inverse_toggle: bool,
    pub toggle_mode: ControlToggleMode,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: "Control".to_string(),
            device: Uuid::nil(),
            event_type: EventType::Controller,
            event_id: 0,
            midi_channel: 0,
            toggle_value: 64,
            inverse_toggle: false,
            toggle_mode: ControlToggleMode::EqualsOrHigher,
        }
    }
}

impl Control {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn device_id(&self) -> Uuid {
        self.device
    }

    pub fn is_note_event(&self) -> bool {
        self.event_type == EventType::Note
    }

    pub fn is_controller_event(&self) -> bool {
        self.event_type == EventType::Controller
    }

    /// A representative message for this control, on channel 1 with value 64.
    pub fn midi_message(&self) -> MidiMessage {
        match self.event_type {
            EventType::Note => MidiMessage::note_on(1, self.event_id, 64),
            EventType::Controller => MidiMessage::controller_event(1, self.event_id, 64),
        }
    }

    pub fn matches(&self, message: &MidiMessage) -> bool {
        let number = match self.event_type {
            EventType::Note => message.note_number(),
            EventType::Controller => message.controller_number(),
        };
        if number != Some(self.event_id) {
            return false;
        }
        self.midi_channel == 0 || message.channel() == Some(self.midi_channel)
    }

    /// Whether `value` switches this control on.
    pub fn toggle_state(&self, value: i32) -> bool {
        let on = match self.toggle_mode {
            ControlToggleMode::Equals => value == self.toggle_value,
            ControlToggleMode::EqualsOrHigher => value >= self.toggle_value,
        };
        on != self.inverse_toggle
    }
}

/// An external control surface and its mapped controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerDevice {
    pub uuid: Uuid,
    pub name: String,
    pub input_device: String,
    controls: Vec<Control>,
}

impl ControllerDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_uuid(Uuid::new_v4(), name)
    }

    pub fn with_uuid(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            input_device: String::new(),
            controls: Vec::new(),
        }
    }

    /// Takes ownership of `control` and points it back at this device.
    pub fn add_control(&mut self, mut control: Control) -> Uuid {
        control.device = self.uuid;
        let uuid = control.uuid;
        self.controls.push(control);
        uuid
    }

    pub fn remove_control(&mut self, uuid: Uuid) -> Option<Control> {
        let index = self.index_of(uuid)?;
        let mut control = self.controls.remove(index);
        control.device = Uuid::nil();
        Some(control)
    }

    pub fn control(&self, index: usize) -> Option<&Control> {
        self.controls.get(index)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn index_of(&self, uuid: Uuid) -> Option<usize> {
        self.controls.iter().position(|c| c.uuid == uuid)
    }

    pub fn find_control_by_id(&self, uuid: Uuid) -> Option<&Control> {
        self.controls.iter().find(|c| c.uuid == uuid)
    }

    /// Controls responding to `message`, in device order.
    pub fn controls_matching<'a>(
        &'a self,
        message: &'a MidiMessage,
    ) -> impl Iterator<Item = &'a Control> + 'a {
        self.controls.iter().filter(move |c| c.matches(message))
    }
}

/// Binds a device control to a node parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerMap {
    pub controller: Uuid,
    pub control: Uuid,
    pub node: NodeId,
    /// -1 when not bound to a parameter
    pub parameter: i32,
}

impl ControllerMap {
    pub fn new(controller: Uuid, control: Uuid, node: NodeId, parameter: i32) -> Self {
        Self {
            controller,
            control,
            node,
            parameter,
        }
    }

    pub fn parameter_index(&self) -> Option<usize> {
        usize::try_from(self.parameter).ok()
    }

    pub fn is_valid(&self) -> bool {
        !self.controller.is_nil() && !self.control.is_nil() && self.parameter_index().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_defaults() {
        let control = Control::default();
        assert_eq!(control.name, "Control");
        assert!(control.is_controller_event());
        assert_eq!(control.event_id, 0);
        assert_eq!(control.midi_channel, 0);
        assert_eq!(control.toggle_value, 64);
        assert!(!control.inverse_toggle);
        assert_eq!(control.toggle_mode, ControlToggleMode::EqualsOrHigher);
        assert!(control.device_id().is_nil());
    }

    #[test]
    fn test_toggle_mode_names() {
        assert_eq!(ControlToggleMode::from_name("eq"), ControlToggleMode::Equals);
        assert_eq!(
            ControlToggleMode::from_name("eqorhi"),
            ControlToggleMode::EqualsOrHigher
        );
        assert_eq!(
            ControlToggleMode::from_name("bogus"),
            ControlToggleMode::EqualsOrHigher
        );
        assert_eq!(ControlToggleMode::Equals.as_str(), "eq");
    }

    #[test]
    fn test_add_control_sets_back_reference() {
        let mut device = ControllerDevice::new("Launch Control");
        let uuid = device.add_control(Control::new("Knob 1"));
        let control = device.find_control_by_id(uuid).expect("control");
        assert_eq!(control.device_id(), device.uuid);
        assert_eq!(device.index_of(uuid), Some(0));

        let removed = device.remove_control(uuid).expect("removed");
        assert!(removed.device_id().is_nil());
        assert!(device.is_empty());
    }

    #[test]
    fn test_midi_message_for_event_type() {
        let mut control = Control::new("Pad");
        control.event_type = EventType::Note;
        control.event_id = 36;
        assert_eq!(control.midi_message(), MidiMessage::note_on(1, 36, 64));

        control.event_type = EventType::Controller;
        assert_eq!(
            control.midi_message(),
            MidiMessage::controller_event(1, 36, 64)
        );
    }

    #[test]
    fn test_matches_respects_channel() {
        let mut control = Control::new("Fader");
        control.event_id = 7;
        assert!(control.matches(&MidiMessage::controller_event(5, 7, 100)));
        assert!(!control.matches(&MidiMessage::controller_event(5, 8, 100)));
        assert!(!control.matches(&MidiMessage::note_on(5, 7, 100)));

        control.midi_channel = 2;
        assert!(control.matches(&MidiMessage::controller_event(2, 7, 0)));
        assert!(!control.matches(&MidiMessage::controller_event(3, 7, 0)));
    }

    #[test]
    fn test_toggle_state() {
        let mut control = Control::new("Button");
        assert!(control.toggle_state(64));
        assert!(control.toggle_state(127));
        assert!(!control.toggle_state(63));

        control.toggle_mode = ControlToggleMode::Equals;
        assert!(control.toggle_state(64));
        assert!(!control.toggle_state(127));

        control.inverse_toggle = true;
        assert!(!control.toggle_state(64));
        assert!(control.toggle_state(0));
    }

    #[test]
    fn test_controls_matching() {
        let mut device = ControllerDevice::new("Pads");
        for note in [36, 37, 36] {
            let mut control = Control::new(format!("Pad {note}"));
            control.event_type = EventType::Note;
            control.event_id = note;
            device.add_control(control);
        }
        let msg = MidiMessage::note_on(10, 36, 90);
        assert_eq!(device.controls_matching(&msg).count(), 2);
    }

    #[test]
    fn test_controller_map_validity() {
        let map = ControllerMap::new(Uuid::new_v4(), Uuid::new_v4(), NodeId(1), -1);
        assert_eq!(map.parameter_index(), None);
        assert!(!map.is_valid());

        let map = ControllerMap::new(Uuid::new_v4(), Uuid::new_v4(), NodeId(1), 3);
        assert_eq!(map.parameter_index(), Some(3));
        assert!(map.is_valid());
    }
}
