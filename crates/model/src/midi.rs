/// A short MIDI channel message. Channels are 1-based (1..=16).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    Controller { channel: u8, controller: u8, value: u8 },
    Other(Vec<u8>),
}

impl MidiMessage {
    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        MidiMessage::NoteOn {
            channel: clamp_channel(channel),
            note: note & 0x7f,
            velocity: velocity & 0x7f,
        }
    }

    pub fn controller_event(channel: u8, controller: u8, value: u8) -> Self {
        MidiMessage::Controller {
            channel: clamp_channel(channel),
            controller: controller & 0x7f,
            value: value & 0x7f,
        }
    }

    /// Decode raw bytes. Returns `None` for an empty buffer.
    ///
    /// A note-on with zero velocity decodes as a note-off. Truncated channel
    /// messages and anything that is not a note or controller event decode
    /// as [`MidiMessage::Other`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let status = *bytes.first()?;
        let channel = (status & 0x0f) + 1;

        let msg = match (status & 0xf0, bytes.get(1), bytes.get(2)) {
            (0x90, Some(&note), Some(&0)) => MidiMessage::NoteOff {
                channel,
                note,
                velocity: 0,
            },
            (0x90, Some(&note), Some(&velocity)) => MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            },
            (0x80, Some(&note), Some(&velocity)) => MidiMessage::NoteOff {
                channel,
                note,
                velocity,
            },
            (0xb0, Some(&controller), Some(&value)) => MidiMessage::Controller {
                channel,
                controller,
                value,
            },
            _ => MidiMessage::Other(bytes.to_vec()),
        };

        Some(msg)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => vec![0x90 | channel_bits(*channel), *note, *velocity],
            MidiMessage::NoteOff {
                channel,
                note,
                velocity,
            } => vec![0x80 | channel_bits(*channel), *note, *velocity],
            MidiMessage::Controller {
                channel,
                controller,
                value,
            } => vec![0xb0 | channel_bits(*channel), *controller, *value],
            MidiMessage::Other(bytes) => bytes.clone(),
        }
    }

    pub fn is_note_on_or_off(&self) -> bool {
        matches!(self, MidiMessage::NoteOn { .. } | MidiMessage::NoteOff { .. })
    }

    pub fn is_controller(&self) -> bool {
        matches!(self, MidiMessage::Controller { .. })
    }

    pub fn channel(&self) -> Option<u8> {
        match self {
            MidiMessage::NoteOn { channel, .. }
            | MidiMessage::NoteOff { channel, .. }
            | MidiMessage::Controller { channel, .. } => Some(*channel),
            MidiMessage::Other(_) => None,
        }
    }

    pub fn note_number(&self) -> Option<u8> {
        match self {
            MidiMessage::NoteOn { note, .. } | MidiMessage::NoteOff { note, .. } => Some(*note),
            _ => None,
        }
    }

    pub fn controller_number(&self) -> Option<u8> {
        match self {
            MidiMessage::Controller { controller, .. } => Some(*controller),
            _ => None,
        }
    }

    /// Velocity for note events, value for controller events.
    pub fn value(&self) -> Option<u8> {
        match self {
            MidiMessage::NoteOn { velocity, .. } | MidiMessage::NoteOff { velocity, .. } => {
                Some(*velocity)
            }
            MidiMessage::Controller { value, .. } => Some(*value),
            MidiMessage::Other(_) => None,
        }
    }
}

fn clamp_channel(channel: u8) -> u8 {
    channel.clamp(1, 16)
}

fn channel_bits(channel: u8) -> u8 {
    clamp_channel(channel) - 1
}
