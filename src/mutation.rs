//! Display mutations: one unit of work for one display sink.
//!
//! Mutations are plain data. They are produced by the [`Dispatcher`](crate::dispatch::Dispatcher),
//! carried across threads by the [`UpdateRelay`](crate::relay::UpdateRelay) and applied
//! exactly once on the UI thread.

use std::fmt;

/// Number of swerve modules on the robot.
pub const SWERVE_MODULES: u8 = 4;

/// Numeric field on a swerve module panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwerveChannel {
    Cancoder,
    Integrated,
    Velocity,
}

impl SwerveChannel {
    pub const ALL: [SwerveChannel; 3] = [
        SwerveChannel::Cancoder,
        SwerveChannel::Integrated,
        SwerveChannel::Velocity,
    ];

    /// Token used in broadcast keys (`"Mod 0 Cancoder"`).
    pub fn token(self) -> &'static str {
        match self {
            SwerveChannel::Cancoder => "Cancoder",
            SwerveChannel::Integrated => "Integrated",
            SwerveChannel::Velocity => "Velocity",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token)
    }
}

/// Component of the color sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorComponent {
    Red,
    Green,
    Blue,
    Proximity,
}

impl ColorComponent {
    /// Label prefix shown next to the component bar.
    pub fn label(self) -> &'static str {
        match self {
            ColorComponent::Red => "Red",
            ColorComponent::Green => "Green",
            ColorComponent::Blue => "Blue",
            ColorComponent::Proximity => "Prox",
        }
    }

    /// Upper bound of the bar widget for this component.
    pub fn bar_max(self) -> i64 {
        match self {
            ColorComponent::Proximity => 65535,
            _ => 255,
        }
    }
}

/// Identifies one display element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkId {
    ArmMode,
    ArmModeColor,
    ArmObject,
    ArmObjectColor,
    Position,
    /// Text label for one color component.
    ColorLabel(ColorComponent),
    /// Progress bar for one color component.
    ColorBar(ColorComponent),
    /// Block showing the combined RGB color.
    ColorComposite,
    /// One numeric field on one of the four swerve module panels.
    Swerve { module: u8, channel: SwerveChannel },
    /// "Not connected" banner.
    ConnectionStatus,
}

/// Named colors used by indicator blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Green,
    Cyan,
    Purple,
    Yellow,
    /// Fallback for any unmatched value.
    Neutral,
}

impl ColorToken {
    /// Material palette hex code.
    pub fn hex(self) -> &'static str {
        match self {
            ColorToken::Green => "#4caf50",
            ColorToken::Cyan => "#00bcd4",
            ColorToken::Purple => "#9c27b0",
            ColorToken::Yellow => "#fdd835",
            ColorToken::Neutral => "#fafafa",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            ColorToken::Green => [0x4c, 0xaf, 0x50],
            ColorToken::Cyan => [0x00, 0xbc, 0xd4],
            ColorToken::Purple => [0x9c, 0x27, 0xb0],
            ColorToken::Yellow => [0xfd, 0xd8, 0x35],
            ColorToken::Neutral => [0xfa, 0xfa, 0xfa],
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Operation applied to a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOp {
    SetText(String),
    SetColor(ColorToken),
    /// Composite color; components are passed through uncapped.
    SetRgb { r: f64, g: f64, b: f64 },
    SetNumeric(f64),
    SetVisible(bool),
}

/// Target sink plus the operation to apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMutation {
    pub target: SinkId,
    pub op: MutationOp,
}

impl DisplayMutation {
    pub fn new(target: SinkId, op: MutationOp) -> Self {
        Self { target, op }
    }

    pub fn text<S: Into<String>>(target: SinkId, text: S) -> Self {
        Self::new(target, MutationOp::SetText(text.into()))
    }

    pub fn color(target: SinkId, color: ColorToken) -> Self {
        Self::new(target, MutationOp::SetColor(color))
    }

    pub fn numeric(target: SinkId, value: f64) -> Self {
        Self::new(target, MutationOp::SetNumeric(value))
    }

    pub fn rgb(target: SinkId, r: f64, g: f64, b: f64) -> Self {
        Self::new(target, MutationOp::SetRgb { r, g, b })
    }

    pub fn visible(target: SinkId, visible: bool) -> Self {
        Self::new(target, MutationOp::SetVisible(visible))
    }
}
