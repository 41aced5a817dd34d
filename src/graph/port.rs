use crate::id::PortId;
use serde::{Deserialize, Serialize};

/// Role of a port on its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortKind {
    Input,
    Output,
    /// Conditional exit, e.g. the `true`/`false` sides of an `if`.
    Branch,
    /// Entry into a nested body, e.g. the body of a loop.
    Body,
}

impl PortKind {
    /// Whether a connection may start at a port of this kind.
    pub fn is_source(self) -> bool {
        matches!(self, PortKind::Output | PortKind::Branch | PortKind::Body)
    }

    pub fn is_target(self) -> bool {
        matches!(self, PortKind::Input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortChannel {
    Control,
    Data,
    Flow,
}

impl PortChannel {
    /// Control and flow both carry execution order and may be wired together;
    /// data only connects to data.
    pub fn is_compatible_with(self, other: PortChannel) -> bool {
        match (self, other) {
            (PortChannel::Data, PortChannel::Data) => true,
            (PortChannel::Data, _) | (_, PortChannel::Data) => false,
            _ => true,
        }
    }
}

/// Preferred edge of the node a port is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Static shape of one connection point on a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicPortDefinition {
    pub id: PortId,
    pub name: String,
    pub kind: PortKind,
    pub channel: PortChannel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<PortSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl LogicPortDefinition {
    pub fn new(
        id: impl Into<PortId>,
        name: impl Into<String>,
        kind: PortKind,
        channel: PortChannel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            channel,
            value_type: None,
            side: None,
            order: None,
        }
    }

    pub fn input(id: impl Into<PortId>, name: impl Into<String>, channel: PortChannel) -> Self {
        Self::new(id, name, PortKind::Input, channel).on_side(PortSide::Left)
    }

    pub fn output(id: impl Into<PortId>, name: impl Into<String>, channel: PortChannel) -> Self {
        Self::new(id, name, PortKind::Output, channel).on_side(PortSide::Right)
    }

    pub fn branch(id: impl Into<PortId>, name: impl Into<String>) -> Self {
        Self::new(id, name, PortKind::Branch, PortChannel::Control).on_side(PortSide::Right)
    }

    pub fn body(id: impl Into<PortId>, name: impl Into<String>) -> Self {
        Self::new(id, name, PortKind::Body, PortChannel::Control).on_side(PortSide::Bottom)
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    pub fn on_side(mut self, side: PortSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn is_source(&self) -> bool {
        self.kind.is_source()
    }

    pub fn is_target(&self) -> bool {
        self.kind.is_target()
    }

    /// `None` and `"any"` accept every value type.
    pub fn accepts_value_type(&self, other: Option<&str>) -> bool {
        match (self.value_type.as_deref(), other) {
            (None, _) | (_, None) | (Some("any"), _) | (_, Some("any")) => true,
            (Some(a), Some(b)) => a == b,
        }
    }
}
