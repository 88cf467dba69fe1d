//! Label and sign data handed to external renderers.
//!
//! Rendering (PDF/HTML/SVG layout, QR symbol encoding) happens outside this
//! workspace; these types carry the normalized fields a renderer needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{NamedColor, lookup_color};
use crate::error::ModelError;

/// Printable label layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    /// Four labels on a full page
    #[default]
    Page,
    /// Two-up luggage tag
    BagTag,
}

impl LabelKind {
    pub const ALL: [LabelKind; 2] = [LabelKind::Page, LabelKind::BagTag];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::BagTag => "bagtag",
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "page" => Ok(Self::Page),
            "bagtag" => Ok(Self::BagTag),
            _ => Err(ModelError::UnknownLabelKind(s.to_string())),
        }
    }
}

/// Everything printed on one box label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxLabelData {
    pub box_id: i64,
    pub room: String,
    pub color: String,
    pub user: String,
    pub found: String,
}

impl BoxLabelData {
    /// Box number zero-padded to four digits.
    pub fn box_number(&self) -> String {
        format!("{:04}", self.box_id)
    }

    /// Room name as printed (upper case).
    pub fn room_label(&self) -> String {
        self.room.to_uppercase()
    }

    /// Color name without spaces.
    pub fn color_name(&self) -> String {
        self.color.replace(' ', "")
    }

    /// Named color entry, if the stored color is still a known name.
    pub fn named_color(&self) -> Option<NamedColor> {
        lookup_color(&self.color).ok()
    }

    pub fn color_hex(&self) -> Option<String> {
        self.named_color().map(|c| c.hex())
    }

    /// Text encoded into the label's QR code.
    pub fn uri(&self) -> String {
        format!(
            "movingbox://{}/{}?room={},color={}",
            self.user,
            self.box_number(),
            self.room_label(),
            self.color_name()
        )
    }

    /// File name of the rendered label.
    pub fn pdf_basename(&self) -> String {
        format!("label_{}.pdf", self.box_number())
    }
}

/// Everything printed on a room destination sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSignData {
    pub room: String,
    pub color: String,
    pub title: String,
}

impl RoomSignData {
    pub fn room_label(&self) -> String {
        self.room.to_uppercase()
    }

    pub fn color_hex(&self) -> Option<String> {
        lookup_color(&self.color).ok().map(|c| c.hex())
    }

    pub fn pdf_basename(&self) -> String {
        format!("destsign_{}.pdf", self.room_label())
    }
}
