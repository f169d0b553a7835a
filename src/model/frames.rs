use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of physical frames in the simulated page table.
pub const FRAME_CAPACITY: usize = 4;

/// Contents of a page frame. The wire format uses `-1` for an empty frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageSlot {
    #[default]
    Empty,
    Page(u32),
}

impl PageSlot {
    pub fn page(self) -> Option<u32> {
        match self {
            PageSlot::Empty => None,
            PageSlot::Page(n) => Some(n),
        }
    }
}

impl fmt::Display for PageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSlot::Empty => f.write_str("-"),
            PageSlot::Page(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for PageSlot {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            PageSlot::Empty => s.serialize_i64(-1),
            PageSlot::Page(n) => s.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for PageSlot {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        let slot = match Option::<Raw>::deserialize(d)? {
            None => PageSlot::Empty,
            Some(Raw::Int(n)) if n < 0 => PageSlot::Empty,
            Some(Raw::Int(n)) => u32::try_from(n)
                .map(PageSlot::Page)
                .map_err(|_| serde::de::Error::custom(format!("page number {} out of range", n)))?,
            Some(Raw::Text(s)) => {
                let s = s.trim();
                if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("empty") {
                    PageSlot::Empty
                } else {
                    match s.parse::<i64>() {
                        Ok(n) if n < 0 => PageSlot::Empty,
                        Ok(n) => u32::try_from(n).map(PageSlot::Page).map_err(|_| {
                            serde::de::Error::custom(format!("page number {} out of range", n))
                        })?,
                        Err(_) => {
                            return Err(serde::de::Error::custom(format!(
                                "invalid page number {:?}",
                                s
                            )));
                        }
                    }
                }
            }
        };
        Ok(slot)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrame {
    pub frame_id: u32,
    #[serde(default)]
    pub page_number: PageSlot,
    #[serde(default)]
    pub occupied: bool,
}

impl PageFrame {
    pub fn empty(frame_id: u32) -> Self {
        Self {
            frame_id,
            page_number: PageSlot::Empty,
            occupied: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected 4 page frames, got {0}")]
pub struct FrameCountMismatch(pub usize);

/// The simulated physical page table. Always holds exactly
/// [`FRAME_CAPACITY`] frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameTable([PageFrame; FRAME_CAPACITY]);

impl FrameTable {
    /// A table of empty frames numbered `0..FRAME_CAPACITY`.
    pub fn seeded() -> Self {
        Self(std::array::from_fn(|i| PageFrame::empty(i as u32)))
    }

    pub fn frames(&self) -> &[PageFrame] {
        &self.0
    }

    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|f| f.occupied).count()
    }
}

impl Default for FrameTable {
    fn default() -> Self {
        Self::seeded()
    }
}

impl TryFrom<Vec<PageFrame>> for FrameTable {
    type Error = FrameCountMismatch;

    fn try_from(frames: Vec<PageFrame>) -> Result<Self, Self::Error> {
        let got = frames.len();
        <[PageFrame; FRAME_CAPACITY]>::try_from(frames)
            .map(Self)
            .map_err(|_| FrameCountMismatch(got))
    }
}

/// Opaque result of a remote page-replacement run, displayed verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplacementSummary {
    pub algorithm: String,
    pub page_faults: u64,
    pub page_hits: u64,
    pub hit_ratio: f64,
    pub reference_string: Option<String>,
}

#[cfg(test)]
#[path = "../tests/model/frames_tests.rs"]
mod tests;
