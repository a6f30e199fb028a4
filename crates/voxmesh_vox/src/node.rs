use crate::Dict;

use voxmesh_core::prelude::*;

/// An `nTRN` node: places its single child with one transform per animation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformNode {
    pub id: u32,
    pub attributes: Dict,
    pub child_id: u32,
    pub layer_id: i32,
    pub frames: Vec<TransformFrame>,
}

impl TransformNode {
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("_name").map(String::as_str)
    }

    pub fn is_hidden(&self) -> bool {
        is_hidden(&self.attributes)
    }

    /// The transform for `frame`, clamped to the frames this node has. Identity if it has none.
    pub fn transform(&self, frame: u32) -> Transform3 {
        if self.frames.is_empty() {
            return Transform3::IDENTITY;
        }
        let i = (frame as usize).min(self.frames.len() - 1);

        self.frames[i].transform
    }

    /// An explicit parent transform node id, if the node carries one.
    pub fn explicit_parent(&self) -> Option<u32> {
        ["_parent", "_parent_id", "_parentID"]
            .iter()
            .filter_map(|key| self.attributes.get(*key))
            .find_map(|value| value.trim().parse().ok())
    }
}

/// The attributes of one animation frame of a `TransformNode`, with the transform already decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformFrame {
    pub attributes: Dict,
    pub transform: Transform3,
}

impl TransformFrame {
    /// Decodes `_r` (packed rotation byte) and `_t` (`"x y z"` translation). Malformed values fall back to the identity
    /// rotation or zero translation.
    pub fn from_attributes(attributes: Dict) -> Self {
        let rotation = attributes
            .get("_r")
            .and_then(|s| {
                let decoded = s.trim().parse::<u8>().ok().and_then(Rotation3::from_packed_byte);
                if decoded.is_none() {
                    tracing::debug!("Unknown rotation format: {}", s);
                }
                decoded
            })
            .unwrap_or(Rotation3::IDENTITY);

        let translation = attributes
            .get("_t")
            .and_then(|s| {
                let parsed = parse_translation(s);
                if parsed.is_none() {
                    tracing::debug!("Unknown translation format: {}", s);
                }
                parsed
            })
            .unwrap_or(Point3i::ZERO);

        Self {
            attributes,
            transform: Transform3::new(rotation, translation),
        }
    }
}

fn parse_translation(s: &str) -> Option<Point3i> {
    let mut values = s.split_whitespace().map(str::parse::<i32>);
    let x = values.next()?.ok()?;
    let y = values.next()?.ok()?;
    let z = values.next()?.ok()?;
    if values.next().is_some() {
        return None;
    }

    Some(PointN([x, y, z]))
}

/// An `nGRP` node.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupNode {
    pub id: u32,
    pub attributes: Dict,
    pub children: Vec<u32>,
}

impl GroupNode {
    pub fn is_hidden(&self) -> bool {
        is_hidden(&self.attributes)
    }
}

/// An `nSHP` node: references one model per keyframe.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeNode {
    pub id: u32,
    pub attributes: Dict,
    pub models: Vec<ShapeModel>,
}

impl ShapeNode {
    /// The model shown at `frame`, if any model is keyed to exactly that frame.
    pub fn model_at(&self, frame: u32) -> Option<u32> {
        self.models
            .iter()
            .find(|m| m.frame == frame)
            .map(|m| m.model_id)
    }

    /// The frames some model is keyed to, in list order.
    pub fn keyframes(&self) -> impl Iterator<Item = u32> + '_ {
        self.models.iter().map(|m| m.frame)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeModel {
    pub model_id: u32,
    /// From the `_f` attribute, else the position of the model in the shape's list.
    pub frame: u32,
    pub attributes: Dict,
}

pub(crate) fn is_hidden(attributes: &Dict) -> bool {
    attributes.get("_hidden").map(|v| v.trim() == "1") == Some(true)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
