use crate::{node::is_hidden, reader::ParseResult, Dict};

use nom::{
    number::complete::{le_f32, le_u32},
    sequence::tuple,
};

/// A material, from either a `MATL` chunk or a legacy `MATT` chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub id: u32,
    pub properties: Dict,
}

impl Material {
    /// The material type, e.g. `_diffuse`, `_metal`, `_glass` or `_emit`.
    pub fn kind(&self) -> Option<&str> {
        self.properties.get("_type").map(String::as_str)
    }

    pub fn float(&self, key: &str) -> Option<f32> {
        self.properties.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Decodes a legacy `MATT` payload (after its id) into the same property keys `MATL` uses.
    ///
    /// ```text
    /// int32       : material type (0 diffuse, 1 metal, 2 glass, 3 emissive)
    /// float       : material weight
    /// int32       : property bits, one value follows for each of bits 0-6
    /// float * N   : plastic, roughness, specular, IOR, attenuation, power, glow
    /// ```
    pub(crate) fn from_legacy(id: u32, input: &[u8]) -> ParseResult<'_, Self> {
        const KINDS: [&str; 4] = ["_diffuse", "_metal", "_glass", "_emit"];
        const VALUE_KEYS: [&str; 7] = [
            "_plastic", "_rough", "_spec", "_ior", "_att", "_power", "_glow",
        ];

        let (mut input, (kind, weight, bits)) = tuple((le_u32, le_f32, le_u32))(input)?;

        let mut properties = Dict::new();
        let kind_name = KINDS.get(kind as usize).copied().unwrap_or("_diffuse");
        properties.insert("_type".to_string(), kind_name.to_string());
        properties.insert("_weight".to_string(), weight.to_string());
        for (bit, key) in VALUE_KEYS.iter().enumerate() {
            if bits & (1 << bit) != 0 {
                let (rest, value) = le_f32(input)?;
                properties.insert(key.to_string(), value.to_string());
                input = rest;
            }
        }

        Ok((input, Self { id, properties }))
    }
}

/// A `LAYR` chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub id: u32,
    pub attributes: Dict,
}

impl Layer {
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("_name").map(String::as_str)
    }

    pub fn is_hidden(&self) -> bool {
        is_hidden(&self.attributes)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
