use crate::ConvertError;

use voxmesh_image::AtlasSizing;
use voxmesh_mesh::{MergeMode, Shading, TJunctionDetection, TopologyRepair};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// How materials and atlases are shared between the meshes of one scene.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum MaterialMode {
    /// Every mesh gets its own atlas, texture and material.
    PerMesh,
    /// All meshes are packed into one atlas with a single material.
    Shared,
}

impl Default for MaterialMode {
    fn default() -> Self {
        MaterialMode::PerMesh
    }
}

/// Every option of a conversion. Missing fields take their default when read from RON.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub merge_mode: MergeMode,
    pub atlas_sizing: AtlasSizing,
    /// The largest atlas side length tried before a mesh's texture is abandoned.
    pub max_atlas_size: u32,
    pub shading: Shading,
    pub repair_t_junctions: bool,
    pub t_junction_detection: TJunctionDetection,
    pub material_mode: MaterialMode,
    /// Moves every mesh so the bounding box of the whole scene is centered at the origin.
    pub center_world: bool,
    /// The pivot of each model as a fraction of its grid box. `[0.5; 3]` is the center.
    pub pivot: [f32; 3],
    /// Pivots for specific model indices, taking precedence over `pivot`.
    pub pivot_overrides: BTreeMap<u32, [f32; 3]>,
    /// Converts every animation frame instead of only frame 0.
    pub all_frames: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            merge_mode: MergeMode::default(),
            atlas_sizing: AtlasSizing::default(),
            max_atlas_size: 4096,
            shading: Shading::default(),
            repair_t_junctions: true,
            t_junction_detection: TJunctionDetection::default(),
            material_mode: MaterialMode::default(),
            center_world: false,
            pivot: [0.5; 3],
            pivot_overrides: BTreeMap::new(),
            all_frames: false,
        }
    }
}

impl ConvertConfig {
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let reader = std::fs::File::open(path)?;

        Ok(ron::de::from_reader(reader)?)
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConvertError> {
        Ok(ron::de::from_str(s)?)
    }

    pub fn pivot_for(&self, model_index: u32) -> [f32; 3] {
        self.pivot_overrides
            .get(&model_index)
            .copied()
            .unwrap_or(self.pivot)
    }

    /// The repair stage to run on every assembled mesh, if any.
    pub fn topology_repair(&self) -> Option<TopologyRepair> {
        if !self.repair_t_junctions {
            return None;
        }

        Some(TopologyRepair {
            detection: self.t_junction_detection,
            shading: self.shading,
            ..Default::default()
        })
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ConvertConfig::from_ron_str(
            "(shading: Smooth, material_mode: Shared, pivot_overrides: { 2: (0.5, 0.0, 0.5) })",
        )
        .unwrap();

        assert_eq!(config.shading, Shading::Smooth);
        assert_eq!(config.material_mode, MaterialMode::Shared);
        assert_eq!(config.max_atlas_size, 4096);
        assert!(config.repair_t_junctions);
        assert_eq!(config.pivot_for(2), [0.5, 0.0, 0.5]);
        assert_eq!(config.pivot_for(0), [0.5; 3]);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = ConvertConfig {
            atlas_sizing: AtlasSizing::Tight,
            t_junction_detection: TJunctionDetection::SpatialGrid,
            all_frames: true,
            ..Default::default()
        };

        let text = ron::ser::to_string(&config).unwrap();

        assert_eq!(ConvertConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            ConvertConfig::from_ron_str("(max_atlas_size: \"big\")"),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn repair_follows_config() {
        let config = ConvertConfig {
            repair_t_junctions: false,
            ..Default::default()
        };
        assert_eq!(config.topology_repair(), None);

        let repair = ConvertConfig::default().topology_repair().unwrap();
        assert_eq!(repair.detection, TJunctionDetection::Exhaustive);
    }
}
