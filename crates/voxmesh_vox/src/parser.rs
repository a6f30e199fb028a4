use crate::{
    model::MAX_MODEL_SIZE,
    node::{GroupNode, ShapeModel, ShapeNode, TransformFrame, TransformNode},
    reader::{self, counted, dict, quad, ParseResult, RawChunk},
    Layer, Material, Rgba, VoxError, VoxFile, VoxModel, VoxPalette, Voxel,
};

use voxmesh_core::prelude::*;

use nom::{
    combinator::map,
    multi::many_m_n,
    number::complete::{le_i32, le_u32},
    sequence::tuple,
};
use std::path::Path;

const MAGIC: [u8; 4] = *b"VOX ";

/// Reads and parses a `.vox` file.
pub fn read_vox_file(path: impl AsRef<Path>) -> Result<VoxFile, VoxError> {
    let bytes = std::fs::read(path)?;

    parse_vox(&bytes)
}

/// Parses a `.vox` byte stream.
///
/// Only a bad header is an error. A stream that ends in the middle of a chunk yields everything parsed before that chunk,
/// and a chunk whose payload doesn't match its id is skipped.
pub fn parse_vox(bytes: &[u8]) -> Result<VoxFile, VoxError> {
    let _span = tracing::info_span!("parse_vox", num_bytes = bytes.len()).entered();

    let (rest, magic) = reader::fourcc(bytes).map_err(|_| {
        let mut found = [0; 4];
        found[..bytes.len()].copy_from_slice(bytes);
        VoxError::BadMagic { found }
    })?;
    if magic != MAGIC {
        return Err(VoxError::BadMagic { found: magic });
    }
    let (rest, version) = reader::version(rest).map_err(|_| VoxError::MissingMain)?;
    let (rest, main_id) = reader::fourcc(rest).map_err(|_| VoxError::MissingMain)?;
    if &main_id != b"MAIN" {
        return Err(VoxError::MissingMain);
    }
    let (rest, (content_len, children_len)) =
        reader::chunk_lengths(rest).unwrap_or((rest, (0, 0)));
    let rest = match reader::body(rest, content_len) {
        Ok((rest, _)) => rest,
        Err(_) => {
            tracing::warn!("MAIN chunk truncated in its content");
            rest
        }
    };
    let children = match reader::body(rest, children_len) {
        Ok((_, children)) => children,
        Err(_) => {
            tracing::warn!("MAIN chunk children truncated; parsing what is present");
            rest
        }
    };

    let mut builder = VoxFileBuilder::new(version);
    let mut chunks = children;
    while !chunks.is_empty() {
        match reader::chunk(chunks) {
            Ok((rest, chunk)) => {
                builder.add_chunk(&chunk);
                chunks = rest;
            }
            Err(nom::Err::Incomplete(needed)) => {
                tracing::warn!(
                    "Chunk stream truncated ({:?}); ignoring the partial chunk",
                    needed
                );
                break;
            }
            Err(_) => {
                tracing::warn!("Unreadable chunk header; ignoring the rest of the stream");
                break;
            }
        }
    }

    Ok(builder.build())
}

struct VoxFileBuilder {
    file: VoxFile,
    /// Every `SIZE` seen so far. `None` for a size the format doesn't allow, so the `XYZI` after it is dropped.
    sizes: Vec<Option<Point3i>>,
    has_palette: bool,
}

impl VoxFileBuilder {
    fn new(version: u32) -> Self {
        Self {
            file: VoxFile::empty(version),
            sizes: Vec::new(),
            has_palette: false,
        }
    }

    fn add_chunk(&mut self, chunk: &RawChunk<'_>) {
        let content = chunk.content;
        let parsed = match &chunk.id {
            b"PACK" => self.add_pack(content),
            b"SIZE" => self.add_size(content),
            b"XYZI" => self.add_xyzi(content),
            b"RGBA" => self.add_rgba(content),
            b"MATT" => self.add_legacy_material(content),
            b"MATL" => self.add_material(content),
            b"nTRN" => self.add_transform(content),
            b"nGRP" => self.add_group(content),
            b"nSHP" => self.add_shape(content),
            b"LAYR" => self.add_layer(content),
            _ => {
                tracing::debug!(
                    "Skipping unknown chunk {:?} ({} + {} bytes)",
                    String::from_utf8_lossy(&chunk.id),
                    chunk.content.len(),
                    chunk.children.len()
                );
                Ok((content, ()))
            }
        };
        if parsed.is_err() {
            tracing::warn!(
                "Skipping malformed {} chunk",
                String::from_utf8_lossy(&chunk.id)
            );
        }
    }

    fn add_pack<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, num_models) = le_u32(content)?;
        tracing::debug!("PACK declares {} models", num_models);

        Ok((rest, ()))
    }

    fn add_size<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, size) = map(tuple((le_i32, le_i32, le_i32)), |(x, y, z)| {
            PointN([x, y, z])
        })(content)?;

        if size.0.iter().all(|&d| 0 < d && d <= MAX_MODEL_SIZE) {
            self.sizes.push(Some(size));
        } else {
            tracing::warn!(
                "SIZE {:?} is outside of [1, {}]; its model will be empty",
                size,
                MAX_MODEL_SIZE
            );
            self.sizes.push(None);
        }

        Ok((rest, ()))
    }

    fn add_xyzi<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, num_voxels) = le_u32(content)?;
        let (rest, voxels) = many_m_n(0, num_voxels as usize, map(quad, voxel))(rest)?;
        if voxels.len() < num_voxels as usize {
            tracing::warn!(
                "XYZI declares {} voxels but holds only {}",
                num_voxels,
                voxels.len()
            );
        }

        // An empty model keeps the indices of later models stable for shape nodes.
        let model = match self.sizes.last() {
            Some(Some(size)) => VoxModel::new(*size, voxels),
            Some(None) => VoxModel::new(Point3i::ZERO, Vec::new()),
            None => {
                tracing::warn!("XYZI chunk without a preceding SIZE chunk");
                return Err(nom::Err::Error(nom::error::Error::new(
                    content,
                    nom::error::ErrorKind::Verify,
                )));
            }
        };
        self.file.models.push(model);

        Ok((rest, ()))
    }

    fn add_rgba<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let mut palette = VoxPalette::default();
        let mut rest = content;
        for color in palette.colors.iter_mut() {
            let (r, bytes) = quad(rest)?;
            *color = Rgba(bytes);
            rest = r;
        }
        self.file.palette = palette;
        self.has_palette = true;

        Ok((rest, ()))
    }

    fn add_legacy_material<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, id) = le_u32(content)?;
        let (rest, material) = Material::from_legacy(id, rest)?;
        self.file.materials.push(material);

        Ok((rest, ()))
    }

    fn add_material<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, (id, properties)) = tuple((le_u32, dict))(content)?;
        self.file.materials.push(Material { id, properties });

        Ok((rest, ()))
    }

    fn add_transform<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, (id, attributes, child_id, _reserved_id, layer_id)) =
            tuple((le_u32, dict, le_u32, le_i32, le_i32))(content)?;
        let (rest, frames) = counted(map(dict, TransformFrame::from_attributes))(rest)?;

        let node = TransformNode {
            id,
            attributes,
            child_id,
            layer_id,
            frames,
        };
        if self.file.transforms.insert(id, node).is_some() {
            tracing::warn!("Duplicate transform node {}; keeping the last", id);
        }

        Ok((rest, ()))
    }

    fn add_group<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, (id, attributes, children)) = tuple((le_u32, dict, counted(le_u32)))(content)?;

        let node = GroupNode {
            id,
            attributes,
            children,
        };
        if self.file.groups.insert(id, node).is_some() {
            tracing::warn!("Duplicate group node {}; keeping the last", id);
        }

        Ok((rest, ()))
    }

    fn add_shape<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, (id, attributes, entries)) =
            tuple((le_u32, dict, counted(tuple((le_u32, dict)))))(content)?;
        let models = entries
            .into_iter()
            .zip(0..)
            .map(|((model_id, attributes), position)| {
                let frame = attributes
                    .get("_f")
                    .and_then(|f| f.trim().parse().ok())
                    .unwrap_or(position);
                ShapeModel {
                    model_id,
                    frame,
                    attributes,
                }
            })
            .collect();

        let node = ShapeNode {
            id,
            attributes,
            models,
        };
        if self.file.shapes.insert(id, node).is_some() {
            tracing::warn!("Duplicate shape node {}; keeping the last", id);
        }

        Ok((rest, ()))
    }

    fn add_layer<'a>(&mut self, content: &'a [u8]) -> ParseResult<'a, ()> {
        let (rest, (id, attributes)) = tuple((le_u32, dict))(content)?;
        self.file.layers.push(Layer { id, attributes });

        Ok((rest, ()))
    }

    fn build(self) -> VoxFile {
        if !self.has_palette {
            tracing::debug!("No RGBA chunk; using the default palette");
        }
        tracing::info!(
            "Parsed {} models, {} transforms, {} groups, {} shapes",
            self.file.models.len(),
            self.file.transforms.len(),
            self.file.groups.len(),
            self.file.shapes.len()
        );

        self.file
    }
}

fn voxel([x, y, z, color_index]: [u8; 4]) -> Voxel {
    Voxel {
        position: PointN([x as i32, y as i32, z as i32]),
        color_index,
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
