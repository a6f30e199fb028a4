//! Builds `.vox` byte streams in memory, so tests don't depend on asset files.
//!
//! Chunks are emitted in the order they are added, all as children of `MAIN`.

pub type Attributes<'a> = &'a [(&'a str, &'a str)];

#[derive(Clone, Debug, Default)]
pub struct VoxWriter {
    children: Vec<u8>,
}

impl VoxWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk with the given content and no children.
    pub fn chunk(mut self, id: &[u8; 4], content: &[u8]) -> Self {
        self.children.extend_from_slice(id);
        put_u32(&mut self.children, content.len() as u32);
        put_u32(&mut self.children, 0);
        self.children.extend_from_slice(content);

        self
    }

    /// Appends raw bytes, e.g. to simulate a truncated stream.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.children.extend_from_slice(bytes);

        self
    }

    pub fn size(self, size: [u32; 3]) -> Self {
        let mut content = Vec::new();
        for s in size.iter() {
            put_u32(&mut content, *s);
        }

        self.chunk(b"SIZE", &content)
    }

    /// Each voxel is `[x, y, z, color_index]`.
    pub fn xyzi(self, voxels: &[[u8; 4]]) -> Self {
        let mut content = Vec::new();
        put_u32(&mut content, voxels.len() as u32);
        for v in voxels.iter() {
            content.extend_from_slice(v);
        }

        self.chunk(b"XYZI", &content)
    }

    /// A `SIZE` chunk followed by its `XYZI` chunk.
    pub fn model(self, size: [u32; 3], voxels: &[[u8; 4]]) -> Self {
        self.size(size).xyzi(voxels)
    }

    /// Writes an `RGBA` chunk. Missing entries are filled with opaque black.
    pub fn rgba(self, colors: &[[u8; 4]]) -> Self {
        let mut content = Vec::with_capacity(256 * 4);
        for i in 0..256 {
            content.extend_from_slice(colors.get(i).unwrap_or(&[0, 0, 0, 255]));
        }

        self.chunk(b"RGBA", &content)
    }

    pub fn transform(
        self,
        id: u32,
        attributes: Attributes<'_>,
        child_id: u32,
        layer_id: i32,
        frames: &[Attributes<'_>],
    ) -> Self {
        let mut content = Vec::new();
        put_u32(&mut content, id);
        put_dict(&mut content, attributes);
        put_u32(&mut content, child_id);
        put_i32(&mut content, -1);
        put_i32(&mut content, layer_id);
        put_u32(&mut content, frames.len() as u32);
        for frame in frames.iter() {
            put_dict(&mut content, frame);
        }

        self.chunk(b"nTRN", &content)
    }

    pub fn group(self, id: u32, attributes: Attributes<'_>, children: &[u32]) -> Self {
        let mut content = Vec::new();
        put_u32(&mut content, id);
        put_dict(&mut content, attributes);
        put_u32(&mut content, children.len() as u32);
        for c in children.iter() {
            put_u32(&mut content, *c);
        }

        self.chunk(b"nGRP", &content)
    }

    pub fn shape(self, id: u32, attributes: Attributes<'_>, models: &[(u32, Attributes<'_>)]) -> Self {
        let mut content = Vec::new();
        put_u32(&mut content, id);
        put_dict(&mut content, attributes);
        put_u32(&mut content, models.len() as u32);
        for (model_id, model_attributes) in models.iter() {
            put_u32(&mut content, *model_id);
            put_dict(&mut content, model_attributes);
        }

        self.chunk(b"nSHP", &content)
    }

    pub fn layer(self, id: u32, attributes: Attributes<'_>) -> Self {
        let mut content = Vec::new();
        put_u32(&mut content, id);
        put_dict(&mut content, attributes);
        put_i32(&mut content, -1);

        self.chunk(b"LAYR", &content)
    }

    pub fn material(self, id: u32, properties: Attributes<'_>) -> Self {
        let mut content = Vec::new();
        put_u32(&mut content, id);
        put_dict(&mut content, properties);

        self.chunk(b"MATL", &content)
    }

    /// The full file: header, then `MAIN` wrapping every chunk added so far.
    pub fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(20 + self.children.len());
        bytes.extend_from_slice(b"VOX ");
        put_u32(&mut bytes, 150);
        bytes.extend_from_slice(b"MAIN");
        put_u32(&mut bytes, 0);
        put_u32(&mut bytes, self.children.len() as u32);
        bytes.extend_from_slice(&self.children);

        bytes
    }
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_string(out: &mut Vec<u8>, value: &str) {
    put_u32(out, value.len() as u32);
    out.extend_from_slice(value.as_bytes());
}

fn put_dict(out: &mut Vec<u8>, attributes: Attributes<'_>) {
    put_u32(out, attributes.len() as u32);
    for (key, value) in attributes.iter() {
        put_string(out, key);
        put_string(out, value);
    }
}
