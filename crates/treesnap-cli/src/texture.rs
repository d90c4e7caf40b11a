//! Texture dimension probing.
//!
//! Only the pixel size of a texture is read; frame slicing and compositing
//! are left to whatever consumes the SVG. DirectDraw Surface files are sized
//! from their header, every other format through the `image` crate.

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use log::{debug, trace};

use treesnap::geometry::Size;

const DDS_MAGIC: &[u8; 4] = b"DDS ";
/// Magic, header size, flags, height and width.
const DDS_PREFIX_LEN: usize = 20;

/// Reads the pixel size of the texture at `path`.
///
/// Returns `None` when the file is missing or its format is not understood.
pub fn probe_size(path: &Path) -> Option<Size> {
    let is_dds = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dds"));

    let result = if is_dds {
        dds_size(path)
    } else {
        image::image_dimensions(path).map_err(io::Error::other)
    };

    match result {
        Ok((width, height)) => {
            trace!(path = path.display().to_string(), width, height; "Texture probed");
            let width = i32::try_from(width).ok()?;
            let height = i32::try_from(height).ok()?;
            Some(Size::new(width, height))
        }
        Err(err) => {
            debug!(path = path.display().to_string(), err:err; "Texture size unavailable");
            None
        }
    }
}

fn dds_size(path: &Path) -> io::Result<(u32, u32)> {
    let mut header = [0u8; DDS_PREFIX_LEN];
    File::open(path)?.read_exact(&mut header)?;
    parse_dds_header(&header)
}

fn parse_dds_header(header: &[u8; DDS_PREFIX_LEN]) -> io::Result<(u32, u32)> {
    if &header[..4] != DDS_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "missing DDS magic",
        ));
    }
    let field = |offset: usize| {
        u32::from_le_bytes([
            header[offset],
            header[offset + 1],
            header[offset + 2],
            header[offset + 3],
        ])
    };
    Ok((field(16), field(12)))
}
