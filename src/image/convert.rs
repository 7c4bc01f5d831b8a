use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;

use super::*;

use image as imagex; // external, for IO

/// Decode an image file to an RGB raster. Grayscale and alpha inputs are
/// expanded/flattened to three channels by the decoder.
pub fn load(path: &Path) -> anyhow::Result<Raster> {
    let img = imagex::io::Reader::open(path)
        .with_context(|| format!("cannot open input image {:?}", path))?
        .decode()
        .with_context(|| format!("cannot decode input image {:?}", path))?;
    Ok(from_rgb(&img.to_rgb8()))
}

pub fn from_rgb(img: &imagex::RgbImage) -> Raster {
    let mut raster = Raster::new((img.width() as i32, img.height() as i32).into());
    for (x, y, px) in img.enumerate_pixels() {
        raster.set_pixel((x as i32, y as i32).into(), Color::new(px[0], px[1], px[2]));
    }
    raster
}

pub fn to_rgb(raster: &Raster) -> imagex::RgbImage {
    imagex::RgbImage::from_raw(
        raster.width() as u32,
        raster.height() as u32,
        raster.data().to_vec(),
    )
    .unwrap() // raster buffer length is width * height * 3 by construction
}

/// Encode the raster to the format implied by the output extension.
/// JPEG goes through an explicit encoder to get quality 95 instead of the
/// default 75.
pub fn save(raster: &Raster, path: &Path) -> anyhow::Result<()> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if ext == "jpg" || ext == "jpeg" {
        let file =
            File::create(path).with_context(|| format!("cannot create output {:?}", path))?;
        let mut writer = BufWriter::new(file);
        let mut encoder = imagex::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, 95);
        encoder
            .encode(
                raster.data(),
                raster.width() as u32,
                raster.height() as u32,
                imagex::ColorType::Rgb8,
            )
            .with_context(|| format!("cannot encode output {:?}", path))?;
    } else {
        to_rgb(raster)
            .save(path)
            .with_context(|| format!("cannot save output {:?}", path))?;
    }
    Ok(())
}
