use anyhow::{bail, Context, Result};
use image::{io::Reader as ImageReader, ColorType};
use std::path::PathBuf;
use zenride_icon::ICON_SIZE;

fn main() -> Result<()> {
    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/Resources/Assets.xcassets/AppIcon.appiconset/icon_1024.png"
        ))
    });

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let (width, height) = (img.width(), img.height());
    println!("Checking icon: {}", path.display());
    println!("Image dimensions: {}x{}", width, height);
    println!("Color type: {:?}", img.color());

    let rgb = img.to_rgb8();
    let samples = [
        ("top-left corner", 0, 0),
        ("top-right corner", width.saturating_sub(1), 0),
        ("bottom-left corner", 0, height.saturating_sub(1)),
        ("bottom-right corner", width.saturating_sub(1), height.saturating_sub(1)),
        ("center", width / 2, height / 2),
    ];
    println!();
    for (label, x, y) in samples {
        if x < width && y < height {
            let p = rgb.get_pixel(x, y);
            println!("  {:<20} (x={:>4}, y={:>4}) RGB: [{}, {}, {}]", label, x, y, p[0], p[1], p[2]);
        }
    }

    if width != ICON_SIZE || height != ICON_SIZE {
        bail!("expected {0}x{0}, found {1}x{2}", ICON_SIZE, width, height);
    }
    if img.color() != ColorType::Rgb8 {
        bail!("expected an opaque 8-bit RGB image, found {:?}", img.color());
    }
    println!("\n✓ Icon is a {0}x{0} opaque RGB image", ICON_SIZE);
    Ok(())
}
