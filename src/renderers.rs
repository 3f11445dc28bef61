//! Turning a maze's render grid into an image.
//!
//! Each render grid byte becomes a `multiplier` x `multiplier` block of gray pixels.

use std::path::Path;

use image::{GrayImage, ImageFormat};
use log::info;

use crate::coordinates::Coord;
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, Width};

/// # Panics
/// If `multiplier` is zero.
pub fn render_grid_image(grid: &Grid, multiplier: usize) -> Result<GrayImage> {
    assert!(multiplier > 0, "Cannot render an image at a zero pixel multiplier");

    let (w, h) = match (grid.width().checked_mul(multiplier),
                        grid.height().checked_mul(multiplier)) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(ErrorKind::ImageTooLarge(grid.width(), grid.height()).into()),
    };
    let (image_w, image_h) = match (u32::try_from(w), u32::try_from(h)) {
        (Ok(iw), Ok(ih)) => (iw, ih),
        _ => return Err(ErrorKind::ImageTooLarge(w, h).into()),
    };

    let mut scaled = Grid::new(Width(w), Height(h))?;
    scaled.scale_blit(grid, Coord::default(), multiplier);

    GrayImage::from_raw(image_w, image_h, scaled.into_bytes())
        .ok_or_else(|| ErrorKind::ImageTooLarge(w, h).into())
}

/// Save the grid as a grayscale PNG, whatever extension `path` has.
pub fn save_render_grid<P: AsRef<Path>>(grid: &Grid, path: P, multiplier: usize) -> Result<()> {
    let path = path.as_ref();
    let image = render_grid_image(grid, multiplier)?;
    image.save_with_format(path, ImageFormat::Png)
        .chain_err(|| format!("Failed to save the render grid to {}", path.display()))?;
    info!("saved a {}x{} image to {}",
          image.width(),
          image.height(),
          path.display());
    Ok(())
}
