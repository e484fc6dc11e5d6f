pub mod color;
pub mod io;
pub mod rgba;
pub mod tile;
pub mod traits;

pub use self::color::LinearColor;
pub use self::rgba::ImageRgbaF32;
pub use self::tile::{PixelEncoding, TileBuffer, TilePixels};
pub use self::traits::{ImageView, ImageViewMut, Rows};
