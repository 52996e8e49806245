#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod session;
pub mod stickers;
pub mod stroke;
pub mod tool;

pub use app::PaintApp;
pub use config::SketchConfig;
pub use error::{SketchError, SketchResult};
pub use history::History;
pub use input::{CanvasEvent, InputHandler};
pub use renderer::{PainterSurface, RecordingSurface, Surface};
pub use raster::RasterSurface;
pub use session::{CanvasSnapshot, DrawingSession, PointerPhase};
pub use stickers::StickerCatalog;
pub use stroke::{Glyph, Stroke, StrokeRef, ToolSnapshot};
pub use tool::{Preview, ToolState};
