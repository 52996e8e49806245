use std::path::{Path, PathBuf};

use futures::channel::oneshot;

use crate::error::{SketchError, SketchResult};
use crate::session::CanvasSnapshot;

/// Render `snapshot` at `size` x `size` and write it to `path` as PNG
pub fn save_png(snapshot: &CanvasSnapshot, path: &Path, size: u32) -> SketchResult<PathBuf> {
    let image = snapshot.rasterize(size, size);
    let mut bytes = Vec::new();
    image.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    std::fs::write(path, bytes).map_err(|source| SketchError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(path.to_owned())
}

/// A PNG export running off the UI thread
pub struct ExportJob {
    receiver: oneshot::Receiver<SketchResult<PathBuf>>,
}

impl ExportJob {
    /// Start exporting `snapshot`.
    ///
    /// The snapshot owns its strokes, so the canvas can keep changing while
    /// the worker runs.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn(snapshot: CanvasSnapshot, path: PathBuf, size: u32) -> Self {
        let (sender, receiver) = oneshot::channel();
        std::thread::spawn(move || {
            let result = save_png(&snapshot, &path, size);
            // The app may have shut down already
            let _ = sender.send(result);
        });
        Self { receiver }
    }

    // No threads or file system on the web
    #[cfg(target_arch = "wasm32")]
    pub fn spawn(_snapshot: CanvasSnapshot, _path: PathBuf, _size: u32) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(Err(SketchError::ExportUnsupported));
        Self { receiver }
    }

    /// Non-blocking check; `Some` once the worker has finished
    pub fn poll(&mut self) -> Option<SketchResult<PathBuf>> {
        match self.receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::Canceled) => Some(Err(SketchError::ExportCancelled)),
        }
    }
}
