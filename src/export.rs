//! Export pipeline: rasterize, trim, encode, deliver.

use std::fmt;

use serde::Serialize;

use crate::error::ExportError;
use crate::output::{encode_png, export_filename};
use crate::pixel::PixelBuffer;
use crate::ports::file_sink::{Delivery, FileSink};
use crate::ports::rasterizer::{QrRegion, Rasterizer};
use crate::trim::{trim_with_box, BoundingBox};

/// A single request to export a rendered QR region.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    size: u32,
    region: QrRegion,
}

impl ExportRequest {
    /// Build a request for `region`, named after its size.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidSize`] if the region size is zero.
    pub fn new(region: QrRegion) -> Result<Self, ExportError> {
        if region.size == 0 {
            return Err(ExportError::InvalidSize("size must be greater than zero".into()));
        }
        Ok(Self { size: region.size, region })
    }

    /// The size the output file is named after.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The region to rasterize.
    #[must_use]
    pub fn region(&self) -> &QrRegion {
        &self.region
    }
}

/// Pipeline stage of an export in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    /// Not started.
    Idle,
    /// Waiting for the rasterizer.
    Rasterizing,
    /// Cropping transparent edges.
    Trimming,
    /// Encoding PNG bytes.
    Encoding,
    /// Handed to the file sink.
    Delivered,
    /// Aborted; nothing was delivered.
    Failed,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Rasterizing => "rasterizing",
            Self::Trimming => "trimming",
            Self::Encoding => "encoding",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Width and height of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl From<&PixelBuffer> for Dimensions {
    fn from(buf: &PixelBuffer) -> Self {
        Self { width: buf.width(), height: buf.height() }
    }
}

/// Summary of a completed export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// Download filename, `qr-code-<size>.png`.
    pub filename: String,
    /// Where the file was delivered.
    pub delivery: Delivery,
    /// Size of the rasterized canvas.
    pub rasterized: Dimensions,
    /// Size of the exported image.
    pub exported: Dimensions,
    /// Region of the canvas that was kept.
    pub bounding_box: BoundingBox,
    /// Encoded PNG length in bytes.
    pub bytes: usize,
}

/// Runs export requests through the rasterizer and into a file sink.
pub struct Exporter {
    rasterizer: Box<dyn Rasterizer>,
    sink: Box<dyn FileSink>,
    crop: bool,
}

impl Exporter {
    /// Create an exporter that crops transparent edges before encoding.
    #[must_use]
    pub fn new(rasterizer: Box<dyn Rasterizer>, sink: Box<dyn FileSink>) -> Self {
        Self { rasterizer, sink, crop: true }
    }

    /// Enable or disable cropping.
    #[must_use]
    pub fn with_crop(mut self, crop: bool) -> Self {
        self.crop = crop;
        self
    }

    /// Run one export. The sink is called exactly once on success and never
    /// on failure.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by rasterization, encoding or delivery.
    pub async fn export(&self, request: ExportRequest) -> Result<ExportReport, ExportError> {
        let mut stage = ExportStage::Idle;
        match self.run(request, &mut stage).await {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::error!(%stage, "export failed: {e}");
                advance(&mut stage, ExportStage::Failed);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        request: ExportRequest,
        stage: &mut ExportStage,
    ) -> Result<ExportReport, ExportError> {
        let filename = export_filename(request.size);

        advance(stage, ExportStage::Rasterizing);
        let raster = self.rasterizer.rasterize(&request.region).await?;
        let rasterized = Dimensions::from(&raster);

        advance(stage, ExportStage::Trimming);
        let (trimmed, bounding_box) = if self.crop {
            trim_with_box(raster)
        } else {
            let full = BoundingBox::full(raster.width(), raster.height());
            (raster, full)
        };
        let exported = Dimensions::from(&trimmed);
        tracing::debug!(?bounding_box, ?exported, "trimmed canvas");

        advance(stage, ExportStage::Encoding);
        let png = tokio::task::spawn_blocking(move || encode_png(trimmed))
            .await
            .map_err(|e| ExportError::Encoding(format!("encode task failed: {e}")))??;
        let bytes = png.len();

        let delivery = self.sink.deliver(&filename, png).await?;
        advance(stage, ExportStage::Delivered);

        Ok(ExportReport { filename, delivery, rasterized, exported, bounding_box, bytes })
    }
}

fn advance(stage: &mut ExportStage, next: ExportStage) {
    tracing::debug!(from = %stage, to = %next, "export stage");
    *stage = next;
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::output::decode_png;
    use crate::ports::file_sink::DeliverFuture;
    use crate::ports::rasterizer::{QrStyle, RasterFuture};

    /// Returns a fixed buffer, or fails.
    struct StubRasterizer(Option<PixelBuffer>);

    impl Rasterizer for StubRasterizer {
        fn rasterize(&self, _region: &QrRegion) -> RasterFuture<'_> {
            let result = self
                .0
                .clone()
                .ok_or_else(|| ExportError::Rasterization("region not mounted".into()));
            Box::pin(async move { result })
        }
    }

    type Delivered = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

    /// Collects delivered files in memory.
    #[derive(Default)]
    struct MemorySink(Delivered);

    impl FileSink for MemorySink {
        fn deliver(&self, filename: &str, bytes: Vec<u8>) -> DeliverFuture<'_> {
            self.0.lock().unwrap().push((filename.to_string(), bytes));
            Box::pin(async { Ok::<_, ExportError>(Delivery::Stdout) })
        }
    }

    /// Counts delivery attempts and refuses every one.
    #[derive(Default)]
    struct RefusingSink(Arc<Mutex<usize>>);

    impl FileSink for RefusingSink {
        fn deliver(&self, _filename: &str, _bytes: Vec<u8>) -> DeliverFuture<'_> {
            *self.0.lock().unwrap() += 1;
            Box::pin(async {
                Err::<Delivery, _>(ExportError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only directory",
                )))
            })
        }
    }

    fn request(size: u32) -> ExportRequest {
        ExportRequest::new(QrRegion { text: "hello".into(), size, style: QrStyle::default() })
            .unwrap()
    }

    fn exporter(raster: Option<PixelBuffer>) -> (Exporter, Delivered) {
        let sink = MemorySink::default();
        let delivered = Arc::clone(&sink.0);
        (Exporter::new(Box::new(StubRasterizer(raster)), Box::new(sink)), delivered)
    }

    fn single_pixel() -> PixelBuffer {
        let mut buf = PixelBuffer::new(10, 10);
        buf.put_pixel(4, 4, [1, 2, 3, 255]);
        buf
    }

    #[tokio::test]
    async fn filename_follows_size() {
        let (exporter, delivered) = exporter(Some(single_pixel()));
        let report = exporter.export(request(256)).await.unwrap();
        assert_eq!(report.filename, "qr-code-256.png");
        assert_eq!(delivered.lock().unwrap()[0].0, "qr-code-256.png");
    }

    #[tokio::test]
    async fn delivers_cropped_png_once() {
        let (exporter, delivered) = exporter(Some(single_pixel()));
        let report = exporter.export(request(10)).await.unwrap();

        assert_eq!(report.rasterized, Dimensions { width: 10, height: 10 });
        assert_eq!(report.exported, Dimensions { width: 1, height: 1 });
        assert_eq!(report.bounding_box, BoundingBox { top: 4, bottom: 5, left: 4, right: 5 });

        let delivered = delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(report.bytes, delivered[0].1.len());
        let decoded = decode_png(&delivered[0].1).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1, 1));
        assert_eq!(decoded.pixel(0, 0), [1, 2, 3, 255]);
    }

    #[tokio::test]
    async fn no_crop_keeps_full_canvas() {
        let (exporter, delivered) = exporter(Some(single_pixel()));
        let report = exporter.with_crop(false).export(request(10)).await.unwrap();
        assert_eq!(report.exported, Dimensions { width: 10, height: 10 });

        let decoded = decode_png(&delivered.lock().unwrap()[0].1).unwrap();
        assert_eq!(decoded, single_pixel());
    }

    #[tokio::test]
    async fn transparent_canvas_is_exported_whole() {
        let (exporter, delivered) = exporter(Some(PixelBuffer::new(5, 5)));
        let report = exporter.export(request(5)).await.unwrap();
        assert_eq!(report.exported, Dimensions { width: 5, height: 5 });
        assert_eq!(delivered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rasterization_failure_delivers_nothing() {
        let (exporter, delivered) = exporter(None);
        let err = exporter.export(request(256)).await.unwrap_err();
        assert!(matches!(err, ExportError::Rasterization(_)));
        assert!(delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_is_returned() {
        let sink = RefusingSink::default();
        let attempts = Arc::clone(&sink.0);
        let rasterizer = StubRasterizer(Some(single_pixel()));
        let exporter = Exporter::new(Box::new(rasterizer), Box::new(sink));

        let err = exporter.export(request(256)).await.unwrap_err();
        match err {
            ExportError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("expected an I/O error, got {other:?}"),
        }
        assert_eq!(*attempts.lock().unwrap(), 1, "delivery is attempted once and not retried");
    }

    #[test]
    fn zero_size_request_is_rejected() {
        let region = QrRegion { text: "hello".into(), size: 0, style: QrStyle::default() };
        assert!(matches!(ExportRequest::new(region), Err(ExportError::InvalidSize(_))));
    }

    #[test]
    fn stage_names() {
        assert_eq!(ExportStage::Rasterizing.to_string(), "rasterizing");
        assert_eq!(ExportStage::Failed.to_string(), "failed");
    }
}
