//! SimpleImage
//!
//! An image container with per-pixel channel access.
//!
//! Channel reads and writes go to an [`ImageData`] snapshot of the owned
//! [`Canvas`]. Operations that read the canvas itself (resize, draw, export)
//! flush the snapshot back first.

use std::cell::RefCell;

use simg_canvas::{Canvas, ImageData, ImageDrawing};
use simg_codec::ExportFormat;

use crate::loader::{ImageHandle, make_image, make_image_from_file, make_image_from_size};
use crate::pixel::{Channel, SimplePixel};
use crate::source::ImageSource;
use crate::{Config, ImageError};

/// Initialization progress
#[derive(Debug)]
enum State {
    Pending(ImageSource),
    Initializing,
    Ready,
    Failed(ImageError),
}

/// Owned surface plus the buffer channel accessors work on
#[derive(Debug)]
struct Surface {
    canvas: Canvas,
    buffer: ImageData,
}

impl Surface {
    fn capture(canvas: Canvas) -> Result<Self, ImageError> {
        let buffer = canvas.get_image_data(0, 0, canvas.width(), canvas.height())?;
        Ok(Self { canvas, buffer })
    }

    fn flush(&mut self) {
        self.canvas.put_image_data(&self.buffer, 0, 0);
    }
}

/// An image whose pixels can be read and written channel by channel.
///
/// Construction validates the source synchronously; loading happens in
/// [`ready`](Self::ready). Until then every accessor fails with
/// [`ImageError::NotReady`].
///
/// ```rust,ignore
/// let mut image = SimpleImage::new((256, 256))?;
/// image.ready().await?;
/// image.set_red(1, 1, 255)?;
/// let url = image.to_data_url()?;
/// ```
#[derive(Debug)]
pub struct SimpleImage {
    config: Config,
    state: State,
    surface: RefCell<Option<Surface>>,
}

impl SimpleImage {
    /// Create an image with the default [`Config`]
    pub fn new(source: impl Into<ImageSource>) -> Result<Self, ImageError> {
        Self::with_config(source, Config::default())
    }

    /// Create an image, rejecting invalid sources before any loading starts
    pub fn with_config(source: impl Into<ImageSource>, config: Config) -> Result<Self, ImageError> {
        let source = source.into();
        match &source {
            ImageSource::Size { width, height } => {
                let (width, height) = size_dimensions(*width, *height)?;
                check_dimensions(&config, width as u64, height as u64)?;
            }
            ImageSource::Url(url) if url.trim().is_empty() => {
                return Err(ImageError::UnrecognizedSource("empty URL".into()));
            }
            ImageSource::SimpleImage(other) if !other.is_ready() => {
                return Err(ImageError::NotReady);
            }
            _ => {}
        }

        Ok(Self {
            config,
            state: State::Pending(source),
            surface: RefCell::new(None),
        })
    }

    /// Create an image and wait for it to become ready
    pub async fn load(source: impl Into<ImageSource>) -> Result<Self, ImageError> {
        let mut image = Self::new(source)?;
        image.ready().await?;
        Ok(image)
    }

    /// Finish initialization.
    ///
    /// The first call loads the source; later calls return the same outcome
    /// without loading again.
    pub async fn ready(&mut self) -> Result<(), ImageError> {
        let source = match std::mem::replace(&mut self.state, State::Initializing) {
            State::Pending(source) => source,
            State::Ready => {
                self.state = State::Ready;
                return Ok(());
            }
            State::Failed(err) => {
                self.state = State::Failed(err.clone());
                return Err(err);
            }
            // A previous ready() future was dropped mid-load
            State::Initializing => return Err(ImageError::NotReady),
        };

        let kind = source.kind();
        tracing::debug!(source = kind, "initialising image");

        match self.initialise(source).await {
            Ok(surface) => {
                tracing::debug!(
                    source = kind,
                    width = surface.canvas.width(),
                    height = surface.canvas.height(),
                    "image ready"
                );
                *self.surface.get_mut() = Some(surface);
                self.state = State::Ready;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(source = kind, error = %err, "image initialisation failed");
                self.state = State::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Whether [`ready`](Self::ready) has completed successfully
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn initialise(&self, source: ImageSource) -> Result<Surface, ImageError> {
        let canvas = match source {
            ImageSource::Image(image) => self.render(&image)?,
            ImageSource::Url(url) => self.render(&make_image(&url).await?)?,
            ImageSource::File(file) => self.render(&make_image_from_file(&file).await?)?,
            ImageSource::Size { width, height } => {
                let (width, height) = size_dimensions(width, height)?;
                self.render(&make_image_from_size(width, height).await?)?
            }
            ImageSource::SimpleImage(other) => (*other).into_canvas()?,
            ImageSource::Canvas(canvas) => canvas,
        };

        check_dimensions(&self.config, canvas.width() as u64, canvas.height() as u64)?;
        Surface::capture(canvas)
    }

    /// Draw a decoded image into a fresh canvas at its layout size
    fn render(&self, image: &ImageHandle) -> Result<Canvas, ImageError> {
        let (width, height) = (image.layout_width(), image.layout_height());
        check_dimensions(&self.config, width as u64, height as u64)?;

        let mut canvas = Canvas::new(width, height);
        canvas.set_smoothing(self.config.smoothing);
        canvas.draw_image_scaled(image, 0.0, 0.0, width as f64, height as f64);
        Ok(canvas)
    }

    /// Current width
    pub fn width(&self) -> Result<u32, ImageError> {
        self.with_surface(|s| Ok(s.canvas.width()))
    }

    /// Current height
    pub fn height(&self) -> Result<u32, ImageError> {
        self.with_surface(|s| Ok(s.canvas.height()))
    }

    /// Read one channel of the pixel at (x, y)
    pub fn channel(&self, x: impl Into<f64>, y: impl Into<f64>, channel: Channel) -> Result<u8, ImageError> {
        let (x, y) = (x.into(), y.into());
        self.with_surface(|s| {
            let idx = index(&s.buffer, x, y)?;
            Ok(s.buffer.data()[idx + channel.offset()])
        })
    }

    /// Write one channel of the pixel at (x, y), clamping the value to 0..=255
    pub fn set_channel(
        &self,
        x: impl Into<f64>,
        y: impl Into<f64>,
        channel: Channel,
        value: impl Into<f64>,
    ) -> Result<(), ImageError> {
        let (x, y, value) = (x.into(), y.into(), value.into());
        let mut surface = self.surface.borrow_mut();
        let s = surface.as_mut().ok_or(ImageError::NotReady)?;
        let idx = index(&s.buffer, x, y)?;
        s.buffer.data_mut()[idx + channel.offset()] = clamp(value);
        Ok(())
    }

    pub fn red(&self, x: impl Into<f64>, y: impl Into<f64>) -> Result<u8, ImageError> {
        self.channel(x, y, Channel::Red)
    }

    pub fn set_red(&self, x: impl Into<f64>, y: impl Into<f64>, value: impl Into<f64>) -> Result<(), ImageError> {
        self.set_channel(x, y, Channel::Red, value)
    }

    pub fn green(&self, x: impl Into<f64>, y: impl Into<f64>) -> Result<u8, ImageError> {
        self.channel(x, y, Channel::Green)
    }

    pub fn set_green(&self, x: impl Into<f64>, y: impl Into<f64>, value: impl Into<f64>) -> Result<(), ImageError> {
        self.set_channel(x, y, Channel::Green, value)
    }

    pub fn blue(&self, x: impl Into<f64>, y: impl Into<f64>) -> Result<u8, ImageError> {
        self.channel(x, y, Channel::Blue)
    }

    pub fn set_blue(&self, x: impl Into<f64>, y: impl Into<f64>, value: impl Into<f64>) -> Result<(), ImageError> {
        self.set_channel(x, y, Channel::Blue, value)
    }

    pub fn alpha(&self, x: impl Into<f64>, y: impl Into<f64>) -> Result<u8, ImageError> {
        self.channel(x, y, Channel::Alpha)
    }

    pub fn set_alpha(&self, x: impl Into<f64>, y: impl Into<f64>, value: impl Into<f64>) -> Result<(), ImageError> {
        self.set_channel(x, y, Channel::Alpha, value)
    }

    /// Accessor for the pixel at (x, y); bounds are checked on access
    pub fn pixel(&self, x: impl Into<f64>, y: impl Into<f64>) -> SimplePixel<'_> {
        SimplePixel::new(self, x.into(), y.into())
    }

    /// Copy all four channels of `pixel` into the pixel at (x, y)
    pub fn set_pixel(&self, x: impl Into<f64>, y: impl Into<f64>, pixel: &SimplePixel<'_>) -> Result<(), ImageError> {
        let (x, y) = (x.into(), y.into());
        let rgba = pixel.rgba()?;
        for channel in Channel::ALL {
            self.set_channel(x, y, channel, rgba[channel.offset()])?;
        }
        Ok(())
    }

    /// Accessors for every pixel, row by row
    pub fn pixels(&self) -> Result<Vec<SimplePixel<'_>>, ImageError> {
        let (width, height) = (self.width()?, self.height()?);
        Ok((0..height)
            .flat_map(|y| (0..width).map(move |x| SimplePixel::new(self, x as f64, y as f64)))
            .collect())
    }

    /// Resize, scaling the current content to fill the new size
    pub fn set_size(&mut self, width: impl Into<f64>, height: impl Into<f64>) -> Result<(), ImageError> {
        let (width, height) = (width.into().floor(), height.into().floor());
        if !(width > 0.0 && height > 0.0) {
            return Err(ImageError::InvalidSize { width, height });
        }
        check_dimensions(&self.config, width as u64, height as u64)?;
        let (width, height) = (width as u32, height as u32);

        let smoothing = self.config.smoothing;
        let surface = self.surface.get_mut().as_mut().ok_or(ImageError::NotReady)?;
        surface.flush();

        let mut canvas = Canvas::new(width, height);
        canvas.set_smoothing(smoothing);
        canvas.draw_image_scaled(&surface.canvas, 0.0, 0.0, width as f64, height as f64);

        tracing::debug!(
            from_width = surface.canvas.width(),
            from_height = surface.canvas.height(),
            width,
            height,
            "resized image"
        );
        *surface = Surface::capture(canvas)?;
        Ok(())
    }

    /// Draw onto `target`, scaled to the target's size with the configured
    /// smoothing. The target's own smoothing setting is left as it was.
    pub fn draw(&self, target: &mut Canvas) -> Result<(), ImageError> {
        let mut surface = self.surface.borrow_mut();
        let s = surface.as_mut().ok_or(ImageError::NotReady)?;
        s.flush();

        let (width, height) = (target.width() as f64, target.height() as f64);
        let previous = target.smoothing();
        target.set_smoothing(self.config.smoothing);
        target.draw_image_scaled(&s.canvas, 0.0, 0.0, width, height);
        target.set_smoothing(previous);
        Ok(())
    }

    /// Export with the configured format
    pub fn to_data_url(&self) -> Result<String, ImageError> {
        self.to_data_url_with(self.config.export)
    }

    /// Export with an explicit format
    pub fn to_data_url_with(&self, format: ExportFormat) -> Result<String, ImageError> {
        let mut surface = self.surface.borrow_mut();
        let s = surface.as_mut().ok_or(ImageError::NotReady)?;
        s.flush();
        Ok(s.canvas.to_data_url_with(format)?)
    }

    /// Copy of the current surface, including unflushed channel writes
    pub fn snapshot(&self) -> Result<Canvas, ImageError> {
        let mut surface = self.surface.borrow_mut();
        let s = surface.as_mut().ok_or(ImageError::NotReady)?;
        s.flush();
        Ok(s.canvas.clone())
    }

    fn into_canvas(self) -> Result<Canvas, ImageError> {
        let mut surface = self.surface.into_inner().ok_or(ImageError::NotReady)?;
        surface.flush();
        Ok(surface.canvas)
    }

    fn with_surface<T>(&self, f: impl FnOnce(&Surface) -> Result<T, ImageError>) -> Result<T, ImageError> {
        let surface = self.surface.borrow();
        f(surface.as_ref().ok_or(ImageError::NotReady)?)
    }
}

/// Validate a requested size; fractional parts are dropped
fn size_dimensions(width: f64, height: Option<f64>) -> Result<(u32, u32), ImageError> {
    if !(width.floor() >= 1.0) {
        return Err(ImageError::InvalidWidth(width));
    }
    let height = height.ok_or(ImageError::MissingHeight)?;
    if !(height.floor() >= 1.0) {
        return Err(ImageError::InvalidHeight(height));
    }
    Ok((width.floor().min(u32::MAX as f64) as u32, height.floor().min(u32::MAX as f64) as u32))
}

fn check_dimensions(config: &Config, width: u64, height: u64) -> Result<(), ImageError> {
    let max = config.max_dimension as u64;
    if width > max || height > max {
        return Err(ImageError::TooLarge { width, height, max: config.max_dimension });
    }
    Ok(())
}

/// Flat buffer offset of (x, y): `(x + y * width) * 4`
fn index(buffer: &ImageData, x: f64, y: f64) -> Result<usize, ImageError> {
    let (x, y) = (x.floor(), y.floor());
    let in_bounds = x >= 0.0
        && y >= 0.0
        && x < buffer.width() as f64
        && y < buffer.height() as f64;
    if !in_bounds {
        return Err(ImageError::OutOfBounds { x, y });
    }
    Ok((x as usize + y as usize * buffer.width() as usize) * 4)
}

/// Floor and clamp to a channel value; NaN maps to 0
fn clamp(value: f64) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}
