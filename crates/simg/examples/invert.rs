//! Example: invert the colours of an image
//!
//! cargo run -p simg --example invert -- input.png [output.png]

use anyhow::{Context, Result};
use simg::{SimpleImage, codec::DataUrl};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next().context("usage: invert <input> [output.png]")?;
    let output = args.next().unwrap_or_else(|| "inverted.png".to_string());

    smol::block_on(async {
        let image = SimpleImage::load(input.as_str())
            .await
            .with_context(|| format!("failed to load {input}"))?;

        for pixel in image.pixels()? {
            pixel.set_red(255 - pixel.red()?)?;
            pixel.set_green(255 - pixel.green()?)?;
            pixel.set_blue(255 - pixel.blue()?)?;
        }

        let url = image.to_data_url()?;
        let png = DataUrl::parse(&url)?.into_data();
        smol::fs::write(&output, png)
            .await
            .with_context(|| format!("failed to write {output}"))?;

        println!(
            "simg v{}: inverted {}x{} image into {output}",
            simg::VERSION,
            image.width()?,
            image.height()?
        );
        Ok(())
    })
}
