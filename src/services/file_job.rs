use crate::imaging::encode_mask_png;
use crate::models::ColorizeOverrides;
use crate::services::{ColorizeOutcome, ColorizeService};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// A colorization driven by files on disk (the `colorize` command)
#[derive(Debug, Clone)]
pub struct FileJob {
    pub reference: PathBuf,
    pub scribble: PathBuf,
    /// Defaults to `<reference stem>_result.png` next to the reference
    pub output: Option<PathBuf>,
    /// Optional grayscale PNG of the mark mask
    pub mask: Option<PathBuf>,
    pub overrides: ColorizeOverrides,
}

impl FileJob {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.reference))
    }

    /// Read both inputs, colorize and write the result (and mask, if asked).
    pub fn run(&self, service: &ColorizeService) -> anyhow::Result<ColorizeOutcome> {
        let reference = std::fs::read(&self.reference)
            .with_context(|| format!("Failed to read reference {}", self.reference.display()))?;
        let scribble = std::fs::read(&self.scribble)
            .with_context(|| format!("Failed to read scribble {}", self.scribble.display()))?;

        let outcome = service.colorize_blocking(&reference, &scribble, &self.overrides)?;

        let output = self.output_path();
        std::fs::write(&output, &outcome.png)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!(path = %output.display(), bytes = outcome.png.len(), "Wrote result");

        if let Some(mask_path) = &self.mask {
            let png = encode_mask_png(&outcome.mask)?;
            std::fs::write(mask_path, png)
                .with_context(|| format!("Failed to write {}", mask_path.display()))?;
            tracing::info!(path = %mask_path.display(), "Wrote mark mask");
        }

        Ok(outcome)
    }
}

/// `photo.png` becomes `photo_result.png` in the same directory.
pub fn default_output_path(reference: &Path) -> PathBuf {
    let stem = reference
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    reference.with_file_name(format!("{stem}_result.png"))
}
