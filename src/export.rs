//! Writing rendered variants to disk as `emoji-<id>.png`.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::render::VariantOutput;

/// Spacing between consecutive exports in a "download all".
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

/// One scheduled export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Position of the variant in the rendered list.
    pub index: usize,
    /// Target file name.
    pub file_name: String,
    /// Time after the start of the batch at which this job runs.
    pub delay: Duration,
}

/// File name for a variant id: `emoji-<id>.png`.
#[must_use]
pub fn file_name_for(id: &str) -> String {
    format!("emoji-{id}.png")
}

/// Schedule one export per variant, in list order, `stagger` apart.
///
/// Delays saturate at [`Duration::MAX`] instead of overflowing.
#[must_use]
pub fn plan_download_all(variants: &[VariantOutput], stagger: Duration) -> Vec<ExportJob> {
    (0u32..)
        .zip(variants)
        .enumerate()
        .map(|(index, (step, variant))| ExportJob {
            index,
            file_name: file_name_for(variant.id),
            delay: stagger.checked_mul(step).unwrap_or(Duration::MAX),
        })
        .collect()
}

/// Write a single variant's PNG into `dir`.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be written.
pub fn write_variant(variant: &VariantOutput, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(file_name_for(variant.id));
    std::fs::write(&path, &variant.png)?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}

/// Export every variant into `dir`, creating it if needed.
///
/// Jobs run in list order; each one waits until its scheduled delay has
/// passed since the start of the batch.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] on the first directory or file write failure.
pub fn download_all(
    variants: &[VariantOutput],
    dir: &Path,
    stagger: Duration,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let start = Instant::now();
    let mut written = Vec::with_capacity(variants.len());
    for job in plan_download_all(variants, stagger) {
        if let Some(wait) = job.delay.checked_sub(start.elapsed()) {
            std::thread::sleep(wait);
        }
        written.push(write_variant(&variants[job.index], dir)?);
    }

    log::info!("exported {} variants to {}", written.len(), dir.display());
    Ok(written)
}
