//! Batch build: icons directory → `sprite.svg` + demo page.
//!
//! Phases:
//! - **Collect** - every entry of `build.input`, sorted by file name
//! - **Read** - file contents, in parallel
//! - **Assemble** - optimize + rewrite each image into a `<symbol>`
//! - **Write** - raw sprite and demo page into `build.output`

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{BuildConfig, SpriteConfig},
    embed::build::{DEMO_HTML, DemoVars},
    log,
    logger::ProgressLine,
    sprite::{Sprite, SymbolId, derive},
};

/// Run the batch build. Any failure aborts before anything is written.
pub fn build_sprite(config: &SpriteConfig, sprite: &Sprite) -> Result<()> {
    let build = &config.build;

    let files = collect_files(&build.input)?;
    if files.is_empty() {
        log!("warning"; "no files in {}", build.input.display());
    }

    let progress = ProgressLine::new(&[("read", files.len()), ("svg", files.len())]);
    let images = read_images(&files, &progress)?;
    let markup = sprite
        .assemble_with(&images, |_| progress.inc("svg"))
        .context("Failed to assemble sprite")?;
    progress.finish();

    warn_missing_preview(build, &images);
    write_outputs(build, markup)?;

    let output = build.output.strip_prefix(&config.root).unwrap_or(&build.output);
    log!("build"; "{} symbol(s) → {}", images.len(), output.display());
    Ok(())
}

/// List input entries with their derived ids, sorted by file name.
fn collect_files(input: &Path) -> Result<Vec<(PathBuf, SymbolId)>> {
    let entries = fs::read_dir(input)
        .with_context(|| format!("Failed to read input directory {}", input.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", input.display()))?
            .path();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Non UTF-8 file name: {}", path.display()))?;
        let id = derive(name).with_context(|| format!("Invalid icon name: {}", path.display()))?;
        files.push((path, id));
    }

    files.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn read_images(
    files: &[(PathBuf, SymbolId)],
    progress: &ProgressLine,
) -> Result<Vec<(SymbolId, String)>> {
    files
        .par_iter()
        .map(|(path, id)| {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            progress.inc("read");
            Ok((id.clone(), content))
        })
        .collect()
}

fn warn_missing_preview(build: &BuildConfig, images: &[(SymbolId, String)]) {
    for id in &build.preview {
        if !images.iter().any(|(symbol, _)| symbol.as_str() == id) {
            log!("warning"; "preview symbol `{}` is not in the sprite", id);
        }
    }
}

fn write_outputs(build: &BuildConfig, markup: String) -> Result<()> {
    fs::create_dir_all(&build.output)
        .with_context(|| format!("Failed to create {}", build.output.display()))?;

    let sprite_path = build.sprite_path();
    fs::write(&sprite_path, &markup)
        .with_context(|| format!("Failed to write {}", sprite_path.display()))?;

    let html_path = build.html_path();
    let html = DEMO_HTML.render(&DemoVars {
        sprite: markup,
        preview: build.preview.clone(),
    });
    fs::write(&html_path, html)
        .with_context(|| format!("Failed to write {}", html_path.display()))?;

    Ok(())
}
