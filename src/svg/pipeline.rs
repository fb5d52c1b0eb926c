//! Pass composition.
//!
//! ```ignore
//! let markup = preset_default()
//!     .pipe(RemoveDimensions)
//!     .multipass(true)
//!     .optimize(input)?;
//! ```

use crate::debug;

use super::passes::{
    CleanupAttrs, CollapseGroups, ConvertColors, RemoveComments, RemoveEditorsNsData,
    RemoveEmptyAttrs, RemoveEmptyContainers, RemoveHiddenElems, RemoveMetadata,
    RemoveUnknownsAndDefaults, RemoveUnusedNs, RemoveUselessStrokeAndFill,
};
use super::{Document, SvgError};

/// Upper bound on multipass rounds.
const MAX_PASSES: usize = 10;

/// A named, in-place document rewrite.
pub trait Pass: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, doc: &mut Document);
}

/// Ordered list of passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
    multipass: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass to the end of the pipeline.
    pub fn pipe(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Repeat the whole pipeline while the serialized output keeps shrinking.
    pub fn multipass(mut self, enabled: bool) -> Self {
        self.multipass = enabled;
        self
    }

    /// Pass names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Run all passes over a parsed document.
    pub fn run(&self, doc: &mut Document) {
        let mut previous = usize::MAX;

        for round in 0..MAX_PASSES {
            for pass in &self.passes {
                pass.apply(doc);
            }

            if !self.multipass {
                break;
            }

            let size = doc.to_markup().len();
            if size >= previous {
                debug!("optimize"; "fixed point after {} round(s)", round + 1);
                break;
            }
            previous = size;
        }
    }

    /// Parse, run and serialize.
    pub fn optimize(&self, content: &str) -> Result<String, SvgError> {
        let mut doc = Document::parse(content)?;
        self.run(&mut doc);
        Ok(doc.to_markup())
    }
}

/// The built-in structural cleanup passes, in execution order.
pub fn preset_default() -> Pipeline {
    Pipeline::new()
        .pipe(RemoveComments)
        .pipe(RemoveMetadata)
        .pipe(RemoveEditorsNsData)
        .pipe(CleanupAttrs)
        .pipe(RemoveEmptyAttrs)
        .pipe(ConvertColors)
        .pipe(RemoveUnknownsAndDefaults)
        .pipe(RemoveUselessStrokeAndFill)
        .pipe(RemoveHiddenElems)
        .pipe(RemoveUnusedNs)
        .pipe(CollapseGroups)
        .pipe(RemoveEmptyContainers)
}
