//! Sprite assembly shared by the batch and HTTP drivers.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::debug;
use crate::svg::{Document, Pipeline, SvgError};

use super::optimize::preset;
use super::rewrite::{ColorRewrite, SymbolRewrite};
use super::{Palette, SpriteError, SymbolId};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Optimizer preset plus palette, built once and shared across images.
pub struct Sprite {
    pipeline: Pipeline,
    palette: Palette,
}

impl Sprite {
    pub fn new(palette: Palette) -> Result<Self, SpriteError> {
        let pipeline = preset()?;
        debug!("sprite"; "passes: {}", pipeline.names().join(", "));
        Ok(Self { pipeline, palette })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Run the structural optimizer alone.
    pub fn optimize(&self, content: &str) -> Result<String, SvgError> {
        self.pipeline.optimize(content)
    }

    /// Optimize one image and turn it into a `<symbol>`.
    ///
    /// The rewriters see the re-parsed optimizer output, never the raw input.
    pub fn symbol(&self, id: &SymbolId, content: &str) -> Result<String, SpriteError> {
        let optimize_err = |source: SvgError| SpriteError::Optimize {
            id: id.to_string(),
            source,
        };
        let optimized = self.optimize(content).map_err(optimize_err)?;
        let mut doc = Document::parse(&optimized).map_err(optimize_err)?;

        let colors = ColorRewrite::new(&self.palette);
        let symbol = SymbolRewrite::new(id);
        doc.walk_mut(&mut |elem| {
            colors.rewrite(elem);
            symbol.rewrite(elem);
        });

        Ok(doc.to_markup())
    }

    /// Build the sprite document. Symbols keep the input order; any failure
    /// fails the whole batch.
    pub fn assemble<S>(&self, images: &[(SymbolId, S)]) -> Result<String, SpriteError>
    where
        S: AsRef<str> + Sync,
    {
        self.assemble_with(images, |_| {})
    }

    /// [`Sprite::assemble`], calling `on_symbol` as each symbol completes.
    pub fn assemble_with<S, F>(
        &self,
        images: &[(SymbolId, S)],
        on_symbol: F,
    ) -> Result<String, SpriteError>
    where
        S: AsRef<str> + Sync,
        F: Fn(&SymbolId) + Sync,
    {
        let mut seen = HashSet::with_capacity(images.len());
        for (id, _) in images {
            if !seen.insert(id) {
                return Err(SpriteError::DuplicateId(id.to_string()));
            }
        }

        let symbols = images
            .par_iter()
            .map(|(id, content)| {
                let symbol = self.symbol(id, content.as_ref())?;
                on_symbol(id);
                Ok::<_, SpriteError>(symbol)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("sprite"; "assembled {} symbol(s)", symbols.len());
        Ok(wrap(&symbols.concat()))
    }
}

/// Wrap concatenated symbols in the hidden sprite root.
fn wrap(symbols: &str) -> String {
    format!(r#"<svg xmlns="{SVG_NAMESPACE}" style="display:none">{symbols}</svg>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::derive;

    fn sprite() -> Sprite {
        Sprite::new(Palette::default()).unwrap()
    }

    #[test]
    fn test_empty_sprite() {
        let images: &[(SymbolId, &str)] = &[];
        assert_eq!(
            sprite().assemble(images).unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:none"></svg>"#
        );
    }

    #[test]
    fn test_symbol() {
        let id = derive("Clock 2_colors.svg").unwrap();
        let input = concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">"#,
            r#"<defs><style>.cls-1{fill:#56a3bc}</style></defs>"#,
            r#"<circle class="cls-1" cx="12" cy="12" r="10"/>"#,
            r##"<path d="M12 6v6" stroke="#707070" fill="none"/>"##,
            r##"<rect width="2" height="2" fill="#123456"/>"##,
            r#"</svg>"#,
        );
        assert_eq!(
            sprite().symbol(&id, input).unwrap(),
            concat!(
                r#"<symbol viewBox="0 0 24 24" id="clock-2-colors">"#,
                r#"<circle cx="12" cy="12" r="10" style="fill: var(--svg-ac)"/>"#,
                r#"<path d="M12 6v6" fill="none" style="stroke: var(--svg-fg)"/>"#,
                r#"<rect width="2" height="2"/>"#,
                r#"</symbol>"#,
            )
        );
    }

    #[test]
    fn test_symbol_from_illustrator_export() {
        let id = derive("clock.svg").unwrap();
        let input = r##"<?xml version="1.0" encoding="utf-8"?>
<!-- Generator: Adobe Illustrator 24.0.0, SVG Export Plug-In  -->
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd" [
	<!ENTITY ns_extend "http://ns.adobe.com/Extensibility/1.0/">
	<!ENTITY ns_ai "http://ns.adobe.com/AdobeIllustrator/10.0/">
]>
<svg version="1.1" xmlns:x="&ns_extend;" xmlns:i="&ns_ai;" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
<path fill="#56A3BC" d="M0 0h24v24H0z"/>
</svg>
"##;
        assert_eq!(
            sprite().symbol(&id, input).unwrap(),
            r#"<symbol viewBox="0 0 24 24" id="clock"><path d="M0 0h24v24H0z" style="fill: var(--svg-ac)"/></symbol>"#
        );
    }

    #[test]
    fn test_assemble_keeps_order() {
        let images = vec![
            (SymbolId::from_index(0), r#"<svg viewBox="0 0 1 1"><path d="M0 0"/></svg>"#),
            (SymbolId::from_index(1), r#"<svg viewBox="0 0 2 2"><path d="M1 1"/></svg>"#),
        ];
        let sprite = sprite().assemble(&images).unwrap();
        let first = sprite.find(r#"id="svg-0""#).unwrap();
        let second = sprite.find(r#"id="svg-1""#).unwrap();
        assert!(first < second);
        assert_eq!(sprite.matches("<symbol").count(), 2);
        assert!(sprite.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:none"><symbol"#));
    }

    #[test]
    fn test_assemble_rejects_duplicates() {
        let images = vec![
            (derive("a b.svg").unwrap(), "<svg/>"),
            (derive("A_B.svg").unwrap(), "<svg/>"),
        ];
        assert!(matches!(
            sprite().assemble(&images),
            Err(SpriteError::DuplicateId(id)) if id == "a-b"
        ));
    }

    #[test]
    fn test_assemble_fails_on_any_malformed_image() {
        let images = vec![
            (SymbolId::from_index(0), "<svg/>"),
            (SymbolId::from_index(1), "<svg><g></svg>"),
        ];
        assert!(matches!(
            sprite().assemble(&images),
            Err(SpriteError::Optimize { id, .. }) if id == "svg-1"
        ));
    }

    #[test]
    fn test_assemble_with_reports_each_symbol() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let images = vec![
            (SymbolId::from_index(0), "<svg/>"),
            (SymbolId::from_index(1), "<svg/>"),
            (SymbolId::from_index(2), "<svg/>"),
        ];
        let done = AtomicUsize::new(0);
        sprite()
            .assemble_with(&images, |_| {
                done.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert_eq!(done.load(Ordering::Relaxed), 3);
    }
}
