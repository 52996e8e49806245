/// Ordered, append-only set of sticker glyphs shown on the toolbar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickerCatalog {
    glyphs: Vec<String>,
}

impl StickerCatalog {
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for glyph in glyphs {
            let glyph: String = glyph.into();
            catalog.add(Some(&glyph));
        }
        catalog
    }

    /// Add user-entered text as a sticker.
    ///
    /// `None` means the prompt was cancelled. Cancelled, blank, and duplicate
    /// entries leave the catalog untouched and return false.
    pub fn add(&mut self, text: Option<&str>) -> bool {
        let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
            return false;
        };
        if self.contains(text) {
            return false;
        }
        self.glyphs.push(text.to_owned());
        true
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.glyphs.iter().any(|g| g == glyph)
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
