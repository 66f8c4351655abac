/// Relationship ID mapper for tracking image relationships while a
/// presentation is packaged.
///
/// Slide parts are related to their images before slide XML is generated, so
/// the XML can reference the actual relationship IDs.
use std::collections::HashMap;

/// Maps slide images to their relationship IDs, per slide.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    /// (slide_index, image_index_in_slide) -> relationship ID
    image_ids: HashMap<(usize, usize), String>,
    /// slide_index -> background image relationship ID
    background_ids: HashMap<usize, String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the relationship of the `image_index`-th picture of a slide.
    pub fn add_image(&mut self, slide_index: usize, image_index: usize, rel_id: String) {
        self.image_ids.insert((slide_index, image_index), rel_id);
    }

    pub fn image_id(&self, slide_index: usize, image_index: usize) -> Option<&str> {
        self.image_ids
            .get(&(slide_index, image_index))
            .map(|s| s.as_str())
    }

    pub fn add_background(&mut self, slide_index: usize, rel_id: String) {
        self.background_ids.insert(slide_index, rel_id);
    }

    pub fn background_id(&self, slide_index: usize) -> Option<&str> {
        self.background_ids.get(&slide_index).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_per_slide() {
        let mut mapper = RelationshipMapper::new();
        mapper.add_image(0, 0, "rId2".to_string());
        mapper.add_image(1, 0, "rId3".to_string());
        mapper.add_background(1, "rId2".to_string());

        assert_eq!(mapper.image_id(0, 0), Some("rId2"));
        assert_eq!(mapper.image_id(1, 0), Some("rId3"));
        assert_eq!(mapper.image_id(0, 1), None);
        assert_eq!(mapper.background_id(0), None);
        assert_eq!(mapper.background_id(1), Some("rId2"));
    }
}
