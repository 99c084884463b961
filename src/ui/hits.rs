use ratatui::layout::{Position, Rect};

use crate::template::TemplateOrigin;

/// What a mouse click resolves to. Rebuilt on every rendered frame;
/// later entries win, so overlays can shadow the content below them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Tab { index: usize },
    EditTemplate { origin: TemplateOrigin, name: String },
    CreateTemplate { origin: TemplateOrigin, name: String },
}

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    entries: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.entries.push((area, target));
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<&HitTarget> {
        let position = Position::new(column, row);
        self.entries
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{HitMap, HitTarget};

    #[test]
    fn hit_returns_the_topmost_target() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 2), HitTarget::Tab { index: 0 });
        hits.push(Rect::new(2, 0, 4, 1), HitTarget::Tab { index: 1 });

        assert_eq!(hits.hit(3, 0), Some(&HitTarget::Tab { index: 1 }));
        assert_eq!(hits.hit(8, 1), Some(&HitTarget::Tab { index: 0 }));
        assert_eq!(hits.hit(30, 5), None);
    }

    #[test]
    fn empty_areas_are_never_registered() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 0, 1), HitTarget::Tab { index: 0 });
        assert!(hits.is_empty());
    }
}
