use eframe::egui::{Pos2, Rect};

/// A bubble as drawn this frame, in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ScreenBubble<'a> {
    pub uri: &'a str,
    pub center: Pos2,
    pub radius: f32,
}

/// A paper as drawn this frame, in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ScreenPaper<'a> {
    pub safe_id: &'a str,
    pub rect: Rect,
}

/// Topmost paper under `pointer`. `papers` is in draw order.
pub(in crate::app) fn paper_at<'a>(papers: &[ScreenPaper<'a>], pointer: Pos2) -> Option<&'a str> {
    papers
        .iter()
        .rev()
        .find(|paper| paper.rect.contains(pointer))
        .map(|paper| paper.safe_id)
}

/// Topmost bubble under `pointer`. `bubbles` is in draw order.
pub(in crate::app) fn bubble_at<'a>(bubbles: &[ScreenBubble<'a>], pointer: Pos2) -> Option<&'a str> {
    bubbles
        .iter()
        .rev()
        .find(|bubble| bubble.center.distance(pointer) <= bubble.radius)
        .map(|bubble| bubble.uri)
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn later_bubble_wins_overlap() {
        let bubbles = [
            ScreenBubble {
                uri: "a",
                center: pos2(0.0, 0.0),
                radius: 10.0,
            },
            ScreenBubble {
                uri: "b",
                center: pos2(8.0, 0.0),
                radius: 10.0,
            },
        ];
        assert_eq!(bubble_at(&bubbles, pos2(4.0, 0.0)), Some("b"));
        assert_eq!(bubble_at(&bubbles, pos2(-8.0, 0.0)), Some("a"));
        assert_eq!(bubble_at(&bubbles, pos2(40.0, 0.0)), None);
    }

    #[test]
    fn paper_hit_uses_rect() {
        let papers = [
            ScreenPaper {
                safe_id: "p3",
                rect: Rect::from_center_size(pos2(0.0, 0.0), vec2(4.0, 6.0)),
            },
            ScreenPaper {
                safe_id: "p7",
                rect: Rect::from_center_size(pos2(1.0, 0.0), vec2(4.0, 6.0)),
            },
        ];
        assert_eq!(paper_at(&papers, pos2(0.5, 2.0)), Some("p7"));
        assert_eq!(paper_at(&papers, pos2(-1.8, 0.0)), Some("p3"));
        assert_eq!(paper_at(&papers, pos2(0.0, 4.0)), None);
    }
}
