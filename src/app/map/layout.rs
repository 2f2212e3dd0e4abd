use std::collections::HashMap;

use eframe::egui::{Rect, Vec2, pos2, vec2};

use crate::data::DataSet;

/// Share of the world span used as the smallest paper edge.
const PAPER_BASE_EXTENT: f32 = 0.014;
/// Extra paper size for the most-read document.
const PAPER_READER_GROWTH: f32 = 1.4;
const PAPER_ASPECT: f32 = 0.78;
const MIN_BUBBLE_RADIUS: f32 = 0.035;
const BUBBLE_PADDING: f32 = 1.12;

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct BubbleShape {
    pub uri: String,
    /// Position in the dataset's area list; picks the colour.
    pub index: usize,
    pub center: Vec2,
    pub radius: f32,
}

impl BubbleShape {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center.to_pos2(), Vec2::splat(self.radius * 2.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct PaperShape {
    pub center: Vec2,
    pub size: Vec2,
}

impl PaperShape {
    pub fn rect(&self, scale: f32) -> Rect {
        Rect::from_center_size(self.center.to_pos2(), self.size * scale)
    }
}

/// World-space geometry of the knowledge map, computed once per dataset.
#[derive(Clone, Debug, Default)]
pub(in crate::app) struct MapLayout {
    bubbles: Vec<BubbleShape>,
    papers: HashMap<String, PaperShape>,
    bounds: Option<Rect>,
}

impl MapLayout {
    pub fn new(data: &DataSet) -> Self {
        let positions = data
            .papers
            .iter()
            .map(|paper| pos2(paper.position[0], paper.position[1]))
            .chain(data.areas.iter().map(|area| pos2(area.position[0], area.position[1])))
            .collect::<Vec<_>>();
        if positions.is_empty() {
            return Self::default();
        }

        let point_bounds = Rect::from_points(&positions);
        let span = point_bounds.width().max(point_bounds.height()).max(1.0);

        let max_readers = data
            .papers
            .iter()
            .map(|paper| paper.num_readers)
            .max()
            .unwrap_or(0);

        let papers = data
            .papers
            .iter()
            .map(|paper| {
                let base = span * PAPER_BASE_EXTENT;
                let share = reader_share(paper.num_readers, max_readers);
                let edge = base * (1.0 + PAPER_READER_GROWTH * share);
                let shape = PaperShape {
                    center: vec2(paper.position[0], paper.position[1]),
                    size: vec2(edge * PAPER_ASPECT, edge),
                };
                (paper.safe_id.clone(), shape)
            })
            .collect::<HashMap<_, _>>();

        let bubbles = data
            .areas
            .iter()
            .enumerate()
            .map(|(index, area)| {
                let center = vec2(area.position[0], area.position[1]);
                let reach = area
                    .papers
                    .iter()
                    .filter_map(|id| papers.get(id))
                    .map(|shape| (shape.center - center).length() + shape.size.length() * 0.5)
                    .fold(0.0_f32, f32::max);
                BubbleShape {
                    uri: area.uri.clone(),
                    index,
                    center,
                    radius: (reach * BUBBLE_PADDING).max(span * MIN_BUBBLE_RADIUS),
                }
            })
            .collect::<Vec<_>>();

        let bounds = bubbles
            .iter()
            .map(BubbleShape::bounds)
            .chain(papers.values().map(|shape| shape.rect(1.0)))
            .reduce(|a, b| a.union(b));

        Self {
            bubbles,
            papers,
            bounds,
        }
    }

    pub fn bubble(&self, uri: &str) -> Option<&BubbleShape> {
        self.bubbles.iter().find(|bubble| bubble.uri == uri)
    }

    pub fn paper(&self, safe_id: &str) -> Option<&PaperShape> {
        self.papers.get(safe_id)
    }

    /// Everything on the map.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// The region shown while `uri` is zoomed.
    pub fn bubble_bounds(&self, uri: &str) -> Option<Rect> {
        self.bubble(uri).map(BubbleShape::bounds)
    }
}

fn reader_share(readers: u64, max_readers: u64) -> f32 {
    if max_readers == 0 {
        return 0.0;
    }
    ((readers as f64 / max_readers as f64).sqrt() as f32).clamp(0.0, 1.0)
}
