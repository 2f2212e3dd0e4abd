use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2, pos2, vec2,
};

use crate::data::{Area, Paper, filter_data};
use crate::events::{self, HOVER_ENLARGE_FACTOR, MapContext};
use crate::state::{Action, sort_by_order};
use crate::util::{format_count, shorten};

use super::super::ViewModel;
use super::super::props::{
    BubbleVisual, PaperVisual, bubble_visual, paper_visual, split_active_papers,
};
use super::super::render_utils::{
    SELECTED_COLOR, TEXT_COLOR, area_color, circle_visible, draw_background, fade_color,
    readers_color, with_alpha, world_to_screen,
};
use super::camera::Viewport;
use super::interaction::{ScreenBubble, ScreenPaper, bubble_at, paper_at};
use super::layout::PaperShape;

const MIN_PAPER_EDGE: f32 = 3.0;
const PAPER_TITLE_MIN_HEIGHT: f32 = 46.0;
const PAPER_TITLE_LENGTH: usize = 90;
const BUBBLE_TITLE_LENGTH: usize = 60;

struct Projection {
    rect: Rect,
    pan: Vec2,
    scale: f32,
}

impl Projection {
    fn new(rect: Rect, viewport: Viewport) -> Self {
        Self {
            rect,
            pan: viewport.pan(rect),
            scale: viewport.scale(rect),
        }
    }

    fn point(&self, world: Vec2) -> Pos2 {
        world_to_screen(self.rect, self.pan, self.scale, world)
    }
}

fn paint_paper(
    painter: &Painter,
    projection: &Projection,
    paper: &Paper,
    shape: &PaperShape,
    visual: PaperVisual,
    max_readers: u64,
    zoom: bool,
) -> Option<Rect> {
    let center = projection.point(shape.center);
    let size = (shape.size * projection.scale * visual.scale).max(Vec2::splat(MIN_PAPER_EDGE));
    let rect = Rect::from_center_size(center, size);
    if !circle_visible(projection.rect, center, size.length() * 0.5) {
        return None;
    }

    let mut fill = readers_color(paper.num_readers, max_readers);
    let mut outline = Color32::from_gray(120);
    if visual.selected {
        outline = SELECTED_COLOR;
    } else if visual.hovered {
        outline = Color32::from_gray(40);
    }
    if visual.faded {
        fill = fade_color(fill, 0.35);
        outline = fade_color(outline, 0.35);
    }

    let ear = (size.x.min(size.y) * 0.22).max(1.0);
    let outline_width = if visual.selected { 2.2 } else { 1.0 };
    painter.add(Shape::convex_polygon(
        vec![
            rect.min,
            pos2(rect.max.x - ear, rect.min.y),
            pos2(rect.max.x, rect.min.y + ear),
            rect.max,
            pos2(rect.min.x, rect.max.y),
        ],
        fill,
        Stroke::new(outline_width, outline),
    ));

    if zoom && size.y >= PAPER_TITLE_MIN_HEIGHT {
        let inner = rect.shrink(3.0);
        let galley = painter.layout(
            shorten(&paper.title, PAPER_TITLE_LENGTH),
            FontId::proportional(10.5),
            TEXT_COLOR,
            inner.width().max(1.0),
        );
        painter.with_clip_rect(inner).galley(inner.min, galley, TEXT_COLOR);
    }

    Some(rect)
}

fn paint_bubble(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    color: Color32,
    visual: BubbleVisual,
    title: &str,
) {
    let alpha = if visual.zoomed {
        28
    } else if visual.highlighted {
        120
    } else if visual.hovered {
        90
    } else if visual.dimmed {
        12
    } else {
        55
    };
    painter.circle_filled(center, radius, with_alpha(color, alpha));

    let stroke_width = if visual.hovered || visual.zoomed || visual.highlighted {
        2.4
    } else {
        1.2
    };
    let stroke_color = if visual.dimmed {
        with_alpha(color, 60)
    } else {
        color
    };
    painter.circle_stroke(center, radius, Stroke::new(stroke_width, stroke_color));

    if !visual.show_label || visual.hovered {
        return;
    }

    let font_size = (radius * 0.16).clamp(11.0, 18.0);
    let galley = painter.layout(
        shorten(title, BUBBLE_TITLE_LENGTH),
        FontId::proportional(font_size),
        TEXT_COLOR,
        (radius * 1.5).max(40.0),
    );
    let anchor = if visual.zoomed {
        center - vec2(galley.size().x * 0.5, radius - 8.0)
    } else {
        center - galley.size() * 0.5
    };
    painter.galley(anchor, galley, TEXT_COLOR);
}

impl ViewModel {
    fn map_target(&self) -> Viewport {
        let zoomed = self
            .store
            .state()
            .zoomed_uri()
            .and_then(|uri| self.layout.bubble_bounds(uri));

        zoomed
            .or_else(|| self.layout.bounds())
            .map(Viewport::fit)
            .unwrap_or_default()
    }

    pub(in crate::app) fn report_resize(&self, rect: Rect, actions: &mut Vec<Action>) {
        let chart = self.store.state().chart;
        if (chart.width - rect.width()).abs() > 0.5 || (chart.height - rect.height()).abs() > 0.5 {
            actions.push(Action::Resize {
                width: rect.width(),
                height: rect.height(),
            });
        }
    }

    pub(in crate::app) fn draw_map(&mut self, ui: &mut Ui, actions: &mut Vec<Action>) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);
        self.report_resize(rect, actions);

        let target = self.map_target();
        let now = ui.input(|input| input.time);
        if let Some(token) = self
            .camera
            .update(self.store.state().animation.current(), target, now)
        {
            actions.push(events::animation_callback(token));
        }
        let projection = Projection::new(rect, self.camera.viewport());

        let state = self.store.state();
        let data = &self.data;
        let layout = &self.layout;
        let max_readers = data
            .papers
            .iter()
            .map(|paper| paper.num_readers)
            .max()
            .unwrap_or(0);

        let visible = filter_data(
            &data.papers,
            &state.search_settings(),
            &state.filter_settings(),
        );
        let (inactive, active) = split_active_papers(&visible, state);

        if !state.zoom {
            for paper in sort_by_order(&inactive, state.paper_order.order(), |paper| {
                paper.safe_id.as_str()
            }) {
                if let Some(shape) = layout.paper(&paper.safe_id) {
                    paint_paper(
                        &painter,
                        &projection,
                        paper,
                        shape,
                        paper_visual(paper, state),
                        max_readers,
                        false,
                    );
                }
            }
        }

        let mut screen_bubbles = Vec::with_capacity(data.areas.len());
        for area in sort_by_order(&data.areas, state.bubble_order.order(), |area| {
            area.uri.as_str()
        }) {
            let Some(bubble) = layout.bubble(&area.uri) else {
                continue;
            };
            let center = projection.point(bubble.center);
            let radius = bubble.radius * projection.scale;
            if !circle_visible(rect, center, radius) {
                continue;
            }

            paint_bubble(
                &painter,
                center,
                radius,
                area_color(bubble.index),
                bubble_visual(area, state),
                &area.title,
            );
            screen_bubbles.push(ScreenBubble {
                uri: area.uri.as_str(),
                center,
                radius,
            });
        }

        let mut screen_papers = Vec::with_capacity(active.len());
        for paper in sort_by_order(&active, state.paper_order.order(), |paper| {
            paper.safe_id.as_str()
        }) {
            let Some(shape) = layout.paper(&paper.safe_id) else {
                continue;
            };
            if let Some(paper_rect) = paint_paper(
                &painter,
                &projection,
                paper,
                shape,
                paper_visual(paper, state),
                max_readers,
                state.zoom,
            ) {
                screen_papers.push(ScreenPaper {
                    safe_id: paper.safe_id.as_str(),
                    rect: paper_rect,
                });
            }
        }

        if visible.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &state.localization.no_results,
                FontId::proportional(15.0),
                TEXT_COLOR,
            );
        }

        let pointer = response.hover_pos();
        let hovered_paper = pointer
            .and_then(|pointer| paper_at(&screen_papers, pointer))
            .and_then(|safe_id| data.paper(safe_id));
        let hovered_bubble = pointer
            .and_then(|pointer| bubble_at(&screen_bubbles, pointer))
            .and_then(|uri| data.area(uri));

        if hovered_paper.is_some() || hovered_bubble.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if let Some(paper) = hovered_paper {
            let mut panel_text = paper.title.clone();
            if let Some(year) = &paper.year {
                panel_text.push_str(&format!("  |  {year}"));
            }
            if let Some(unit) = state.list.base_unit.as_deref()
                && !state.list.is_content_based
            {
                panel_text.push_str(&format!("  |  {} {unit}", format_count(paper.num_readers)));
            }
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                shorten(&panel_text, 140),
                FontId::proportional(13.0),
                TEXT_COLOR,
            );
        }

        let ctx = MapContext::new(state);
        track_hover(
            &ctx,
            state.paper_order.hovered(),
            pointer.is_some(),
            hovered_paper,
            hovered_bubble,
            actions,
        );

        if response.double_clicked() {
            if let Some(area) = hovered_bubble {
                actions.extend(events::bubble_double_click(&ctx, area));
            }
        } else if response.clicked() {
            let paper_actions = hovered_paper
                .map(|paper| events::paper_click(&ctx, paper, &data.areas))
                .unwrap_or_default();

            if !paper_actions.is_empty() {
                actions.extend(paper_actions);
            } else if let Some(area) = hovered_bubble {
                actions.extend(events::bubble_click(&ctx, area));
            } else {
                actions.extend(events::chart_click(&ctx));
            }
        }
    }
}

fn track_hover(
    ctx: &MapContext<'_>,
    hovered_paper_id: Option<&str>,
    pointer_inside: bool,
    hovered_paper: Option<&Paper>,
    hovered_bubble: Option<&Area>,
    actions: &mut Vec<Action>,
) {
    match hovered_paper {
        Some(paper) if hovered_paper_id != Some(paper.safe_id.as_str()) => {
            actions.push(events::paper_mouse_over(paper, HOVER_ENLARGE_FACTOR));
        }
        None if hovered_paper_id.is_some() => actions.push(events::paper_mouse_out()),
        _ => {}
    }

    if !pointer_inside {
        return;
    }
    match hovered_bubble {
        Some(area) => actions.extend(events::bubble_mouse_over(ctx, area)),
        None => actions.extend(events::chart_mouse_over(ctx)),
    }
}
