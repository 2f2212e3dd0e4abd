use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, pos2, vec2};

use crate::data::StreamBand;
use crate::events::{self, MapContext};
use crate::state::Action;

use super::ViewModel;
use super::render_utils::{
    TEXT_COLOR, area_color, blend_color, draw_background, fade_color, with_alpha,
};

/// Interpolation steps drawn between two neighbouring years.
const SEGMENT_STEPS: usize = 12;
const MARGIN_LEFT: f32 = 24.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 16.0;
const AXIS_HEIGHT: f32 = 28.0;
const MIN_LABEL_HEIGHT: f32 = 16.0;
const MIN_YEAR_LABEL_GAP: f32 = 44.0;

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Band of one stream at a fractional year index.
fn band_at(bands: &[StreamBand], position: f32) -> Option<StreamBand> {
    let last = bands.len().checked_sub(1)?;
    let position = position.clamp(0.0, last as f32);
    let index = (position.floor() as usize).min(last);
    let next = (index + 1).min(last);
    let t = smoothstep(position - index as f32);

    let from = bands[index];
    let to = bands[next];
    Some(StreamBand {
        lower: from.lower + (to.lower - from.lower) * t,
        upper: from.upper + (to.upper - from.upper) * t,
    })
}

/// Index of the stream covering `value` at `position`.
fn stream_at(bands: &[Vec<StreamBand>], position: f32, value: f32) -> Option<usize> {
    bands.iter().position(|stream| {
        band_at(stream, position).is_some_and(|band| {
            band.upper > band.lower && value >= band.lower && value <= band.upper
        })
    })
}

/// Maps year indices and stacked values onto the plot area.
#[derive(Clone, Copy, Debug)]
struct StreamLayout {
    plot: Rect,
    years: usize,
}

impl StreamLayout {
    fn new(rect: Rect, years: usize) -> Self {
        let plot = Rect::from_min_max(
            pos2(rect.left() + MARGIN_LEFT, rect.top() + MARGIN_TOP),
            pos2(rect.right() - MARGIN_RIGHT, rect.bottom() - AXIS_HEIGHT),
        );
        Self { plot, years }
    }

    fn span(&self) -> f32 {
        self.years.saturating_sub(1).max(1) as f32
    }

    fn x(&self, position: f32) -> f32 {
        if self.years <= 1 {
            return self.plot.center().x;
        }
        self.plot.left() + position / self.span() * self.plot.width()
    }

    fn y(&self, value: f32) -> f32 {
        self.plot.center().y - value * self.plot.height()
    }

    fn position_at(&self, x: f32) -> f32 {
        if self.years <= 1 {
            return 0.0;
        }
        ((x - self.plot.left()) / self.plot.width() * self.span()).clamp(0.0, self.span())
    }

    fn value_at(&self, y: f32) -> f32 {
        (self.plot.center().y - y) / self.plot.height().max(1.0)
    }

    fn point(&self, position: f32, value: f32) -> Pos2 {
        pos2(self.x(position), self.y(value))
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_streamgraph(&mut self, ui: &mut Ui, actions: &mut Vec<Action>) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);
        self.report_resize(rect, actions);

        let now = ui.input(|input| input.time);
        let progress = match self
            .stream_clock
            .progress(self.store.state().animation.current(), now)
        {
            Some((token, progress)) => {
                if progress >= 1.0 {
                    actions.push(events::animation_callback(token));
                }
                progress
            }
            None => 1.0,
        };

        let state = self.store.state();
        let graph = &self.data.streams;
        if graph.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &state.localization.no_results,
                FontId::proportional(15.0),
                TEXT_COLOR,
            );
            return;
        }

        let layout = StreamLayout::new(rect, graph.years.len());
        let bands = graph.stacked_bands();
        let zoomed = state.zoomed_uri();

        let pointer = response.hover_pos();
        let hovered = pointer
            .filter(|pointer| layout.plot.contains(*pointer))
            .and_then(|pointer| {
                stream_at(&bands, layout.position_at(pointer.x), layout.value_at(pointer.y))
            });

        for (index, (stream, stream_bands)) in graph.streams.iter().zip(&bands).enumerate() {
            let base = area_color(index);
            let is_zoomed = zoomed == Some(stream.name.as_str());
            let mut fill = if zoomed.is_none() || is_zoomed {
                base
            } else {
                blend_color(base, Color32::from_gray(225), 0.8 * progress)
            };
            if hovered == Some(index) && !is_zoomed {
                fill = blend_color(fill, Color32::WHITE, 0.25);
            }

            let segments = stream_bands.len().saturating_sub(1) * SEGMENT_STEPS;
            for step in 0..segments.max(1) {
                let start = step as f32 / SEGMENT_STEPS as f32;
                let end = if segments == 0 {
                    start
                } else {
                    (step + 1) as f32 / SEGMENT_STEPS as f32
                };
                let (Some(from), Some(to)) =
                    (band_at(stream_bands, start), band_at(stream_bands, end))
                else {
                    continue;
                };
                if from.upper <= from.lower && to.upper <= to.lower {
                    continue;
                }

                let mut quad = vec![
                    layout.point(start, from.upper),
                    layout.point(end, to.upper),
                    layout.point(end, to.lower),
                    layout.point(start, from.lower),
                ];
                if segments == 0 {
                    quad[1].x += 4.0;
                    quad[2].x += 4.0;
                    quad[0].x -= 4.0;
                    quad[3].x -= 4.0;
                }
                painter.add(Shape::convex_polygon(quad, fill, Stroke::NONE));
            }

            let widest = stream_bands
                .iter()
                .enumerate()
                .max_by(|a, b| (a.1.upper - a.1.lower).total_cmp(&(b.1.upper - b.1.lower)));
            if let Some((year_index, band)) = widest {
                let height = (band.upper - band.lower) * layout.plot.height();
                if height >= MIN_LABEL_HEIGHT {
                    let color = if zoomed.is_some() && !is_zoomed {
                        fade_color(TEXT_COLOR, 0.5)
                    } else {
                        TEXT_COLOR
                    };
                    painter.text(
                        layout.point(year_index as f32, (band.upper + band.lower) * 0.5),
                        Align2::CENTER_CENTER,
                        &stream.name,
                        FontId::proportional(12.0),
                        color,
                    );
                }
            }
        }

        let label_every = ((MIN_YEAR_LABEL_GAP * layout.span()) / layout.plot.width().max(1.0))
            .ceil()
            .max(1.0) as usize;
        for (index, year) in graph.years.iter().enumerate() {
            let x = layout.x(index as f32);
            painter.line_segment(
                [pos2(x, layout.plot.bottom()), pos2(x, layout.plot.bottom() + 4.0)],
                Stroke::new(1.0, with_alpha(TEXT_COLOR, 120)),
            );
            if index % label_every == 0 {
                painter.text(
                    pos2(x, layout.plot.bottom() + 6.0),
                    Align2::CENTER_TOP,
                    year.to_string(),
                    FontId::proportional(11.0),
                    TEXT_COLOR,
                );
            }
        }

        if let Some(index) = hovered
            && let Some(stream) = graph.streams.get(index)
        {
            ui.output_mut(|output| {
                output.cursor_icon = eframe::egui::CursorIcon::PointingHand;
            });
            let total = stream.counts.iter().sum::<u32>();
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {total} {}", stream.name, state.localization.documents),
                FontId::proportional(13.0),
                TEXT_COLOR,
            );
        }

        if response.clicked() {
            let ctx = MapContext::new(state);
            let name = hovered
                .and_then(|index| graph.streams.get(index))
                .map(|stream| stream.name.as_str());
            actions.extend(events::stream_click(&ctx, name));
        }
    }
}
