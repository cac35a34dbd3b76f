//! Timeline geometry
//!
//! Positions are in world units with the timeline centered on the origin.

use crate::events::Events;
use glam::Vec2;
use std::path::PathBuf;

/// Sizes used to lay out the timeline
#[derive(Debug, Clone, Copy)]
pub struct TimelineStyle {
    /// Length of the horizontal line
    pub length: f32,
    pub card_width: f32,
    pub card_height: f32,
    /// Gap between the line and the near edge of a card
    pub card_spacing: f32,
    /// Fraction of the image slot a portrait may fill
    pub image_scale: f32,
    pub marker_radius: f32,
    /// Vertical position of the year labels
    pub year_label_y: f32,
    /// Card scale while highlighted
    pub highlight_scale: f32,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            length: 10.0,
            card_width: 1.5,
            card_height: 2.0,
            card_spacing: 0.3,
            image_scale: 0.8,
            marker_radius: 0.08,
            year_label_y: -0.4,
            highlight_scale: 1.2,
        }
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub min: Vec2,
    pub max: Vec2,
}

impl Frame {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

#[derive(Debug, Clone)]
pub struct EventCard {
    pub year: i32,
    pub label: String,
    pub image: PathBuf,
    /// Marker on the timeline
    pub marker: Vec2,
    /// Unscaled card center
    pub center: Vec2,
}

impl EventCard {
    pub fn is_above(&self) -> bool {
        self.center.y > 0.0
    }
}

/// Card parts at a given scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub frame: Frame,
    /// Box a portrait is fitted into
    pub image_slot: Frame,
    /// "No Image" rectangle shown when the portrait is missing
    pub placeholder: Frame,
    pub label: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct TimelineLayout {
    pub style: TimelineStyle,
    pub cards: Vec<EventCard>,
}

impl TimelineLayout {
    /// Lay out `events` in year order
    ///
    /// Years are mapped linearly onto the line; a single event, or events
    /// that all share one year, sit at x = 0.
    pub fn build(events: &Events, style: TimelineStyle) -> Self {
        let (Some(&first), Some(&last)) = (events.keys().next(), events.keys().next_back()) else {
            return Self {
                style,
                cards: Vec::new(),
            };
        };
        let range = (last - first) as f32;
        let offset = style.card_spacing + style.card_height / 2.0;

        let cards = events
            .iter()
            .enumerate()
            .map(|(i, (&year, (label, image)))| {
                let x = if range > 0.0 {
                    (year - first) as f32 / range * style.length - style.length / 2.0
                } else {
                    0.0
                };
                let y = if i % 2 == 0 { offset } else { -offset };

                EventCard {
                    year,
                    label: label.clone(),
                    image: image.clone(),
                    marker: Vec2::new(x, 0.0),
                    center: Vec2::new(x, y),
                }
            })
            .collect();

        Self { style, cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// End points of the main line, or `None` when there is nothing to show
    pub fn line(&self) -> Option<[Vec2; 2]> {
        let half = self.style.length / 2.0;
        (!self.is_empty()).then(|| [Vec2::new(-half, 0.0), Vec2::new(half, 0.0)])
    }

    pub fn year_label(&self, card: &EventCard) -> Vec2 {
        Vec2::new(card.marker.x, self.style.year_label_y)
    }

    /// From the marker to the card edge facing the line
    pub fn connector(&self, card: &EventCard) -> [Vec2; 2] {
        let edge = card.center.y - card.center.y.signum() * self.style.card_height / 2.0;
        [card.marker, Vec2::new(card.marker.x, edge)]
    }

    /// Card parts scaled about the card center
    pub fn geometry(&self, card: &EventCard, scale: f32) -> CardGeometry {
        let s = self.style;
        let w = s.card_width * scale;
        let h = s.card_height * scale;
        let body = card.center - Vec2::Y * (0.1 * h);

        CardGeometry {
            frame: Frame::from_center(card.center, Vec2::new(w, h)),
            image_slot: Frame::from_center(
                body,
                Vec2::new(w * 0.8, h * 0.6) * s.image_scale,
            ),
            placeholder: Frame::from_center(body, Vec2::new(w * 0.6, h * 0.4)),
            label: card.center + Vec2::Y * (0.4 * h),
        }
    }

    /// World-space extent of everything at unit scale
    pub fn bounds(&self) -> Option<Frame> {
        let line = self.line()?;
        let mut min = line[0].min(Vec2::new(0.0, self.style.year_label_y));
        let mut max = line[1];
        for card in &self.cards {
            let frame = self.geometry(card, 1.0).frame;
            min = min.min(frame.min);
            max = max.max(frame.max);
        }
        Some(Frame { min, max })
    }
}
