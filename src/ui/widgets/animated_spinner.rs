// SPDX-License-Identifier: MPL-2.0
//! Animated loading spinner drawn on a Canvas.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::PI;

const STROKE_WIDTH: f32 = 3.0;

/// Half-circle arc that the caller rotates between frames (the app's tick
/// advances the angle while a load is in flight).
pub struct AnimatedSpinner {
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    /// Creates a spinner with the given color and rotation angle in radians.
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    /// Overrides the default diameter.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Wraps the spinner into a Canvas element.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - 4.0;

        // Faint full track underneath the moving arc
        let track = Path::circle(center, radius);
        frame.stroke(
            &track,
            Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                a: 0.25,
                ..self.color
            }),
        );

        // Moving half-circle, offset so rotation 0 starts at the top
        let start_angle = self.rotation - PI / 2.0;
        let arc = Path::new(|builder| {
            builder.move_to(Point::new(
                center.x + radius * start_angle.cos(),
                center.y + radius * start_angle.sin(),
            ));
            builder.arc(canvas::path::Arc {
                center,
                radius,
                start_angle: Radians(start_angle),
                end_angle: Radians(start_angle + PI),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(STROKE_WIDTH)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}
