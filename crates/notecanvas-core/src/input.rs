//! Pointer and touch input normalization.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// The pointer left the surface while possibly still pressed.
    Leave,
}

/// Phase tag carried by raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
}

/// Raw input as delivered by the host: page coordinates of every contact
/// point plus the surface's bounding box at the time of the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPointerInput {
    pub phase: PointerPhase,
    /// Mouse/pen input carries one contact; touch input may carry several.
    pub contacts: Vec<Point>,
    pub surface_bounds: Rect,
}

impl RawPointerInput {
    /// Single-contact input (mouse or pen).
    pub fn single(phase: PointerPhase, client: Point, surface_bounds: Rect) -> Self {
        Self {
            phase,
            contacts: vec![client],
            surface_bounds,
        }
    }

    /// Normalize into a surface-local event.
    ///
    /// Only the first contact is used. Down and Move events without any
    /// contact are dropped.
    pub fn normalize(&self) -> Option<PointerEvent> {
        match self.phase {
            PointerPhase::Up => Some(PointerEvent::Up),
            PointerPhase::Leave => Some(PointerEvent::Leave),
            PointerPhase::Down => self
                .local_position()
                .map(|position| PointerEvent::Down { position }),
            PointerPhase::Move => self
                .local_position()
                .map(|position| PointerEvent::Move { position }),
        }
    }

    fn local_position(&self) -> Option<Point> {
        primary_contact(&self.contacts)
            .map(|client| to_surface_local(client, self.surface_bounds))
    }
}

/// The contact that drives drawing when several touches are present.
pub fn primary_contact(contacts: &[Point]) -> Option<Point> {
    contacts.first().copied()
}

/// Convert page coordinates into coordinates relative to the surface's top-left.
pub fn to_surface_local(client: Point, surface_bounds: Rect) -> Point {
    client - Vec2::new(surface_bounds.x0, surface_bounds.y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_subtracted() {
        let bounds = Rect::new(120.0, 64.0, 920.0, 1164.0);
        let local = to_surface_local(Point::new(130.0, 70.5), bounds);
        assert_eq!(local, Point::new(10.0, 6.5));
    }

    #[test]
    fn test_first_touch_wins() {
        let bounds = Rect::new(10.0, 10.0, 810.0, 1110.0);
        let input = RawPointerInput {
            phase: PointerPhase::Move,
            contacts: vec![Point::new(50.0, 60.0), Point::new(300.0, 300.0)],
            surface_bounds: bounds,
        };
        assert_eq!(
            input.normalize(),
            Some(PointerEvent::Move {
                position: Point::new(40.0, 50.0)
            })
        );
    }

    #[test]
    fn test_contactless_down_is_dropped() {
        let input = RawPointerInput {
            phase: PointerPhase::Down,
            contacts: Vec::new(),
            surface_bounds: Rect::ZERO,
        };
        assert_eq!(input.normalize(), None);
    }

    #[test]
    fn test_touch_end_needs_no_contacts() {
        let input = RawPointerInput {
            phase: PointerPhase::Up,
            contacts: Vec::new(),
            surface_bounds: Rect::ZERO,
        };
        assert_eq!(input.normalize(), Some(PointerEvent::Up));
    }
}
