//! Canvas geometry and update reconciliation
//!
//! A geometry update may name a position only, or position and size with any
//! component left unspecified. [`GeometryRequest::plan`] turns such a request
//! into the minimal set of backend calls: a move and/or a resize, each issued
//! only when it would change something.
//!
//! For a full request the current geometry is read once before deciding. If
//! the surface is resized externally between that read and the resulting
//! backend call, the decision is made on stale data; nothing here guards
//! against that window.

use crate::errors::{EaselError, Result};

/// Location and size of a canvas, `(x, y, width, height)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn as_tuple(&self) -> (i32, i32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }
}

impl From<(i32, i32, u32, u32)> for Geometry {
    fn from((x, y, width, height): (i32, i32, u32, u32)) -> Self {
        Self::new(x, y, width, height)
    }
}

/// A requested geometry change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryRequest {
    /// Move to `(x, y)`; always applied.
    Location { x: i32, y: i32 },
    /// Move and/or resize. `None` leaves that pair untouched.
    Full {
        x: Option<i32>,
        y: Option<i32>,
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// Backend calls required to satisfy a [`GeometryRequest`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct GeometryPlan {
    pub location: Option<(i32, i32)>,
    pub size: Option<(u32, u32)>,
}

impl GeometryPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.size.is_none()
    }
}

fn coordinate(value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        EaselError::InvalidArgument(format!("coordinate {value} is out of range"))
    })
}

fn dimension(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        EaselError::InvalidArgument(format!("dimension {value} must be a non-negative integer"))
    })
}

impl GeometryRequest {
    /// Parses a loosely-typed `(x, y)` or `(x, y, w, h)` sequence.
    pub fn from_values(values: &[Option<i64>]) -> Result<Self> {
        match *values {
            [Some(x), Some(y)] => Ok(Self::Location {
                x: coordinate(x)?,
                y: coordinate(y)?,
            }),
            [_, _] => Err(EaselError::InvalidArgument(
                "a 2-value geometry requires both coordinates".into(),
            )),
            [x, y, w, h] => Ok(Self::Full {
                x: x.map(coordinate).transpose()?,
                y: y.map(coordinate).transpose()?,
                width: w.map(dimension).transpose()?,
                height: h.map(dimension).transpose()?,
            }),
            _ => Err(EaselError::InvalidArgument(
                "geometry requires exactly 2 or 4 values".into(),
            )),
        }
    }

    /// Decides which backend calls are needed.
    ///
    /// `current` is invoked at most once, and only for [`GeometryRequest::Full`].
    pub fn plan<F>(&self, current: F) -> Result<GeometryPlan>
    where
        F: FnOnce() -> Result<Geometry>,
    {
        match *self {
            Self::Location { x, y } => Ok(GeometryPlan {
                location: Some((x, y)),
                size: None,
            }),
            Self::Full { x, y, width, height } => {
                let cur = current()?;
                let location = match (x, y) {
                    (Some(x), Some(y)) if (x, y) != cur.position() => Some((x, y)),
                    _ => None,
                };
                let size = match (width, height) {
                    (Some(w), Some(h)) if (w, h) != cur.size() => Some((w, h)),
                    _ => None,
                };
                Ok(GeometryPlan { location, size })
            }
        }
    }
}

impl From<(i32, i32)> for GeometryRequest {
    fn from((x, y): (i32, i32)) -> Self {
        Self::Location { x, y }
    }
}

impl From<(i32, i32, u32, u32)> for GeometryRequest {
    fn from((x, y, width, height): (i32, i32, u32, u32)) -> Self {
        Self::Full {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
        }
    }
}

impl From<Geometry> for GeometryRequest {
    fn from(g: Geometry) -> Self {
        g.as_tuple().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: Geometry = Geometry::new(10, 10, 100, 100);

    #[test]
    fn location_never_reads_current() {
        let plan = GeometryRequest::from((3, 4))
            .plan(|| panic!("must not read geometry"))
            .unwrap();
        assert_eq!(plan.location, Some((3, 4)));
        assert_eq!(plan.size, None);
    }

    #[test]
    fn unchanged_geometry_plans_nothing() {
        let plan = GeometryRequest::from(CURRENT).plan(|| Ok(CURRENT)).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn none_components_are_left_alone() {
        let req = GeometryRequest::from_values(&[None, Some(50), Some(300), None]).unwrap();
        assert!(req.plan(|| Ok(CURRENT)).unwrap().is_empty());

        let req = GeometryRequest::from_values(&[None, None, Some(300), Some(200)]).unwrap();
        let plan = req.plan(|| Ok(CURRENT)).unwrap();
        assert_eq!(plan.location, None);
        assert_eq!(plan.size, Some((300, 200)));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        for values in [&[][..], &[Some(1)][..], &[Some(1), Some(2), Some(3)][..]] {
            let err = GeometryRequest::from_values(values).unwrap_err();
            assert!(matches!(err, EaselError::InvalidArgument(_)));
        }
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        assert!(GeometryRequest::from_values(&[Some(0), Some(0), Some(-1), Some(5)]).is_err());
    }
}
