use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::geometry::Vector;

/// Maximum number of vectors the set holds.
pub const MAX_VECTORS: usize = 3;

/// Default vectors at startup
pub const DEFAULT_VECTORS: [Vector; MAX_VECTORS] = [
    Vector::new(80.0, 0.0),
    Vector::new(70.0, 30.0),
    Vector::new(60.0, -45.0),
];

/// How the resultant is composed on the chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Triangle,
    Parallelogram,
}

impl Method {
    pub fn toggle(self) -> Self {
        match self {
            Method::Triangle => Method::Parallelogram,
            Method::Parallelogram => Method::Triangle,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Triangle => "Triangle",
            Method::Parallelogram => "Parallelogram",
        }
    }
}

/// Number of active vectors. Only two or three are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum VectorCount {
    #[default]
    Two,
    Three,
}

impl VectorCount {
    /// Clamp an arbitrary count to the nearest supported one.
    pub fn clamped(n: i64) -> Self {
        if n >= 3 {
            VectorCount::Three
        } else {
            VectorCount::Two
        }
    }

    pub fn get(self) -> usize {
        match self {
            VectorCount::Two => 2,
            VectorCount::Three => 3,
        }
    }
}

impl From<i64> for VectorCount {
    fn from(n: i64) -> Self {
        let count = VectorCount::clamped(n);
        if n != count.get() as i64 {
            warn!("Vector count {} clamped to {}", n, count.get());
        }
        count
    }
}

impl From<VectorCount> for u8 {
    fn from(count: VectorCount) -> u8 {
        count.get() as u8
    }
}

/// Whether the summed ("after") layout is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Initial,
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initial => write!(f, "initial"),
            Phase::Resolved => write!(f, "resolved"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    pub method: Method,
    pub count: VectorCount,
    pub phase: Phase,
}

/// Fixed-capacity vector storage; only the first `count` entries are active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorSet {
    vectors: [Vector; MAX_VECTORS],
}

impl Default for VectorSet {
    fn default() -> Self {
        Self::new(DEFAULT_VECTORS)
    }
}

impl VectorSet {
    pub fn new(vectors: [Vector; MAX_VECTORS]) -> Self {
        Self { vectors }
    }

    pub fn get(&self, index: usize) -> Option<&Vector> {
        self.vectors.get(index)
    }

    pub fn active(&self, count: VectorCount) -> &[Vector] {
        &self.vectors[..count.get()]
    }

    pub fn set(&mut self, index: usize, vector: Vector) {
        if let Some(slot) = self.vectors.get_mut(index) {
            *slot = vector;
        }
    }
}

/// Editable field of a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorField {
    Magnitude,
    Angle,
}

impl VectorField {
    pub fn label(&self) -> &'static str {
        match self {
            VectorField::Magnitude => "Magnitude",
            VectorField::Angle => "Angle",
        }
    }
}

/// Whole application state. Passed explicitly into the layout functions.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub vectors: VectorSet,
    pub render: RenderState,
    /// Index of the vector whose tip is being dragged
    pub dragging: Option<usize>,
}

impl AppState {
    pub fn new(vectors: VectorSet, method: Method, count: VectorCount) -> Self {
        Self {
            vectors,
            render: RenderState {
                method,
                count,
                phase: Phase::Initial,
            },
            dragging: None,
        }
    }

    /// Update one field of one vector. Non-finite values are coerced to 0.
    pub fn set_vector_field(&mut self, index: usize, field: VectorField, value: f64) {
        let Some(slot) = self.vectors.vectors.get_mut(index) else {
            warn!("Ignoring edit of vector {}: only {} slots", index + 1, MAX_VECTORS);
            return;
        };
        let value = if value.is_finite() { value } else { 0.0 };
        match field {
            VectorField::Magnitude => slot.magnitude = value,
            VectorField::Angle => slot.angle = value,
        }
        debug!("Vector {} {} = {}", index + 1, field.label(), value);
    }

    pub fn set_method(&mut self, method: Method) {
        self.render.method = method;
        debug!("Method set to {}", method.name());
    }

    pub fn set_count(&mut self, count: VectorCount) {
        self.render.count = count;
        if let Some(i) = self.dragging {
            if i >= count.get() {
                self.dragging = None;
            }
        }
        debug!("Vector count set to {}", count.get());
    }

    /// "Animate" button: show the summed layout.
    pub fn animate(&mut self) {
        self.render.phase = Phase::Resolved;
    }

    /// "Reset" button: back to the unsummed layout.
    pub fn reset(&mut self) {
        self.render.phase = Phase::Initial;
    }
}
