//! Simplex state and geometry.
//!
//! A [`Simplex`] holds `d + 1` vertices in `d`-dimensional space together
//! with the objective value of each vertex. Values are computed exactly once,
//! when a point enters the simplex, so ordering the simplex never calls the
//! objective again.
//!
//! # Geometry
//!
//! With `x₀` the centroid of every vertex except the worst:
//!
//! - reflection: `x₀ + α·(x₀ − worst)`
//! - expansion: `x₀ + γ·(xr − x₀)`
//! - outside contraction: `x₀ + ρ·(xr − x₀)`
//! - inside contraction: `x₀ + ρ·(worst − x₀)`
//! - shrink: `anchor + σ·(x − anchor)` for every non-anchor vertex
//!
//! The centroid is only meaningful right after [`Simplex::order`]; any
//! mutation clears it and the geometric moves return
//! [`OptimizerError::InvalidState`] until the simplex is ordered again.

use num_traits::Float;
use rand::Rng;
use simplexopt_core::{
    cost_function::CostFunction,
    error::{OptimizerError, Result},
    types::{Point, Scalar},
};
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four fixed coefficients of the Nelder-Mead method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coefficients<T: Scalar> {
    /// Reflection coefficient α (> 0)
    pub reflection: T,
    /// Expansion coefficient γ (> 1)
    pub expansion: T,
    /// Contraction coefficient ρ (in (0, 1))
    pub contraction: T,
    /// Shrink coefficient σ (in (0, 1))
    pub shrink: T,
}

impl<T: Scalar> Default for Coefficients<T> {
    fn default() -> Self {
        Self {
            reflection: T::one(),
            expansion: <T as Scalar>::from_f64(2.0),
            contraction: <T as Scalar>::from_f64(0.5),
            shrink: <T as Scalar>::from_f64(0.5),
        }
    }
}

impl<T: Scalar> Coefficients<T> {
    /// Creates a coefficient set. Call [`Coefficients::validate`] before use.
    pub fn new(reflection: T, expansion: T, contraction: T, shrink: T) -> Self {
        Self {
            reflection,
            expansion,
            contraction,
            shrink,
        }
    }

    /// Checks the admissible range of every coefficient.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str, parameter: &str, value: T| {
            Err(OptimizerError::invalid_configuration(
                reason,
                parameter,
                value.to_string(),
            ))
        };

        if !Float::is_finite(self.reflection) || self.reflection <= T::zero() {
            return invalid("must be positive and finite", "reflection", self.reflection);
        }
        if !Float::is_finite(self.expansion) || self.expansion <= T::one() {
            return invalid("must exceed 1 and be finite", "expansion", self.expansion);
        }
        if !in_open_unit_interval(self.contraction) {
            return invalid("must lie in (0, 1)", "contraction", self.contraction);
        }
        if !in_open_unit_interval(self.shrink) {
            return invalid("must lie in (0, 1)", "shrink", self.shrink);
        }
        Ok(())
    }
}

fn in_open_unit_interval<T: Scalar>(value: T) -> bool {
    value > T::zero() && value < T::one()
}

/// Which contraction to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractionKind {
    /// Toward the reflected point; used when it beats the worst vertex
    Outside,
    /// Toward the worst vertex; used when the reflected point does not
    Inside,
}

/// Vertex the simplex contracts toward on a shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShrinkAnchor {
    /// The best vertex (index 0); every other vertex moves.
    #[default]
    Best,
    /// The second-best vertex (index 1); vertices 0 and 1 stay, the rest move.
    ///
    /// In one dimension the second-best vertex is also the worst, so a shrink
    /// moves nothing and a run that keeps rejecting candidates only ends at
    /// its iteration cap.
    SecondBest,
}

impl ShrinkAnchor {
    /// Index of the anchor vertex in an ordered simplex.
    pub fn index(self) -> usize {
        match self {
            Self::Best => 0,
            Self::SecondBest => 1,
        }
    }
}

/// A vertex of the simplex and its cached objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<T: Scalar> {
    /// Coordinates of the vertex
    pub point: Point<T>,
    /// Objective value at `point`
    pub value: T,
}

impl<T: Scalar> Vertex<T> {
    /// Evaluates `cost_fn` at `point` and builds the vertex.
    pub fn evaluate<C>(point: Point<T>, cost_fn: &C) -> Result<Self>
    where
        C: CostFunction<T> + ?Sized,
    {
        let value = cost_fn.cost_at(&point)?;
        Ok(Self { point, value })
    }
}

/// Orders objective values ascending, with NaN after every number.
fn compare_values<T: Scalar>(a: T, b: T) -> Ordering {
    match (Float::is_nan(a), Float::is_nan(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// `d + 1` evaluated vertices in `d`-dimensional space.
#[derive(Debug, Clone)]
pub struct Simplex<T: Scalar> {
    vertices: Vec<Vertex<T>>,
    centroid: Option<Point<T>>,
    coefficients: Coefficients<T>,
    dimension: usize,
}

impl<T: Scalar> Simplex<T> {
    /// Builds a simplex from explicit points.
    ///
    /// Every point is evaluated once. Requires `d + 1` points of length
    /// `d ≥ 1`.
    pub fn from_points<C>(
        points: Vec<Point<T>>,
        coefficients: Coefficients<T>,
        cost_fn: &C,
    ) -> Result<Self>
    where
        C: CostFunction<T> + ?Sized,
    {
        coefficients.validate()?;

        let dimension = points.first().map_or(0, |p| p.len());
        if dimension == 0 {
            return Err(OptimizerError::invalid_configuration(
                "a simplex needs at least one dimension",
                "dimension",
                "0",
            ));
        }
        if points.len() != dimension + 1 {
            return Err(OptimizerError::invalid_configuration(
                format!("a {dimension}-dimensional simplex needs {} points", dimension + 1),
                "points",
                points.len().to_string(),
            ));
        }
        if let Some(bad) = points.iter().find(|p| p.len() != dimension) {
            return Err(OptimizerError::dimension_mismatch(dimension, bad.len()));
        }

        let vertices = points
            .into_iter()
            .map(|point| Vertex::evaluate(point, cost_fn))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            vertices,
            centroid: None,
            coefficients,
            dimension,
        })
    }

    /// Builds a simplex of random points around `center`.
    ///
    /// Each coordinate of each vertex is `center[i] + u` with `u` drawn
    /// uniformly from `[−spread, spread]`.
    pub fn random<C, R>(
        center: &Point<T>,
        spread: T,
        coefficients: Coefficients<T>,
        cost_fn: &C,
        rng: &mut R,
    ) -> Result<Self>
    where
        C: CostFunction<T> + ?Sized,
        R: Rng,
    {
        let half_width = spread.try_to_f64().unwrap_or(f64::NAN);
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(OptimizerError::invalid_configuration(
                "must be positive and finite",
                "initial_spread",
                spread.to_string(),
            ));
        }

        let dimension = center.len();
        let points = (0..=dimension)
            .map(|_| {
                center.map(|c| c + <T as Scalar>::from_f64(rng.gen_range(-half_width..=half_width)))
            })
            .collect();

        Self::from_points(points, coefficients, cost_fn)
    }

    /// Dimension `d` of the search space.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vertices, always `d + 1`.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// A simplex is never empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Coefficients used by the geometric moves.
    pub fn coefficients(&self) -> &Coefficients<T> {
        &self.coefficients
    }

    /// All vertices in their current order.
    pub fn vertices(&self) -> &[Vertex<T>] {
        &self.vertices
    }

    /// Iterator over the vertex coordinates.
    pub fn points(&self) -> impl Iterator<Item = &Point<T>> {
        self.vertices.iter().map(|v| &v.point)
    }

    /// Cached objective values in vertex order.
    pub fn values(&self) -> Vec<T> {
        self.vertices.iter().map(|v| v.value).collect()
    }

    /// Vertex at index 0; the best vertex once ordered.
    pub fn best(&self) -> &Vertex<T> {
        &self.vertices[0]
    }

    /// Vertex at index `d − 1`; the second-worst vertex once ordered.
    pub fn second_worst(&self) -> &Vertex<T> {
        &self.vertices[self.dimension - 1]
    }

    /// Vertex at index `d`; the worst vertex once ordered.
    pub fn worst(&self) -> &Vertex<T> {
        &self.vertices[self.dimension]
    }

    /// Whether the centroid is current.
    pub fn is_ordered(&self) -> bool {
        self.centroid.is_some()
    }

    /// Centroid of the best `d` vertices.
    pub fn centroid(&self) -> Result<&Point<T>> {
        self.centroid
            .as_ref()
            .ok_or_else(|| OptimizerError::invalid_state("centroid is stale; order the simplex first"))
    }

    /// L2 distance between the vertices at index 0 and index `d`.
    pub fn spread(&self) -> T {
        (&self.worst().point - &self.best().point).norm()
    }

    /// Sorts the vertices by cached value and recomputes the centroid.
    ///
    /// NaN values sort last; ties keep their relative order.
    pub fn order(&mut self) {
        self.vertices
            .sort_by(|a, b| compare_values(a.value, b.value));

        let mut centroid = Point::zeros(self.dimension);
        for vertex in &self.vertices[..self.dimension] {
            centroid += &vertex.point;
        }
        centroid /= <T as Scalar>::from_usize(self.dimension);
        self.centroid = Some(centroid);
    }

    /// `x₀ + α·(x₀ − worst)`.
    pub fn reflection(&self) -> Result<Point<T>> {
        let x0 = self.centroid()?;
        Ok(x0 + (x0 - &self.worst().point) * self.coefficients.reflection)
    }

    /// `x₀ + γ·(xr − x₀)`.
    pub fn expansion(&self, xr: &Point<T>) -> Result<Point<T>> {
        let x0 = self.centroid()?;
        self.check_len(xr)?;
        Ok(x0 + (xr - x0) * self.coefficients.expansion)
    }

    /// Outside: `x₀ + ρ·(xr − x₀)`; inside: `x₀ + ρ·(worst − x₀)`.
    pub fn contraction(&self, xr: &Point<T>, kind: ContractionKind) -> Result<Point<T>> {
        let x0 = self.centroid()?;
        self.check_len(xr)?;
        let toward = match kind {
            ContractionKind::Outside => xr,
            ContractionKind::Inside => &self.worst().point,
        };
        Ok(x0 + (toward - x0) * self.coefficients.contraction)
    }

    /// Overwrites the worst vertex with an evaluated candidate.
    pub fn replace_worst(&mut self, vertex: Vertex<T>) -> Result<()> {
        self.check_len(&vertex.point)?;
        let worst = self.dimension;
        self.vertices[worst] = vertex;
        self.centroid = None;
        Ok(())
    }

    /// Pulls every vertex after the anchor toward it and re-evaluates them.
    ///
    /// Must be called on an ordered simplex. Returns the number of
    /// objective evaluations performed. If an evaluation fails, the vertices
    /// already moved keep their new positions and the simplex is left
    /// unordered.
    pub fn shrink<C>(&mut self, anchor: ShrinkAnchor, cost_fn: &C) -> Result<usize>
    where
        C: CostFunction<T> + ?Sized,
    {
        if !self.is_ordered() {
            return Err(OptimizerError::invalid_state(
                "shrink needs an ordered simplex to locate its anchor",
            ));
        }

        let anchor_index = anchor.index().min(self.dimension);
        let anchor_point = self.vertices[anchor_index].point.clone();
        let sigma = self.coefficients.shrink;
        self.centroid = None;

        let mut evaluations = 0;
        for vertex in &mut self.vertices[anchor_index + 1..] {
            let moved = &anchor_point + (&vertex.point - &anchor_point) * sigma;
            *vertex = Vertex::evaluate(moved, cost_fn)?;
            evaluations += 1;
        }

        Ok(evaluations)
    }

    fn check_len(&self, point: &Point<T>) -> Result<()> {
        if point.len() == self.dimension {
            Ok(())
        } else {
            Err(OptimizerError::dimension_mismatch(self.dimension, point.len()))
        }
    }
}
