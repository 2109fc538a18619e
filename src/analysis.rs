//! Second-derivative-test classification pipeline
//!
//! The objective under study is
//!
//!   f(x,y) = cos(3π(x+y))·cos(3π(x−y)) − x² − y² + 2(x−y) + 2
//!
//! whose cross-partials vanish everywhere, so the Hessian at any point
//! is diagonal with both diagonal entries given by the same
//! one-variable expression fxx(t) = −18π²·cos(6πt) − 2. The pipeline
//! takes two lists of critical-point coordinates (derived analytically
//! offline), forms their Cartesian product, classifies each candidate
//! by the sign of det(H) and fxx, and selects the global maximum and
//! minimum among the classified points.

use std::f64::consts::PI;

use serde::Serialize;

/// A candidate critical point (x, y).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Outcome of the second-derivative test at a single candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointClass {
    /// det(H) > 0 and fxx < 0: both eigenvalues negative.
    Maximum,
    /// det(H) > 0 and fxx > 0: both eigenvalues positive.
    Minimum,
    /// det(H) <= 0: saddle or singular Hessian.
    Saddle,
    /// det(H) > 0 but fxx within the degeneracy tolerance of zero.
    Degenerate,
    /// Candidate has a non-finite coordinate; never evaluated.
    NonFinite,
}

impl PointClass {
    pub fn name(self) -> &'static str {
        match self {
            PointClass::Maximum => "maximum",
            PointClass::Minimum => "minimum",
            PointClass::Saddle => "saddle",
            PointClass::Degenerate => "degenerate",
            PointClass::NonFinite => "non_finite",
        }
    }
}

/// A candidate paired with its Hessian determinant.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct HessianRecord {
    pub point: Point,
    pub det: f64,
}

/// A candidate that was excluded from classification, with the reason.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SkippedPoint {
    pub point: Point,
    pub class: PointClass,
}

/// A global optimum: the winning point and the objective value there.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Optimum {
    pub point: Point,
    pub value: f64,
}

/// Classified candidate sets, plus the excluded remainder.
#[derive(Clone, Debug, Default)]
pub struct ClassifiedPoints {
    pub maxima: Vec<Point>,
    pub minima: Vec<Point>,
    pub saddles: usize,
    pub skipped: Vec<SkippedPoint>,
}

/// Full pipeline result for one run.
#[derive(Clone, Debug)]
pub struct AnalysisResult {
    pub candidates: usize,
    pub classified: ClassifiedPoints,
    pub maximum: Option<Optimum>,
    pub minimum: Option<Optimum>,
}

// =============================================================================
// Closed-form evaluation
// =============================================================================

/// Second partial derivative along either axis: fxx(t) = −18π²·cos(6πt) − 2.
///
/// Valid for both ∂²f/∂x² and ∂²f/∂y² of the objective; the
/// cross-partials are identically zero.
pub fn fxx(t: f64) -> f64 {
    -18.0 * PI * PI * (6.0 * PI * t).cos() - 2.0
}

/// Determinant of the (diagonal) Hessian at (x, y).
pub fn det_hessian(x: f64, y: f64) -> f64 {
    fxx(x) * fxx(y)
}

/// The objective function f(x,y).
pub fn objective(p: Point) -> f64 {
    (3.0 * PI * (p.x + p.y)).cos() * (3.0 * PI * (p.x - p.y)).cos()
        - p.x * p.x
        - p.y * p.y
        + 2.0 * (p.x - p.y)
        + 2.0
}

// =============================================================================
// Pipeline stages
// =============================================================================

/// Cartesian product of the two coordinate lists, outer loop over X,
/// inner loop over Y. No filtering, no deduplication; empty inputs
/// yield an empty output.
pub fn candidate_points(x_set: &[f64], y_set: &[f64]) -> Vec<Point> {
    let mut points = Vec::with_capacity(x_set.len() * y_set.len());
    for &x in x_set {
        for &y in y_set {
            points.push(Point::new(x, y));
        }
    }
    points
}

/// Pair every candidate with its Hessian determinant.
pub fn hessian_records(points: &[Point]) -> Vec<HessianRecord> {
    points
        .iter()
        .map(|&point| HessianRecord {
            point,
            det: det_hessian(point.x, point.y),
        })
        .collect()
}

/// Classify a tested candidate from its Hessian record.
///
/// Non-finite coordinates are flagged rather than evaluated, so a bad
/// point never poisons the batch with NaN. For det(H) > 0 the sign of
/// fxx(x) decides the class; `degeneracy_tol` widens the exclusion
/// band around fxx == 0 (0.0 keeps exact-zero semantics).
pub fn classify_record(rec: &HessianRecord, degeneracy_tol: f64) -> PointClass {
    if !rec.point.is_finite() {
        return PointClass::NonFinite;
    }
    if rec.det <= 0.0 {
        return PointClass::Saddle;
    }
    let curvature = fxx(rec.point.x);
    if curvature.abs() <= degeneracy_tol {
        PointClass::Degenerate
    } else if curvature < 0.0 {
        PointClass::Maximum
    } else {
        PointClass::Minimum
    }
}

/// Classify a single candidate, computing its Hessian record first.
pub fn classify(point: Point, degeneracy_tol: f64) -> PointClass {
    let rec = HessianRecord {
        point,
        det: det_hessian(point.x, point.y),
    };
    classify_record(&rec, degeneracy_tol)
}

/// Split tested candidates into maxima and minima, collecting the
/// excluded remainder. Order within each set follows candidate order.
pub fn split_optimum_types(records: &[HessianRecord], degeneracy_tol: f64) -> ClassifiedPoints {
    let mut out = ClassifiedPoints::default();
    for rec in records {
        match classify_record(rec, degeneracy_tol) {
            PointClass::Maximum => out.maxima.push(rec.point),
            PointClass::Minimum => out.minima.push(rec.point),
            PointClass::Saddle => out.saddles += 1,
            class => out.skipped.push(SkippedPoint {
                point: rec.point,
                class,
            }),
        }
    }
    out
}

/// Scan a classified set for its best objective value.
///
/// `prefer` returns true when the challenger beats the incumbent; a
/// strict comparison there makes the earliest point in iteration order
/// win on exact ties. Empty input yields None rather than a sentinel.
fn select_optimum(points: &[Point], prefer: impl Fn(f64, f64) -> bool) -> Option<Optimum> {
    let mut best: Option<Optimum> = None;
    for &point in points {
        let value = objective(point);
        let replace = match best {
            Some(incumbent) => prefer(value, incumbent.value),
            None => true,
        };
        if replace {
            best = Some(Optimum { point, value });
        }
    }
    best
}

/// Greatest objective value among the maxima; None when the set is empty.
pub fn global_maximum(maxima: &[Point]) -> Option<Optimum> {
    select_optimum(maxima, |challenger, incumbent| challenger > incumbent)
}

/// Smallest objective value among the minima; None when the set is empty.
pub fn global_minimum(minima: &[Point]) -> Option<Optimum> {
    select_optimum(minima, |challenger, incumbent| challenger < incumbent)
}

/// Run the whole pipeline on two coordinate lists.
pub fn run_analysis(x_set: &[f64], y_set: &[f64], degeneracy_tol: f64) -> AnalysisResult {
    let candidates = candidate_points(x_set, y_set);
    let records = hessian_records(&candidates);
    let classified = split_optimum_types(&records, degeneracy_tol);
    let maximum = global_maximum(&classified.maxima);
    let minimum = global_minimum(&classified.minima);
    AnalysisResult {
        candidates: candidates.len(),
        classified,
        maximum,
        minimum,
    }
}
