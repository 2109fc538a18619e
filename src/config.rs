use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Root {
    pub program: Program,
    #[serde(default)]
    pub numerics: Numerics,
    pub points: Points,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Program {
    pub name: String,
    pub module: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Numerics {
    /// Half-width of the exclusion band around fxx == 0; points whose
    /// curvature falls inside it are reported as degenerate instead of
    /// classified. 0.0 keeps exact-zero semantics.
    #[serde(default = "default_degeneracy_tol")]
    pub degeneracy_tol: f64,
}

fn default_degeneracy_tol() -> f64 {
    0.0
}

impl Default for Numerics {
    fn default() -> Self {
        Self {
            degeneracy_tol: default_degeneracy_tol(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Points {
    pub x_set: Vec<f64>,
    pub y_set: Vec<f64>,
}

/// The x-coordinates of the critical points of the built-in objective,
/// derived analytically offline.
pub const X_SET: [f64; 57] = [
    -3.595, -3.57, -3.273, -3.226, -2.9473, -2.8847, -2.6202, -2.5452, -2.2923, -2.2064, -1.9639,
    -1.868, -1.635, -1.53, -1.306, -1.192, -0.977, -0.855, -0.648, -0.517, -0.318, 0.18, 0.11,
    0.157, 0.341, 0.494, 0.67, 0.831, 1.0, 1.169, 1.33, 1.506, 1.659, 1.843, 1.989, 2.18, 2.318,
    2.517, 2.648, 2.855, 2.977, 3.192, 3.306, 3.53, 3.635, 3.868, 3.964, 4.206, 4.292, 4.545,
    4.62, 4.885, 4.947, 5.226, 5.273, 5.57, 5.595,
];

/// The matching y-coordinates.
pub const Y_SET: [f64; 57] = [
    -5.595, -5.57, -5.273, -5.226, -4.947, -4.885, -4.62, -4.545, -4.292, -4.206, -3.964, -3.868,
    -3.635, -3.53, -3.306, -3.192, -2.977, -2.855, -2.648, -2.517, -2.318, -2.18, -1.989, -1.843,
    -1.659, -1.506, -1.33, -1.169, -1.0, -0.831, -0.67, -0.494, -0.341, -0.157, -0.011, 0.18,
    0.318, 0.517, 0.648, 0.855, 0.977, 1.192, 1.306, 1.53, 1.635, 1.868, 1.964, 2.206, 2.292,
    2.545, 2.62, 2.885, 2.947, 3.226, 3.273, 3.57, 3.595,
];

impl Root {
    /// Configuration used when no file is supplied: the built-in
    /// critical-point coordinates and default numerics.
    pub fn builtin() -> Self {
        Self {
            program: Program {
                name: "hesscan".to_string(),
                module: "builtin".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            numerics: Numerics::default(),
            points: Points {
                x_set: X_SET.to_vec(),
                y_set: Y_SET.to_vec(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.program.name != "hesscan" {
            bail!("program.name must be hesscan");
        }
        if !self.numerics.degeneracy_tol.is_finite() || self.numerics.degeneracy_tol < 0.0 {
            bail!("numerics.degeneracy_tol must be finite and >= 0");
        }
        if self.numerics.degeneracy_tol >= 1.0 {
            bail!("numerics.degeneracy_tol must be < 1");
        }
        for (i, x) in self.points.x_set.iter().enumerate() {
            if !x.is_finite() {
                bail!("points.x_set[{}] is not finite: {}", i, x);
            }
        }
        for (i, y) in self.points.y_set.iter().enumerate() {
            if !y.is_finite() {
                bail!("points.y_set[{}] is not finite: {}", i, y);
            }
        }
        Ok(())
    }
}
