use crate::analysis::{classify, det_hessian, fxx, objective, Point, PointClass};
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};

pub struct CsvWriter {
    w: BufWriter<File>,
    degeneracy_tol: f64,
}

impl CsvWriter {
    pub fn create(path: &str, degeneracy_tol: f64) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            degeneracy_tol,
        })
    }

    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.w, "index,x,y,det_h,fxx_x,class,objective")?;
        Ok(())
    }

    /// One row per candidate. The objective column is only meaningful
    /// for classified extrema; it is left blank for the rest.
    pub fn write_row(&mut self, index: usize, point: Point) -> Result<()> {
        let class = classify(point, self.degeneracy_tol);
        let det = if point.is_finite() {
            format!("{:.6e}", det_hessian(point.x, point.y))
        } else {
            String::new()
        };
        let curvature = if point.is_finite() {
            format!("{:.6e}", fxx(point.x))
        } else {
            String::new()
        };
        let value = match class {
            PointClass::Maximum | PointClass::Minimum => format!("{:.10}", objective(point)),
            _ => String::new(),
        };
        writeln!(
            self.w,
            "{},{},{},{},{},{},{}",
            index,
            point.x,
            point.y,
            det,
            curvature,
            class.name(),
            value
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }
}
