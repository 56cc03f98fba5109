//! Report sink that writes body positions as text.
//!
//! Each report becomes a header line followed by one `x, y, z` line per
//! body, in the scenario's display units.

use std::io::Write;

use crate::error::Result;
use crate::simulation::simulator::{Report, ReportSink};
use crate::simulation::units::UnitSystem;

pub struct PositionWriter<W: Write> {
    out: W,
    units: UnitSystem,
    written: usize,
}

impl<W: Write> PositionWriter<W> {
    pub fn new(out: W, units: UnitSystem) -> Self {
        Self {
            out,
            units,
            written: 0,
        }
    }

    /// Number of reports written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> ReportSink for PositionWriter<W> {
    fn report(&mut self, report: &Report) -> Result<()> {
        writeln!(self.out, "# step {} t = {}", report.step, report.time)?;
        for body in &report.bodies {
            let p = self.units.position_from_si(&body.position);
            writeln!(self.out, "{}, {}, {}", p.x, p.y, p.z)?;
        }
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Body, NVec3};
    use crate::simulation::units::PARSEC_TO_METER;

    fn report(bodies: Vec<Body>) -> Report {
        Report {
            step: 3,
            time: 1.5,
            bodies,
        }
    }

    #[test]
    fn writes_header_and_one_line_per_body() {
        let mut writer = PositionWriter::new(Vec::new(), UnitSystem::Si);
        writer
            .report(&report(vec![
                Body::new(NVec3::new(1.0, -2.5, 0.0), NVec3::zeros(), 1.0),
                Body::new(NVec3::new(0.0, 0.0, 3.0), NVec3::zeros(), 0.0),
            ]))
            .unwrap();
        assert_eq!(writer.written(), 1);

        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text, "# step 3 t = 1.5\n1, -2.5, 0\n0, 0, 3\n");
    }

    #[test]
    fn astro_positions_are_written_in_parsecs() {
        let mut writer = PositionWriter::new(Vec::new(), UnitSystem::Astro);
        writer
            .report(&report(vec![Body::new(
                NVec3::new(2.0 * PARSEC_TO_METER, 0.0, 0.0),
                NVec3::zeros(),
                1.0,
            )]))
            .unwrap();

        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text.lines().nth(1), Some("2, 0, 0"));
    }
}
