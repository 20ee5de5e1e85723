//! CSV export of sampled trajectories.

use std::io::{self, Write};

use crate::simulation::{TrajectoryResult, VariantResults};

/// Writes the sampled positions of `result` as `x,y` rows.
pub fn write_trajectory_csv<W: Write>(mut w: W, result: &TrajectoryResult) -> io::Result<()> {
    writeln!(w, "x,y")?;
    for p in &result.points {
        writeln!(w, "{:.16e},{:.16e}", p.x, p.y)?;
    }
    Ok(())
}

/// Writes one summary row per particle variant.
pub fn write_impact_summary_csv<W: Write>(mut w: W, results: &VariantResults) -> io::Result<()> {
    writeln!(w, "variant,x,y,surface,on_plate,outcome,steps")?;
    for (name, r) in [("a", &results.a), ("b", &results.b)] {
        writeln!(
            w,
            "{},{:.16e},{:.16e},{},{},{:?},{}",
            name, r.impact.x, r.impact.y, r.impact.surface, r.impact.on_plate, r.outcome, r.steps
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParticleVariant, SimulationParameters};
    use crate::simulation::{
        simulate_variants, SimulationConfig, SimulationEngine, TrajectorySimulator,
    };

    #[test]
    fn trajectory_csv_has_header_and_one_row_per_point() {
        let config = SimulationConfig::new(0.002, 5).expect("valid config");
        let result = TrajectorySimulator::new(config)
            .simulate(&SimulationParameters::default(), ParticleVariant::A);
        let mut buf = Vec::new();
        write_trajectory_csv(&mut buf, &result).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "x,y");
        assert_eq!(lines.len(), result.len() + 1);
        assert!(lines[1].starts_with("0.0000000000000000e0,"));
    }

    #[test]
    fn summary_lists_both_variants() {
        let config = SimulationConfig::new(0.002, 5).expect("valid config");
        let engine = TrajectorySimulator::new(config);
        let results = simulate_variants(&engine, &SimulationParameters::default());
        let mut buf = Vec::new();
        write_impact_summary_csv(&mut buf, &results).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("a,"));
        assert!(lines[2].starts_with("b,"));
        assert!(lines[2].ends_with(",none,false,Exhausted,5"));
    }
}
