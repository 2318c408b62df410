//! Write a demo data directory: synthetic Keithley run files (diode-like
//! I/V sweeps with deterministic noise, native column headers) plus a
//! notes file covering a subset of them.

use std::fs;
use std::io::Write;
use std::path::Path;

/// Minimal deterministic PRNG (splitmix64).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Shockley diode current for a bias sweep point, in amperes.
fn diode_current(v: f64, saturation: f64) -> f64 {
    let thermal_v = 0.02585; // kT/q at room temperature
    saturation * ((v / thermal_v).exp() - 1.0)
}

fn write_run(
    dir: &Path,
    name: &str,
    bias_start: f64,
    bias_end: f64,
    n: usize,
    saturation: f64,
    rng: &mut SimpleRng,
) -> std::io::Result<()> {
    let mut file = fs::File::create(dir.join(name))?;
    writeln!(file, "Smu1_Time(1)(1),Smu1_V(1)(1),Smu1_I(1)(1)")?;
    for k in 0..n {
        let t = k as f64 * 0.05;
        let v = bias_start + (bias_end - bias_start) * k as f64 / (n - 1) as f64;
        let i = diode_current(v, saturation) + rng.gauss(0.0, saturation * 0.02);
        writeln!(file, "{t:.3},{v:.4},{i:.6e}")?;
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    let mut rng = SimpleRng::new(42);
    let out = Path::new("sample_data");
    fs::create_dir_all(out)?;

    // Timestamp-style names mimicking the acquisition software.
    let runs = [
        ("2018_2_16_10_3_48.csv", 1e-9),
        ("2018_2_16_10_8_24.csv", 2e-9),
        ("2018_2_16_10_11_9.csv", 5e-10),
        ("2018_2_16_11_8_16.csv", 1e-8),
        ("2018_2_16_11_20_2.csv", 3e-9),
    ];
    for (name, saturation) in &runs {
        write_run(out, name, -3.0, 0.4, 200, *saturation, &mut rng)?;
    }

    // Notes on a subset only; the rest exercise the default label path.
    let mut notes = fs::File::create(out.join("notes.csv"))?;
    writeln!(notes, "filename,description")?;
    writeln!(notes, "2018_2_16_10_3_48.csv, First -3V bias test with no ops")?;
    writeln!(notes, "2018_2_16_10_8_24.csv, test with no ops")?;
    writeln!(notes, "2018_2_16_11_8_16.csv, test during power test shot")?;

    println!(
        "Wrote {} runs ({} noted) to {}",
        runs.len(),
        3,
        out.display()
    );
    Ok(())
}
