//! Writes an offline hazard table (`sample_data/hazard_sample.{csv,parquet}`)
//! with the same column shape as the published database, for use with
//! File > Open local dataset.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const CHEMICALS: &[(&str, &str, &str)] = &[
    ("50-00-0", "Formaldehyde", "C=O"),
    ("64-17-5", "Ethanol", "CCO"),
    ("67-64-1", "Acetone", "CC(C)=O"),
    ("71-43-2", "Benzene", "c1ccccc1"),
    ("108-88-3", "Toluene", "Cc1ccccc1"),
    ("1330-20-7", "Xylene", "Cc1ccccc1C"),
    ("50-32-8", "Benzo[a]pyrene", "c1ccc2c(c1)cc1ccc3cccc4ccc2c1c34"),
    ("91-20-3", "Naphthalene", "c1ccc2ccccc2c1"),
    ("7440-50-8", "Copper", "[Cu]"),
    ("7439-97-6", "Mercury", "[Hg]"),
    ("1912-24-9", "Atrazine", "CCNc1nc(Cl)nc(NC(C)C)n1"),
    ("333-41-5", "Diazinon", "CCOP(=S)(OCC)Oc1cc(C)nc(C(C)C)n1"),
    ("52315-07-8", "Cypermethrin", "CC1(C)C(C=C(Cl)Cl)C1C(=O)OC(C#N)c1cccc(Oc2ccccc2)c1"),
    ("80-05-7", "Bisphenol A", "CC(C)(c1ccc(O)cc1)c1ccc(O)cc1"),
    ("117-81-7", "Bis(2-ethylhexyl) phthalate", "CCCCC(CC)COC(=O)c1ccccc1C(=O)OCC(CC)CCCC"),
    ("1763-23-1", "PFOS", "OS(=O)(=O)C(F)(F)C(F)(F)C(F)(F)C(F)(F)C(F)(F)C(F)(F)C(F)(F)C(F)(F)F"),
    ("58-89-9", "Lindane", "ClC1C(Cl)C(Cl)C(Cl)C(Cl)C1Cl"),
    ("120-12-7", "Anthracene", "c1ccc2cc3ccccc3cc2c1"),
    ("85-01-8", "Phenanthrene", "c1ccc2c(c1)ccc1ccccc12"),
    ("7758-98-7", "Copper sulfate", "[O-]S(=O)(=O)[O-].[Cu+2]"),
];

/// Endpoints as (column, log10 centre, spread).
const ENDPOINTS: &[(&str, f64, f64)] = &[
    ("Algae_EC50_72h", 0.5, 1.2),
    ("Crustacean_LC50_48h", 0.2, 1.4),
    ("Fish_LC50_96h", 0.8, 1.1),
    ("Mollusc_EC50_96h", 1.0, 1.0),
    ("HC5", -0.5, 1.3),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
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

/// Log-normal toxicity estimate in mg/L, rounded to 4 significant digits;
/// roughly one in twelve is left missing.
fn estimate(rng: &mut SimpleRng, centre: f64, spread: f64) -> Option<f64> {
    if rng.next_f64() < 1.0 / 12.0 {
        return None;
    }
    let v = 10f64.powf(rng.gauss(centre, spread));
    let digits = 3 - v.log10().floor() as i32;
    let scale = 10f64.powi(digits);
    Some((v * scale).round() / scale)
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // Two exposure scenarios per chemical so CAS values repeat in the filter.
    let rows: Vec<(&str, &str, &str, Vec<Option<f64>>)> = (0..2)
        .flat_map(|_| CHEMICALS.iter())
        .map(|&(cas, name, smiles)| {
            let values = ENDPOINTS
                .iter()
                .map(|&(_, centre, spread)| estimate(&mut rng, centre, spread))
                .collect();
            (cas, name, smiles, values)
        })
        .collect();

    let out_dir = Path::new("sample_data");
    std::fs::create_dir_all(out_dir).context("creating sample_data/")?;

    // ---- CSV ----
    let csv_path = out_dir.join("hazard_sample.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    let mut header = vec!["CAS", "Name", "SMILES"];
    header.extend(ENDPOINTS.iter().map(|(col, _, _)| *col));
    writer.write_record(&header)?;
    for (cas, name, smiles, values) in &rows {
        let mut record = vec![cas.to_string(), name.to_string(), smiles.to_string()];
        record.extend(values.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    // ---- Parquet ----
    let mut fields = vec![
        Field::new("CAS", DataType::Utf8, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("SMILES", DataType::Utf8, false),
    ];
    fields.extend(
        ENDPOINTS
            .iter()
            .map(|(col, _, _)| Field::new(*col, DataType::Float64, true)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.0))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.2))),
    ];
    for i in 0..ENDPOINTS.len() {
        let values: Float64Array = rows.iter().map(|r| r.3[i]).collect();
        columns.push(Arc::new(values));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let parquet_path = out_dir.join("hazard_sample.parquet");
    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut pq_writer = ArrowWriter::try_new(file, schema, None)?;
    pq_writer.write(&batch)?;
    pq_writer.close()?;

    log::info!(
        "Wrote {} rows to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
