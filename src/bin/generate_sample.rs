use anyhow::{Context, Result};

use rusty_kpss::data::sample::{SimpleRng, noisy_trend, random_walk, white_noise};

/// Rows written to the sample file.
const N_ROWS: usize = 250;

/// Format with a comma thousands separator, e.g. `12,345.67`.
fn with_thousands(v: f64) -> String {
    let text = format!("{:.2}", v.abs());
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let walk = random_walk(N_ROWS, 100.0, 1.0, &mut rng);
    let noise = white_noise(N_ROWS, 50.0, 2.0, &mut rng);
    let trend = noisy_trend(N_ROWS, 10.0, 0.5, 1.0, &mut rng);
    let price = random_walk(N_ROWS, 12_000.0, 150.0, &mut rng);

    let output_path = "sample_series.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record([
        "day",
        "random_walk",
        "white_noise",
        "trend",
        "price_formatted",
        "constant",
    ])?;

    for i in 0..N_ROWS {
        // Sprinkle gaps and junk into the formatted column.
        let formatted = match i % 37 {
            5 => String::new(),
            17 => "n/a".to_string(),
            _ => with_thousands(price[i]),
        };
        writer.write_record([
            i.to_string(),
            format!("{:.4}", walk[i]),
            format!("{:.4}", noise[i]),
            format!("{:.4}", trend[i]),
            formatted,
            "7".to_string(),
        ])?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {N_ROWS} rows to {output_path}");
    Ok(())
}
