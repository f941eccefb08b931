use rusqlite::{params, Connection};

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

fn main() {
    env_logger::init();

    let mut rng = SimpleRng::new(42);

    let stations: [(&str, f64); 3] = [("Oslo", 8.0), ("Kyiv", 12.0), ("Lisbon", 18.0)];
    let days = 5;
    let readings_per_day = 8; // every 3 hours

    let output_path = "sample_observations.db";
    let conn = Connection::open(output_path).expect("Failed to create output database");
    conn.execute_batch(
        "DROP TABLE IF EXISTS Observation;
         CREATE TABLE Observation (
             station     TEXT NOT NULL,
             observed_at TEXT NOT NULL,
             temperature REAL NOT NULL,
             pressure    INTEGER NOT NULL,
             wind_speed  REAL NOT NULL,
             humidity    INTEGER NOT NULL
         );",
    )
    .expect("Failed to create Observation table");

    let mut insert = conn
        .prepare(
            "INSERT INTO Observation
             (station, observed_at, temperature, pressure, wind_speed, humidity)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .expect("Failed to prepare insert");

    let mut n_rows = 0usize;
    for (station, base_temp) in &stations {
        for day in 0..days {
            for slot in 0..readings_per_day {
                let hour = slot * 3;
                // Diurnal cycle peaking mid-afternoon, plus noise.
                let phase = (hour as f64 - 14.0) / 24.0 * std::f64::consts::TAU;
                let temperature = base_temp + 5.0 * phase.cos() + rng.gauss(0.0, 0.8);
                let pressure = 1013 + rng.gauss(0.0, 6.0).round() as i64;
                let wind_speed = rng.gauss(4.0, 1.5).abs();
                let humidity = (60.0 + rng.gauss(0.0, 12.0)).clamp(5.0, 100.0).round() as i64;
                let observed_at = format!("2024-06-{:02} {hour:02}:00:00", 10 + day);

                insert
                    .execute(params![
                        station,
                        observed_at,
                        (temperature * 10.0).round() / 10.0,
                        pressure,
                        (wind_speed * 10.0).round() / 10.0,
                        humidity,
                    ])
                    .expect("Failed to insert observation");
                n_rows += 1;
            }
        }
    }
    drop(insert);

    println!(
        "Wrote {n_rows} observations for {} stations to {output_path}",
        stations.len()
    );
}
