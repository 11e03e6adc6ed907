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

    /// Uniform pick from a slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let cities: &[(&str, &str)] = &[
        ("Dallas", "TX"),
        ("Austin", "TX"),
        ("Houston", "TX"),
        ("El Paso", "TX"),
        ("Reno", "NV"),
        ("Las Vegas", "NV"),
        ("Fresno", "CA"),
        ("Sacramento", "CA"),
        ("Portland", "OR"),
        ("Eugene", "OR"),
    ];
    let shapes = ["disk", "light", "circle", "triangle", "fireball", "oval"];
    let colors = ["red", "green", "orange", "blue", "yellow"];

    let mut records: Vec<[String; 5]> = Vec::new();

    for _ in 0..120 {
        let &(city, state) = rng.choose(cities);

        // Roughly a third of shapes and over half of colors went unreported.
        let shape = if rng.next_f64() < 0.3 {
            String::new()
        } else {
            rng.choose(&shapes).to_string()
        };
        let color = if rng.next_f64() < 0.6 {
            String::new()
        } else {
            rng.choose(&colors).to_string()
        };

        let month = 1 + rng.next_u64() % 12;
        let day = 1 + rng.next_u64() % 28;
        let year = 1995 + rng.next_u64() % 20;
        let hour = rng.next_u64() % 24;
        let minute = rng.next_u64() % 60;
        let time = format!("{month}/{day}/{year} {hour:02}:{minute:02}");

        records.push([
            city.to_string(),
            color,
            shape,
            state.to_string(),
            time,
        ]);
    }

    // Re-report a handful of earlier sightings verbatim so duplicate
    // detection has something to find.
    for i in [3usize, 17, 42] {
        let copy = records[i].clone();
        records.push(copy);
    }

    let output_path = "sightings.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["City", "Colors Reported", "Shape Reported", "State", "Time"])
        .expect("Failed to write header");
    for record in &records {
        writer.write_record(record).expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush writer");

    println!("Wrote {} sightings to {output_path}", records.len());
}
