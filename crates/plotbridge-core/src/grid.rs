// File: crates/plotbridge-core/src/grid.rs
// Summary: Tick layout helpers.

/// `steps` evenly spaced values over `[start, end]`, endpoints included.
/// One step yields `[start]`; zero yields nothing.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps as f64 - 1.0);
            // last value pinned so rounding never drifts past `end`
            (0..steps)
                .map(|i| if i + 1 == steps { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_included() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 9.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
