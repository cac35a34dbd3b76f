//! Milestones of early quantum theory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Year → (label, portrait path)
pub type Events = BTreeMap<i32, (String, PathBuf)>;

const QUANTUM_HISTORY: [(i32, &str, &str); 5] = [
    (1900, "Planck: energy quanta", "Max_Planck.jpg"),
    (1905, "Einstein: light quanta", "Albert_Einstein.jpg"),
    (1911, "Ehrenfest: UV catastrophe", "Paul_Ehrenfest.jpg"),
    (1913, "Bohr: atomic model", "Niels_Bohr.jpg"),
    (1926, "Schrödinger equation", "Erwin_Schrodinger.jpg"),
];

/// Default events with portraits resolved under `figures_dir`
pub fn quantum_history(figures_dir: &Path) -> Events {
    QUANTUM_HISTORY
        .iter()
        .map(|&(year, label, file)| (year, (label.to_string(), figures_dir.join(file))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_sorted_by_year() {
        let events = quantum_history(Path::new("figures"));
        let years: Vec<i32> = events.keys().copied().collect();
        assert_eq!(years, vec![1900, 1905, 1911, 1913, 1926]);
    }

    #[test]
    fn test_paths_use_figures_dir() {
        let events = quantum_history(Path::new("assets/portraits"));
        let (label, path) = &events[&1911];
        assert!(label.contains("Ehrenfest"));
        assert_eq!(path, &Path::new("assets/portraits").join("Paul_Ehrenfest.jpg"));
    }
}
