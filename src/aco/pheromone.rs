/// Reinforcement weights on every directed edge.
///
/// Read-only while ants construct tours; changed only by
/// [`PheromoneMatrix::update`] once per generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n × n` matrix with every entry set to `level`.
    pub fn new(n: usize, level: f64) -> Self {
        Self {
            n,
            data: vec![level; n * n],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, k: usize) -> f64 {
        self.data[i * self.n + k]
    }

    /// Evaporates every off-diagonal entry by `evaporation` and adds
    /// `intensity` times the accumulated deposit.
    pub(crate) fn update(&mut self, deposits: &Deposits, evaporation: f64, intensity: f64) {
        debug_assert_eq!(deposits.n, self.n);
        let keep = 1.0 - evaporation;
        for i in 0..self.n {
            for k in 0..self.n {
                if i == k {
                    continue;
                }
                let idx = i * self.n + k;
                self.data[idx] = self.data[idx] * keep + intensity * deposits.data[idx];
            }
        }
    }
}

/// Per-generation sum of `1/length` over the ants using each edge.
#[derive(Debug, Clone)]
pub(crate) struct Deposits {
    n: usize,
    data: Vec<f64>,
}

impl Deposits {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub(crate) fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Adds `amount` to both directions of every edge of the closed tour.
    ///
    /// Each undirected edge is credited once per tour; for two cities the
    /// closing edge is the same edge and is not counted again.
    pub(crate) fn add_tour(&mut self, tour: &[usize], amount: f64) {
        let n = self.n;
        let mut credit = |a: usize, b: usize| {
            self.data[a * n + b] += amount;
            self.data[b * n + a] += amount;
        };
        for w in tour.windows(2) {
            credit(w[0], w[1]);
        }
        if tour.len() > 2 {
            credit(tour[tour.len() - 1], tour[0]);
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, i: usize, k: usize) -> f64 {
        self.data[i * self.n + k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uniform() {
        let p = PheromoneMatrix::new(3, 0.1);
        assert_eq!(p.len(), 3);
        for i in 0..3 {
            for k in 0..3 {
                assert_eq!(p.get(i, k), 0.1);
            }
        }
    }

    #[test]
    fn test_deposits_closed_tour() {
        let mut d = Deposits::new(4);
        d.add_tour(&[0, 2, 1, 3], 0.5);
        assert_eq!(d.get(0, 2), 0.5);
        assert_eq!(d.get(2, 0), 0.5);
        assert_eq!(d.get(2, 1), 0.5);
        assert_eq!(d.get(1, 3), 0.5);
        // closing edge
        assert_eq!(d.get(3, 0), 0.5);
        assert_eq!(d.get(0, 3), 0.5);
        assert_eq!(d.get(0, 1), 0.0);
    }

    #[test]
    fn test_deposits_two_cities_single_edge() {
        let mut d = Deposits::new(2);
        d.add_tour(&[1, 0], 0.25);
        assert_eq!(d.get(0, 1), 0.25);
        assert_eq!(d.get(1, 0), 0.25);
    }

    #[test]
    fn test_update_rule() {
        let mut p = PheromoneMatrix::new(3, 0.1);
        let mut d = Deposits::new(3);
        d.add_tour(&[0, 1, 2], 0.5);
        d.add_tour(&[0, 2, 1], 0.25);
        p.update(&d, 0.5, 10.0);
        // every edge of a triangle is used by both tours
        assert!((p.get(0, 1) - (0.05 + 10.0 * 0.75)).abs() < 1e-12);
        assert!((p.get(2, 0) - (0.05 + 10.0 * 0.75)).abs() < 1e-12);
        assert_eq!(p.get(1, 1), 0.1);
    }

    #[test]
    fn test_clear() {
        let mut d = Deposits::new(3);
        d.add_tour(&[0, 1, 2], 1.0);
        d.clear();
        assert_eq!(d.get(0, 1), 0.0);
    }
}
