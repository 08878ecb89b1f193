//! Conteo de progreso por fase.
//!
//! Cada fase lleva su propio contador; el porcentaje se recalcula por item
//! antes de procesarlo. Los contadores son valores que el coordinador
//! enhebra explícitamente, no estado global.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseProgress {
    total: usize,
    done: usize,
}

impl PhaseProgress {
    pub fn new(total: usize) -> Self {
        Self { total, done: 0 }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn done(&self) -> usize {
        self.done
    }

    /// Porcentaje completado, 0 cuando el total es 0.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.done * 100 / self.total) as u32
        }
    }

    pub fn advance(&mut self) {
        self.done += 1;
    }

    /// Etiqueta para el log del item que está por procesarse:
    /// `[<done>/<total> <pct>%]`.
    pub fn label(&self) -> String {
        format!("[{}/{} {}%]", self.done, self.total, self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_zero_for_empty_phase() {
        assert_eq!(PhaseProgress::new(0).percent(), 0);
    }

    #[test]
    fn percent_tracks_advance() {
        let mut p = PhaseProgress::new(4);
        assert_eq!(p.percent(), 0);
        p.advance();
        assert_eq!(p.percent(), 25);
        p.advance();
        p.advance();
        assert_eq!(p.percent(), 75);
        p.advance();
        assert_eq!(p.percent(), 100);
        assert_eq!(p.label(), "[4/4 100%]");
    }

    #[test]
    fn phases_are_independent_values() {
        let mut phase1 = PhaseProgress::new(10);
        let phase2 = PhaseProgress::new(3);
        phase1.advance();
        assert_eq!(phase1.done(), 1);
        assert_eq!(phase2.done(), 0);
    }
}
