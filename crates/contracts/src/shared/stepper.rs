//! Linear step navigation for multi-step forms.

pub const CREATE_STEPS: [&str; 6] = [
    "Header",
    "Sasaran",
    "Program Kerja",
    "Rencana Bulanan",
    "Dokumentasi",
    "Review",
];

pub const EDIT_STEPS: [&str; 6] = [
    "Header",
    "Sasaran",
    "Program Kerja",
    "Rencana & Realisasi",
    "Dokumentasi",
    "Review",
];

/// Current position in a fixed list of steps, 1-based.
///
/// Only `next`/`back` move it; both clamp at the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    current: usize,
    labels: &'static [&'static str],
}

impl Stepper {
    pub fn new(labels: &'static [&'static str]) -> Self {
        Self { current: 1, labels }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub fn current_label(&self) -> &'static str {
        self.labels.get(self.current - 1).copied().unwrap_or("")
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current >= self.labels.len()
    }

    pub fn next(&mut self) {
        if self.current < self.labels.len() {
            self.current += 1;
        }
    }

    pub fn back(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let mut stepper = Stepper::new(&CREATE_STEPS);
        stepper.back();
        assert_eq!(stepper.current(), 1);

        for _ in 0..10 {
            stepper.next();
        }
        assert_eq!(stepper.current(), 6);
        assert!(stepper.is_last());
        assert_eq!(stepper.current_label(), "Review");
    }

    #[test]
    fn test_back_undoes_next_in_the_middle() {
        for start in 2..6 {
            let mut stepper = Stepper::new(&EDIT_STEPS);
            while stepper.current() < start {
                stepper.next();
            }
            stepper.next();
            stepper.back();
            assert_eq!(stepper.current(), start);
        }
    }

    #[test]
    fn test_labels_differ_between_modes() {
        assert_eq!(CREATE_STEPS.len(), EDIT_STEPS.len());
        assert_eq!(Stepper::new(&EDIT_STEPS).labels()[3], "Rencana & Realisasi");
    }
}
