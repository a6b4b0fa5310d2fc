use crate::document::TaskDocument;

/// Width of the rendered progress track, in segments.
pub const BAR_SEGMENTS: usize = 10;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Display-only completion summary, a pure function of list sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub percent: u32,
    pub bar: String,
}

/// Percentage of completed items over all items, rounded half up, with
/// a fixed-width bar filled proportionally. Zero when both lists are
/// empty.
pub fn compute_progress(doc: &TaskDocument) -> Progress {
    let completed = doc.checklist.len();
    let total = doc.total();
    let percent = if total == 0 {
        0
    } else {
        round_ratio(100 * completed, total)
    };
    let filled = round_ratio(BAR_SEGMENTS * percent, 100);
    let mut bar = String::with_capacity(BAR_SEGMENTS * FILLED.len_utf8());
    for segment in 0..BAR_SEGMENTS {
        bar.push(if segment < filled { FILLED } else { EMPTY });
    }
    Progress {
        percent: percent as u32,
        bar,
    }
}

fn round_ratio(numerator: usize, denominator: usize) -> usize {
    (numerator + denominator / 2) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ActiveTask, CompletedTask};
    use pretty_assertions::assert_eq;

    fn doc(active: usize, completed: usize) -> TaskDocument {
        TaskDocument {
            tasks: (0..active)
                .map(|n| ActiveTask::new(format!("task {n}"), 0))
                .collect(),
            checklist: (0..completed)
                .map(|n| CompletedTask::new(format!("done {n}"), 0))
                .collect(),
        }
    }

    #[test]
    fn empty_document_is_zero_percent() {
        let progress = compute_progress(&doc(0, 0));
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.bar, "░░░░░░░░░░");
    }

    #[test]
    fn all_completed_is_full_bar() {
        let progress = compute_progress(&doc(0, 3));
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.bar, "██████████");
    }

    #[test]
    fn rounds_half_up() {
        // 1 of 3 -> 33%, bar rounds 3.3 segments down to 3.
        let progress = compute_progress(&doc(2, 1));
        assert_eq!(progress.percent, 33);
        assert_eq!(progress.bar, "███░░░░░░░");

        // 2 of 3 -> 67%, bar rounds 6.7 segments up to 7.
        let progress = compute_progress(&doc(1, 2));
        assert_eq!(progress.percent, 67);
        assert_eq!(progress.bar, "███████░░░");

        // 1 of 2 -> exactly half.
        let progress = compute_progress(&doc(1, 1));
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.bar, "█████░░░░░");
    }

    #[test]
    fn percent_stays_in_bounds() {
        for active in 0..6 {
            for completed in 0..6 {
                let progress = compute_progress(&doc(active, completed));
                assert!(progress.percent <= 100);
                assert_eq!(progress.bar.chars().count(), BAR_SEGMENTS);
            }
        }
    }
}
