//! Course progress and lesson-to-lesson navigation.
//!
//! Both operate on lessons already ordered by (module order, lesson order).

use std::collections::BTreeSet;

/// Percentage of completed lessons, rounded down. Zero when there are no lessons.
#[must_use]
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = completed.min(total) * 100 / total;
    u8::try_from(percent).unwrap_or(100)
}

/// Previous and next items around the first item matching `is_current`.
///
/// Both are `None` when no item matches.
pub fn neighbors<T>(items: &[T], is_current: impl Fn(&T) -> bool) -> (Option<&T>, Option<&T>) {
    let Some(index) = items.iter().position(is_current) else {
        return (None, None);
    };

    let prev = index.checked_sub(1).and_then(|i| items.get(i));
    let next = items.get(index + 1);
    (prev, next)
}

/// A caller's completion state across one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseProgress {
    lesson_ids: Vec<i32>,
    completed: BTreeSet<i32>,
}

impl CourseProgress {
    /// `lesson_ids` must be in course order. Completed ids outside the course are dropped.
    #[must_use]
    pub fn new(lesson_ids: Vec<i32>, completed: impl IntoIterator<Item = i32>) -> Self {
        let completed = completed
            .into_iter()
            .filter(|id| lesson_ids.contains(id))
            .collect();
        Self {
            lesson_ids,
            completed,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lesson_ids.len()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        progress_percent(self.completed_count(), self.total())
    }

    #[must_use]
    pub fn is_completed(&self, lesson_id: i32) -> bool {
        self.completed.contains(&lesson_id)
    }

    #[must_use]
    pub const fn completed_ids(&self) -> &BTreeSet<i32> {
        &self.completed
    }

    /// Ids of the lessons before and after `lesson_id`.
    #[must_use]
    pub fn neighbors(&self, lesson_id: i32) -> (Option<i32>, Option<i32>) {
        let (prev, next) = neighbors(&self.lesson_ids, |id| *id == lesson_id);
        (prev.copied(), next.copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_with_no_lessons_is_zero() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(3, 0), 0);
    }

    #[test]
    fn percent_rounds_down() {
        assert_eq!(progress_percent(2, 4), 50);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(4, 4), 100);
    }

    #[test]
    fn neighbors_at_boundaries() {
        let items = [10, 20, 30];
        assert_eq!(neighbors(&items, |i| *i == 10), (None, Some(&20)));
        assert_eq!(neighbors(&items, |i| *i == 20), (Some(&10), Some(&30)));
        assert_eq!(neighbors(&items, |i| *i == 30), (Some(&20), None));
        assert_eq!(neighbors(&items, |i| *i == 99), (None, None));
    }

    #[test]
    fn single_lesson_has_no_neighbors() {
        let progress = CourseProgress::new(vec![5], []);
        assert_eq!(progress.neighbors(5), (None, None));
    }

    #[test]
    fn progress_ignores_lessons_from_other_courses() {
        let progress = CourseProgress::new(vec![1, 2, 3, 4], [2, 4, 99]);
        assert_eq!(progress.total(), 4);
        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.percent(), 50);
        assert!(progress.is_completed(4));
        assert!(!progress.is_completed(99));
    }
}
